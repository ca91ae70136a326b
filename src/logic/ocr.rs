//! Image-to-Text Boundary
//!
//! OCR is an opaque external step: an image goes in, extracted text comes
//! out. The contract is total - any failure (missing engine, corrupt image,
//! unsupported format) degrades to an empty string, never an error. The
//! check flow treats empty text as "nothing to analyze".

use std::path::Path;
use std::process::Command;

use crate::constants;

/// Extracts text from an image. Returns empty on any failure.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, image: &Path) -> String;
}

// ============================================================================
// TESSERACT BACKEND
// ============================================================================

/// Shells out to the tesseract CLI.
///
/// The binary path is overridable via `SCAMGUARD_TESSERACT_BIN` for hosts
/// where the engine is not on PATH.
pub struct TesseractExtractor {
    binary: String,
}

impl TesseractExtractor {
    pub fn new() -> Self {
        Self {
            binary: constants::tesseract_bin(),
        }
    }

    pub fn with_binary(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

impl Default for TesseractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract_text(&self, image: &Path) -> String {
        let output = Command::new(&self.binary).arg(image).arg("stdout").output();

        match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).into_owned(),
            Ok(out) => {
                log::warn!(
                    "tesseract exited with {} for {:?}: {}",
                    out.status,
                    image,
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                String::new()
            }
            Err(e) => {
                log::warn!("Failed to run {} for {:?}: {}", self.binary, image, e);
                String::new()
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_engine_degrades_to_empty() {
        let extractor = TesseractExtractor::with_binary("definitely-not-a-real-ocr-binary");
        let text = extractor.extract_text(Path::new("whatever.png"));
        assert_eq!(text, "");
    }
}
