//! Event Store - Append-Only Classification Log
//!
//! The store contract is two operations: append one event, scan the full
//! history. No update, no delete. `JsonlEventStore` is the durable
//! backend (one JSON document per line, rotated files); `MemoryEventStore`
//! backs tests and ephemeral runs.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, Timelike, Utc};
use parking_lot::Mutex;

use super::event::ClassificationEvent;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Maximum file size before rotation (10 MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Log file extension
const LOG_EXT: &str = "jsonl";

// ============================================================================
// STORE CONTRACT
// ============================================================================

/// Append-only store of classification events.
///
/// `append` must be atomic per event under concurrent callers; `scan_all`
/// is an independent, restartable full read with no ordering guarantee.
pub trait EventStore: Send + Sync {
    fn append(&self, event: &ClassificationEvent) -> io::Result<()>;
    fn scan_all(&self) -> io::Result<Vec<ClassificationEvent>>;
}

// ============================================================================
// JSONL STORE
// ============================================================================

struct WriterState {
    writer: BufWriter<File>,
    current_file: PathBuf,
    current_size: u64,
}

/// Durable append-only JSONL store with size-based rotation.
///
/// Appends are serialized through a mutex and flushed per event, so a
/// concurrent scan never observes a partially written line.
pub struct JsonlEventStore {
    state: Mutex<Option<WriterState>>,
    base_dir: PathBuf,
    max_file_size: u64,
}

impl JsonlEventStore {
    pub fn new(base_dir: PathBuf) -> io::Result<Self> {
        Self::with_max_file_size(base_dir, MAX_FILE_SIZE)
    }

    pub fn with_max_file_size(base_dir: PathBuf, max_file_size: u64) -> io::Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            state: Mutex::new(None),
            base_dir,
            max_file_size,
        })
    }

    /// Open a new log file with timestamp.
    /// The sequence suffix keeps names unique under rapid rotation.
    fn open_new_file(base_dir: &Path) -> io::Result<(PathBuf, File)> {
        static FILE_SEQ: AtomicU64 = AtomicU64::new(0);

        let now = Utc::now();
        let filename = format!(
            "checks_{}_{:02}_{:02}_{:02}{:02}{:02}_{:04}.{}",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
            FILE_SEQ.fetch_add(1, Ordering::Relaxed),
            LOG_EXT
        );
        let file_path = base_dir.join(&filename);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;

        log::info!("Opened event log: {:?}", file_path);
        Ok((file_path, file))
    }

    /// Most recent log file in the directory, if any
    fn find_latest_log_file(&self) -> io::Result<Option<PathBuf>> {
        let mut files = list_log_files(&self.base_dir)?;
        Ok(files.pop())
    }

    /// Ensure a writer is open, reusing the latest file when it has room
    fn ensure_open(&self, state: &mut Option<WriterState>) -> io::Result<()> {
        if state.is_some() {
            return Ok(());
        }

        let (path, file) = match self.find_latest_log_file()? {
            Some(path) => {
                let file = OpenOptions::new().append(true).open(&path)?;
                if file.metadata()?.len() < self.max_file_size {
                    (path, file)
                } else {
                    Self::open_new_file(&self.base_dir)?
                }
            }
            None => Self::open_new_file(&self.base_dir)?,
        };

        let size = file.metadata()?.len();
        *state = Some(WriterState {
            writer: BufWriter::new(file),
            current_file: path,
            current_size: size,
        });
        Ok(())
    }

    /// Rotate to a new file
    fn rotate(&self, state: &mut WriterState) -> io::Result<()> {
        state.writer.flush()?;

        let (new_path, new_file) = Self::open_new_file(&self.base_dir)?;
        log::info!("Rotated from {:?} to {:?}", state.current_file, new_path);

        state.writer = BufWriter::new(new_file);
        state.current_file = new_path;
        state.current_size = 0;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl EventStore for JsonlEventStore {
    fn append(&self, event: &ClassificationEvent) -> io::Result<()> {
        let mut guard = self.state.lock();
        self.ensure_open(&mut guard)?;
        let state = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "event log writer not open"))?;

        let line = event.to_jsonl();
        let bytes = line.as_bytes();

        if state.current_size + bytes.len() as u64 + 1 > self.max_file_size {
            self.rotate(state)?;
        }

        // One write + newline per event; flushed before the lock drops
        state.writer.write_all(bytes)?;
        state.writer.write_all(b"\n")?;
        state.current_size += bytes.len() as u64 + 1;

        state.writer.flush()?;
        Ok(())
    }

    fn scan_all(&self) -> io::Result<Vec<ClassificationEvent>> {
        let mut events = Vec::new();
        for path in list_log_files(&self.base_dir)? {
            read_events_into(&path, &mut events)?;
        }
        Ok(events)
    }
}

/// Read all events from one log file, skipping unparsable lines
fn read_events_into(path: &Path, events: &mut Vec<ClassificationEvent>) -> io::Result<()> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ClassificationEvent>(&line) {
            Ok(event) => events.push(event),
            Err(e) => log::warn!("Skipping bad event line in {:?}: {}", path, e),
        }
    }
    Ok(())
}

/// List all log files in a directory, sorted by name (which encodes time)
fn list_log_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |e| e == LOG_EXT) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-memory store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<ClassificationEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventStore for MemoryEventStore {
    fn append(&self, event: &ClassificationEvent) -> io::Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn scan_all(&self) -> io::Result<Vec<ClassificationEvent>> {
        Ok(self.events.lock().clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn sample(result: &str) -> ClassificationEvent {
        ClassificationEvent::text_check("some message", result, 0.75)
    }

    #[test]
    fn test_append_then_scan() {
        let dir = TempDir::new().unwrap();
        let store = JsonlEventStore::new(dir.path().to_path_buf()).unwrap();

        store.append(&sample("scam")).unwrap();
        store.append(&sample("safe")).unwrap();

        let events = store.scan_all().unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        let store = JsonlEventStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.scan_all().unwrap().is_empty());
    }

    #[test]
    fn test_each_scan_is_a_fresh_read() {
        let dir = TempDir::new().unwrap();
        let store = JsonlEventStore::new(dir.path().to_path_buf()).unwrap();

        store.append(&sample("scam")).unwrap();
        assert_eq!(store.scan_all().unwrap().len(), 1);

        store.append(&sample("safe")).unwrap();
        assert_eq!(store.scan_all().unwrap().len(), 2);
    }

    #[test]
    fn test_reopen_appends_to_existing_log() {
        let dir = TempDir::new().unwrap();

        {
            let store = JsonlEventStore::new(dir.path().to_path_buf()).unwrap();
            store.append(&sample("scam")).unwrap();
        }

        // New store instance over the same directory sees old events
        let store = JsonlEventStore::new(dir.path().to_path_buf()).unwrap();
        store.append(&sample("safe")).unwrap();
        assert_eq!(store.scan_all().unwrap().len(), 2);
    }

    #[test]
    fn test_rotation_keeps_all_events() {
        let dir = TempDir::new().unwrap();
        // Tiny cap forces a rotation almost every append
        let store = JsonlEventStore::with_max_file_size(dir.path().to_path_buf(), 256).unwrap();

        for _ in 0..10 {
            store.append(&sample("scam")).unwrap();
        }

        assert_eq!(store.scan_all().unwrap().len(), 10);
        assert!(list_log_files(dir.path()).unwrap().len() > 1);
    }

    #[test]
    fn test_scan_skips_bad_lines() {
        let dir = TempDir::new().unwrap();
        let store = JsonlEventStore::new(dir.path().to_path_buf()).unwrap();
        store.append(&sample("scam")).unwrap();

        // Corrupt the log with a junk line
        let file = list_log_files(dir.path()).unwrap().pop().unwrap();
        let mut f = OpenOptions::new().append(true).open(file).unwrap();
        writeln!(f, "not json at all").unwrap();

        store.append(&sample("safe")).unwrap();
        assert_eq!(store.scan_all().unwrap().len(), 2);
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonlEventStore::new(dir.path().to_path_buf()).unwrap());

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..25 {
                    store.append(&sample("scam")).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.scan_all().unwrap().len(), 100);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryEventStore::new();
        assert!(store.is_empty());

        store.append(&sample("scam")).unwrap();
        store.append(&sample("safe")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.scan_all().unwrap().len(), 2);
    }
}
