//! ScamGuard Core - Main Entry Point
//!
//! Thin CLI harness over the check pipeline: initialize logging, construct
//! the process-wide context (fail fast on missing model artifacts), run one
//! bounded unit of work, print the report.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use scamguard_core::constants;
use scamguard_core::logic::audit::JsonlEventStore;
use scamguard_core::logic::check::{CheckOutcome, CheckReport, ScamCheckContext};
use scamguard_core::logic::features::layout;
use scamguard_core::logic::model::{OnnxTextModel, OnnxUrlModel};
use scamguard_core::logic::ocr::TesseractExtractor;

#[derive(Parser)]
#[command(name = "scamguard", version, about = "Scam detection for messages, URLs, and screenshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a WhatsApp / SMS message
    CheckText { message: String },
    /// Check a website URL
    CheckUrl { url: String },
    /// Check a screenshot (OCR, then the text model)
    CheckScreenshot { image: PathBuf },
    /// Show aggregate impact stats from the event history
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} core v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let cli = Cli::parse();
    let ctx = build_context()?;

    match cli.command {
        Command::CheckText { message } => {
            let outcome = ctx.check_text(&message).context("message check failed")?;
            print_outcome(&outcome, "Please enter a message");
        }
        Command::CheckUrl { url } => {
            let outcome = ctx.check_url(&url).context("URL check failed")?;
            print_outcome(&outcome, "Please enter a URL");
        }
        Command::CheckScreenshot { image } => {
            let outcome = ctx
                .check_screenshot(&image)
                .context("screenshot check failed")?;
            print_outcome(&outcome, "Please provide an image");
        }
        Command::Stats => {
            let stats = ctx.impact_stats().context("could not read event log")?;
            println!("Total Checks:    {}", stats.total_checks);
            println!("Scams Detected:  {}", stats.scams_detected);
            println!("Text Checks:     {}", stats.text_checks);
            println!("URL Checks:      {}", stats.url_checks);
        }
    }

    Ok(())
}

/// Assemble the process-wide context. Model loading fails fast here; a
/// missing artifact is a startup error, never a degraded service.
fn build_context() -> anyhow::Result<ScamCheckContext> {
    let text_model =
        OnnxTextModel::load(&constants::text_model_path()).context("text model unavailable")?;
    let url_model =
        OnnxUrlModel::load(&constants::url_model_path()).context("URL model unavailable")?;

    log::debug!(
        "Models ready (text sha256: {}, url sha256: {}), feature schema v{} (hash: {:08x})",
        text_model.metadata().sha256,
        url_model.metadata().sha256,
        layout::FEATURE_VERSION,
        layout::layout_hash(),
    );

    let store = JsonlEventStore::new(constants::event_log_dir())
        .context("could not open event log directory")?;

    Ok(ScamCheckContext::new(
        Box::new(text_model),
        Box::new(url_model),
        Box::new(TesseractExtractor::new()),
        Box::new(store),
    ))
}

fn print_outcome(outcome: &CheckOutcome, empty_hint: &str) {
    match outcome {
        CheckOutcome::Classified(report) => print_report(report),
        CheckOutcome::EmptyInput => println!("{}", empty_hint),
        CheckOutcome::NoReadableContent => println!("No readable text found in the image"),
    }
}

fn print_report(report: &CheckReport) {
    if report.label.to_lowercase().contains("scam") || report.label.to_lowercase().contains("phishing")
    {
        println!("🚨 Scam Detected ({})", report.label);
    } else {
        println!("✅ Safe ({})", report.label);
    }

    if let Some(risk) = report.risk {
        println!("Risk Level: {}", risk.as_str().to_uppercase());
    }
    println!("Confidence: {}", report.confidence);

    if !report.audit_recorded {
        println!("Warning: result was not recorded in the audit log");
    }
}
