//! pdf-trim - Entry point
//!
//! Trims white margins from a PDF and writes the result next to it.

use clap::Parser;
use pdf_trim::pdf::bind_pdfium;
use pdf_trim::source::resolve_input;
use pdf_trim::{process_with, Cli, Error, TrimReport};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_trim=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(report) => {
            if !cli.quiet {
                print_summary(&report);
            }
            println!("Saved PDF to: {}", report.output.display());
            println!("✅ Done!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<Error>() {
                Some(e) if !e.is_processing() => println!("Error: {}", e),
                _ => println!("❌ Error: {}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<TrimReport> {
    let config = cli.to_config();

    // PDFium must be loadable before anything else happens
    let pdfium = bind_pdfium(config.pdfium_lib_dir())?;
    resolve_input(&config.input)?;

    println!("Processing: {}", config.input.display());
    let report = process_with(&pdfium, &config)?;
    Ok(report)
}

fn print_summary(report: &TrimReport) {
    println!("{:>6}  {:>11}    {:>11}", "Page", "Original", "Trimmed");
    for page in &report.pages {
        let (ow, oh) = page.original_size;
        let (tw, th) = page.trimmed_size;
        let note = if page.was_trimmed() { "" } else { "  (unchanged)" };
        println!(
            "{:>6}  {:>11}    {:>11}{}",
            page.index + 1,
            format!("{}x{}", ow, oh),
            format!("{}x{}", tw, th),
            note
        );
    }
    println!(
        "{} page(s), {} trimmed, {} DPI, {:.1} KB",
        report.page_count(),
        report.trimmed_count(),
        report.dpi,
        report.output_size as f64 / 1024.0
    );
}
