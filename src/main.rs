//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_health` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use site_health::initialization::init_logger_with;
use site_health::{AiAnalysis, AnalysisSource, Enricher, Opt, OutputFormat, Prober, ScanMetrics};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting GEMINI_API_KEY in .env without exporting it manually
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(&opt).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("site_health error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(opt: &Opt) -> Result<()> {
    let diagnostic_logs = match &opt.logs {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read diagnostic logs from {}", path.display()))?,
        None => String::new(),
    };

    let prober = Prober::new(&opt.probe_config()).context("Failed to initialize HTTP client")?;
    let metrics = prober.scan(&opt.url).await;

    let enricher = Enricher::new(&opt.enrich_config());
    let (analysis, source) = enricher.enrich_with_source(&metrics, &diagnostic_logs).await;

    match opt.output {
        OutputFormat::Json => {
            let report = json!({
                "metrics": metrics,
                "analysis": analysis,
                "source": source,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        }
        OutputFormat::Text => print_report(&metrics, &analysis, source),
    }
    Ok(())
}

fn print_report(metrics: &ScanMetrics, analysis: &AiAnalysis, source: AnalysisSource) {
    println!("{}", metrics.url);
    print!("  {}", metrics.outcome_label());
    match metrics.response_time_ms {
        Some(ms) => println!(" in {ms} ms"),
        None => println!(),
    }
    println!("  Health score: {}/100 ({} analysis)", analysis.health_score, source.as_str());
    println!();
    println!("SEO: {}", analysis.seo.summary);
    println!("Accessibility: {}", analysis.accessibility.summary);
    println!("Privacy ({}): {}", analysis.privacy.level, analysis.privacy.summary);
    if let Some(js_errors) = &analysis.js_errors {
        println!("Browser errors: {}", js_errors.summary);
    }
    println!();
    println!("Recommendations:");
    for (i, recommendation) in analysis.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, recommendation);
    }
}
