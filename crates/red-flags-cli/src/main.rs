//! red-flags: accounting stress signals for a listed company from SEC XBRL filings.
//!
//! Usage:
//!   red-flags AAPL
//!   red-flags TSLA --json
//!   red-flags F --no-llm
//!   red-flags --list

mod config;
mod report;

use analysis_core::AnalysisError;
use analysis_orchestrator::RedFlagOrchestrator;
use anyhow::{Context, Result};
use config::AppConfig;
use edgar_client::{available_tickers, resolve_cik, EdgarClient};
use narrative_client::{LlmNarrator, NarrativeService};

const USAGE: &str = "Usage: red-flags <TICKER> [--json] [--no-llm]\n       red-flags --list";

fn init_tracing() {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "red_flags_cli=info,analysis_orchestrator=info,edgar_client=warn".into()
        })
    };
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr so `--json` output stays parseable
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter())
            .init();
    }
}

fn build_narrator(config: &AppConfig, no_llm: bool) -> NarrativeService {
    if no_llm || !config.wants_llm() {
        return NarrativeService::rule_based();
    }
    match LlmNarrator::new(config.llm.clone()) {
        Ok(llm) => NarrativeService::with_primary(Box::new(llm)),
        Err(e) => {
            tracing::info!("Language model narrative disabled: {}", e);
            NarrativeService::rule_based()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|a| a == "--json");
    let no_llm = args.iter().any(|a| a == "--no-llm");

    if args.iter().any(|a| a == "--list") {
        let tickers: Vec<(&str, &str)> = available_tickers()
            .into_iter()
            .filter_map(|t| resolve_cik(t).map(|cik| (t, cik)))
            .collect();
        print!("{}", report::render_ticker_list(&tickers));
        return Ok(());
    }

    let Some(ticker) = args.iter().find(|a| !a.starts_with("--")) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let source = EdgarClient::new(config.edgar.clone())?;
    let orchestrator = RedFlagOrchestrator::new(source, build_narrator(&config, no_llm));

    let report = match orchestrator.report(ticker).await {
        Ok(report) => report,
        Err(AnalysisError::NotFound(t)) => {
            eprintln!("Ticker '{}' not found. Run `red-flags --list` for supported tickers.", t);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Analysis of {} failed: {}", ticker, e);
            return Err(e.into());
        }
    };

    if as_json {
        println!("{}", report::render_json(&report)?);
    } else {
        print!("{}", report::render_text(&report));
    }
    Ok(())
}
