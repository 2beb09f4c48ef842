//! Ads activity annotator - forwards ad account activity as analytics annotations.

use std::path::PathBuf;
use std::sync::Arc;

use ads_activity_client::ActivityClient;
use annotation_sink::AnnotationClient;
use annotator_config::{init_logging, Config};
use annotator_state::{FileStateStore, StateStore};
use annotator_sync::SyncOrchestrator;
use clap::{Parser, Subcommand};
use tracing::info;

/// Default state file path, relative to the working directory.
const DEFAULT_STATE_FILE: &str = "ads-annotator-state.json";

/// Ads activity annotator command-line interface.
#[derive(Debug, Parser)]
#[command(name = "ads-annotator")]
#[command(about = "Forwards ad account activity log events as analytics annotations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// State file holding the sync watermark. Defaults to
    /// ANNOTATOR_STATE_FILE or ./ads-annotator-state.json
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Incremental sync from the stored watermark
    Sync,
    /// Historical sync over an explicit lookback window; never moves the watermark
    Backfill {
        /// Number of days to look back (positive integer)
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Argument validation (including the --days range) happens here, before
    // any client is constructed or any network call is possible.
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(path) = cli.state_file {
        config.state_file = Some(path);
    }

    init_logging(&config.log_level);

    let lookback_days = match cli.command {
        Some(Commands::Backfill { days }) => Some(days),
        Some(Commands::Sync) | None => None,
    };

    let orchestrator = build_orchestrator(&config)?;

    match lookback_days {
        Some(days) => info!(days, "Starting historical sync"),
        None => info!("Starting incremental sync"),
    }

    // The run itself never fails; all diagnostics are log-only.
    orchestrator.run(lookback_days).await;

    Ok(())
}

/// Wire the orchestrator from config: HTTP clients plus the file state store.
fn build_orchestrator(config: &Config) -> anyhow::Result<SyncOrchestrator> {
    let api_key = config
        .posthog_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("POSTHOG_API_KEY is required"))?;
    let project_id = config
        .posthog_project_id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("POSTHOG_PROJECT_ID is required"))?;
    // Reject malformed hosts up front rather than at the first delivery.
    config.posthog_host_url()?;

    let fetcher = ActivityClient::new(&config.fb_api_base_url, &config.fb_api_version);
    let sink = AnnotationClient::new(&config.posthog_host, project_id, api_key);

    let state_path = config
        .state_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
    let state: Arc<dyn StateStore> = Arc::new(FileStateStore::new(state_path));

    Ok(SyncOrchestrator::new(
        config.clone(),
        Arc::new(fetcher),
        Arc::new(sink),
        state,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn no_subcommand_means_incremental_sync() {
        let cli = Cli::try_parse_from(["ads-annotator"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn backfill_defaults_to_seven_days() {
        let cli = Cli::try_parse_from(["ads-annotator", "backfill"]).unwrap();
        match cli.command {
            Some(Commands::Backfill { days }) => assert_eq!(days, 7),
            _ => panic!("expected backfill"),
        }
    }

    #[test]
    fn backfill_accepts_explicit_days() {
        let cli = Cli::try_parse_from(["ads-annotator", "backfill", "--days", "30"]).unwrap();
        match cli.command {
            Some(Commands::Backfill { days }) => assert_eq!(days, 30),
            _ => panic!("expected backfill"),
        }
    }

    #[test]
    fn cli_parse_results_are_debuggable() {
        let ok = Cli::try_parse_from(["ads-annotator", "sync"]);
        let _ = format!("{:?}", ok);
        let err = Cli::try_parse_from(["ads-annotator", "backfill", "--days", "0"]);
        let _ = format!("{:?}", err);
    }

    #[test]
    fn backfill_rejects_zero_days() {
        let err = Cli::try_parse_from(["ads-annotator", "backfill", "--days", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn backfill_rejects_non_numeric_days() {
        let err = Cli::try_parse_from(["ads-annotator", "backfill", "--days", "abc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn backfill_rejects_negative_days() {
        let err =
            Cli::try_parse_from(["ads-annotator", "backfill", "--days", "-3"]).unwrap_err();
        // Clap treats a bare -3 as an unknown flag; either way it never
        // reaches the orchestrator.
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn build_orchestrator_requires_destination_credentials() {
        let config = Config::default();
        let err = build_orchestrator(&config).unwrap_err();
        assert!(err.to_string().contains("POSTHOG_API_KEY"));
    }

    #[test]
    fn build_orchestrator_wires_with_full_config() {
        let mut config = Config::default();
        config.posthog_api_key = Some("phx_key".to_string());
        config.posthog_project_id = Some("1234".to_string());
        assert!(build_orchestrator(&config).is_ok());
    }

    #[test]
    fn build_orchestrator_rejects_malformed_host() {
        let mut config = Config::default();
        config.posthog_api_key = Some("phx_key".to_string());
        config.posthog_project_id = Some("1234".to_string());
        config.posthog_host = "not a url".to_string();
        assert!(build_orchestrator(&config).is_err());
    }
}
