mod cli;
mod formatting;

use std::path::Path;
use std::process::ExitCode;

use cli::Args;
use iconsync_lib::{run_sync, Config, IconSyncError, SyncOutput};
use tracing::{debug, error};

use crate::formatting::{render_error, write_output};

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` values feed clap's `env` fallbacks, so load them before parsing.
    let dotenv = dotenvy::dotenv();
    let args = cli::parse();
    init_tracing(&args);
    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "Loaded environment file");
    }

    let config = match resolve_config(&args) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, args.format, args.output.clone()),
    };

    match run_sync(&config).await {
        Ok(report) => {
            let body = SyncOutput::Sync(report.to_summary(&config));
            if let Err(err) = write_output(&body, args.format, args.output.as_deref()) {
                return render_error(
                    IconSyncError::Config(err.to_string()),
                    args.format,
                    args.output.clone(),
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            render_error(err, args.format, args.output.clone())
        }
    }
}

// Priority: RUST_LOG > --quiet > -v count > info.
fn init_tracing(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, IconSyncError> {
    match path {
        Some(p) => Config::from_toml_file(p).map_err(|e| {
            IconSyncError::Config(format!("Failed to read config {}: {}", p.display(), e))
        }),
        None => Ok(Config::default()),
    }
}

/// Layers flag/env values over the config file. Validation happens in the
/// pipeline.
fn resolve_config(args: &Args) -> Result<Config, IconSyncError> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(v) = &args.token {
        cfg.access_token = v.clone();
    }
    if let Some(v) = &args.file_id {
        cfg.file_id = v.clone();
    }
    if let Some(v) = &args.page {
        cfg.page = v.clone();
    }
    if let Some(v) = &args.frame {
        cfg.frame = Some(v.clone());
    }
    if let Some(v) = &args.export_path {
        cfg.export_path = v.clone();
    }
    if let Some(v) = &args.remove_from_name {
        cfg.remove_from_name = Some(v.clone());
    }
    if let Some(v) = &args.index_file {
        cfg.index_file = Some(v.clone());
    }
    if let Some(v) = &args.api_url {
        cfg.api_url = v.clone();
    }
    if args.raw {
        cfg.normalize = false;
    }
    Ok(cfg)
}
