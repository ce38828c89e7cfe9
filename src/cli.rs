use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Export an icon set from a Figma file into SVG files and a JS index
#[derive(Parser, Debug)]
#[command(name = "iconsync", version, about, long_about = None)]
pub struct Args {
    /// TOML config file; flags and environment variables take precedence
    #[arg(long, env = "ICONSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Figma personal access token
    #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Figma file key
    #[arg(long, env = "FIGMA_FILE_ID")]
    pub file_id: Option<String>,

    /// Page holding the icons
    #[arg(long, env = "FIGMA_PAGE")]
    pub page: Option<String>,

    /// Frame path inside the page, e.g. `Icons/Regular` (`-1` for none)
    #[arg(long, env = "FIGMA_FRAME", allow_hyphen_values = true)]
    pub frame: Option<String>,

    /// Directory the SVG files are written to
    #[arg(long, env = "EXPORT_PATH")]
    pub export_path: Option<PathBuf>,

    /// Substring removed from every icon name before it becomes a path
    #[arg(long, env = "REMOVE_FROM_NAME")]
    pub remove_from_name: Option<String>,

    /// Generated index file (defaults to <export-path>/index.jsx)
    #[arg(long, env = "INDEX_FILE")]
    pub index_file: Option<PathBuf>,

    /// Figma API base URL
    #[arg(long, env = "FIGMA_API_URL")]
    pub api_url: Option<String>,

    /// Keep downloaded SVGs as-is and emit plain asset exports
    #[arg(long)]
    pub raw: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Write the summary to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

pub fn parse() -> Args {
    Args::parse()
}
