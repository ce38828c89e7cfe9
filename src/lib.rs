//! Icon Sync library.
//!
//! Pulls an icon set out of a Figma file and turns it into SVG files plus a
//! generated index that re-exports each one under a PascalCase symbol.
//!
//! - [`figma_client`] - authenticated, timed Figma REST client
//! - [`fetcher`] - page/frame resolution and export URL lookup
//! - [`download`] - concurrent streaming downloads into the export directory
//! - [`svg`] - in-place SVG cleanup
//! - [`export`] - index file generation
//! - [`pipeline`] - the full run, wired together

pub mod case;
pub mod config;
pub mod dedupe;
pub mod download;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod figma_client;
pub mod output;
pub mod pipeline;
pub mod svg;
pub mod tree;
pub mod types;

pub use config::{Config, Timeouts};
pub use dedupe::{dedupe_by_key, dedupe_names, DUPLICATE_SUFFIX};
pub use download::{relative_file_path, Downloader};
pub use error::{ErrorCategory, ErrorPayload, IconSyncError, Result};
pub use export::{emit_exports, export_statement, symbol_name, ExportFlavor};
pub use fetcher::{fetch_icons, resolve_icons, IconLocation};
pub use figma_client::{FigmaApiClient, FigmaAuth, FigmaImageFormat, Timed};
pub use output::{ErrorOutput, SyncOutput, SyncSummary, OUTPUT_VERSION};
pub use pipeline::{run_sync, SyncReport};
pub use svg::{normalize_file, normalize_svg};
pub use tree::{find_child, resolve_path};
pub use types::{DownloadedIcon, FigmaNode, IconRecord};
