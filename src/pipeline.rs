//! One sync run: resolve icons, download them, clean them up, write the index.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::config::Config;
use crate::download::Downloader;
use crate::error::Result;
use crate::export::{emit_exports, ExportFlavor};
use crate::fetcher::{fetch_icons, IconLocation};
use crate::figma_client::{FigmaApiClient, FigmaAuth};
use crate::output::{SyncSummary, OUTPUT_VERSION};
use crate::svg::normalize_file;
use crate::types::{DownloadedIcon, IconRecord};

#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Resolved icons with `image` and `size` filled in
    pub records: Vec<IconRecord>,
    /// Files written, in the same order as `records`
    pub files: Vec<DownloadedIcon>,
    pub index_file: PathBuf,
    pub normalized: bool,
}

impl SyncReport {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn to_summary(&self, config: &Config) -> SyncSummary {
        SyncSummary {
            version: OUTPUT_VERSION.to_string(),
            file_id: config.file_id.clone(),
            page: config.page.clone(),
            frame: config.frame_segments().map(|s| s.join("/")),
            index_file: self.index_file.clone(),
            normalized: self.normalized,
            count: self.files.len(),
            total_bytes: self.total_bytes(),
            icons: self.files.clone(),
        }
    }
}

/// Runs the whole pipeline. Any error aborts the run before the index file
/// is written.
#[instrument(level = "debug", skip(config), fields(file_id = %config.file_id))]
pub async fn run_sync(config: &Config) -> Result<SyncReport> {
    config.validate()?;

    let client = FigmaApiClient::new(
        &FigmaAuth::new(config.access_token.as_str()),
        &config.api_url,
        &config.timeouts,
    )?;
    let location = IconLocation {
        page: config.page.clone(),
        frame: config.frame_segments(),
    };
    let mut records = fetch_icons(&client, &config.file_id, &location).await?;
    info!(count = records.len(), "Resolved icons");

    let downloader = Downloader::new(&config.export_path, &config.timeouts)?;
    downloader.ensure_export_root().await?;
    let files = downloader
        .download_all(&records, |icon| config.clean_name(&icon.name))
        .await?;
    for (record, file) in records.iter_mut().zip(&files) {
        record.size = Some(file.size);
    }

    let flavor = if config.normalize {
        for file in &files {
            normalize_file(&downloader.export_root().join(&file.relative_path)).await?;
        }
        ExportFlavor::Component
    } else {
        ExportFlavor::Asset
    };

    let index_file = config.index_path();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    emit_exports(&names, &index_file, flavor).await?;

    info!("Finished exporting {} icons", files.len());
    Ok(SyncReport {
        records,
        files,
        index_file,
        normalized: config.normalize,
    })
}
