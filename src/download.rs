//! Streaming icon downloads into the export directory.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use futures::StreamExt;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use crate::case::snake_to_kebab;
use crate::config::Timeouts;
use crate::dedupe::dedupe_by_key;
use crate::error::{IconSyncError, Result};
use crate::types::{DownloadedIcon, IconRecord};

pub const SVG_EXTENSION: &str = "svg";

/// Splits `Icon/Regular/sun` into (`Some("Icon/Regular")`, `"sun"`).
///
/// Leading and trailing separators of the directory part are dropped, so
/// `/sun` has no sub-directory.
pub fn split_relative_name(name: &str) -> (Option<&str>, &str) {
    match name.rfind('/') {
        Some(idx) => {
            let sub = name[..idx].trim_matches('/');
            ((!sub.is_empty()).then_some(sub), &name[idx + 1..])
        }
        None => (None, name),
    }
}

/// File name written for an icon base name: `arrow_left` -> `arrow-left.svg`.
pub fn file_name_for(base: &str) -> String {
    format!("{}.{}", snake_to_kebab(base), SVG_EXTENSION)
}

/// Path below the export root an icon name is written to:
/// `Regular/arrow_left` -> `Regular/arrow-left.svg`.
pub fn relative_file_path(relative_name: &str) -> PathBuf {
    let (sub_dir, base) = split_relative_name(relative_name);
    let name = file_name_for(base);
    match sub_dir {
        Some(sub) => sub
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<PathBuf>()
            .join(name),
        None => PathBuf::from(name),
    }
}

#[derive(Debug, Clone)]
pub struct Downloader {
    http: reqwest::Client,
    export_root: PathBuf,
}

impl Downloader {
    pub fn new(export_root: impl Into<PathBuf>, timeouts: &Timeouts) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()?;
        Ok(Self {
            http,
            export_root: export_root.into(),
        })
    }

    pub fn export_root(&self) -> &Path {
        &self.export_root
    }

    /// Creates the export root if it does not exist yet.
    pub async fn ensure_export_root(&self) -> Result<()> {
        if fs::try_exists(&self.export_root).await.unwrap_or(false) {
            return Ok(());
        }
        info!("Directory {} does not exist", self.export_root.display());
        create_dir(&self.export_root).await?;
        info!("Created directory {}", self.export_root.display());
        Ok(())
    }

    /// Streams `url` to `<export_root>/<sub dir>/<kebab base>.svg`.
    ///
    /// Returns once every byte has been flushed to the file.
    #[instrument(level = "debug", skip(self, url))]
    pub async fn download(&self, url: &str, relative_name: &str) -> Result<DownloadedIcon> {
        let relative = relative_file_path(relative_name);
        let path = self.export_root.join(&relative);
        let name = file_name_for(split_relative_name(relative_name).1);

        if let Some(directory) = path.parent() {
            create_dir(directory).await?;
        }

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| IconSyncError::download(relative_name, e))?;

        let size = stream_to_file(response, &path)
            .await
            .map_err(|e| IconSyncError::download(relative_name, e))?;
        debug!(path = %path.display(), size, "Icon written");

        Ok(DownloadedIcon {
            name,
            relative_path: relative.to_string_lossy().into_owned(),
            size,
        })
    }

    /// Downloads every icon concurrently.
    ///
    /// Results are in input order. Icons whose names land on the same file
    /// are renamed first (see [`dedupe_by_key`]) so every icon gets its own
    /// file. The first failure cancels the downloads still in flight and is
    /// returned.
    pub async fn download_all<F>(
        &self,
        icons: &[IconRecord],
        relative_name: F,
    ) -> Result<Vec<DownloadedIcon>>
    where
        F: Fn(&IconRecord) -> String,
    {
        let names = dedupe_by_key(icons.iter().map(relative_name).collect(), |name| {
            relative_file_path(name).to_string_lossy().into_owned()
        });
        let tasks = icons.iter().zip(names).map(|(icon, name)| async move {
            let url = icon
                .image
                .as_deref()
                .filter(|u| !u.is_empty())
                .ok_or_else(|| IconSyncError::download(name.as_str(), "missing image url"))?;
            self.download(url, &name).await
        });
        try_join_all(tasks).await
    }
}

async fn create_dir(path: &Path) -> Result<()> {
    // `create_dir_all` succeeds when another task created the directory first.
    fs::create_dir_all(path)
        .await
        .map_err(|source| IconSyncError::DirectoryCreateFailed {
            path: path.to_path_buf(),
            source,
        })
}

#[derive(Debug, thiserror::Error)]
enum StreamError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("error writing file: {0}")]
    Io(#[from] std::io::Error),
}

async fn stream_to_file(
    response: reqwest::Response,
    path: &Path,
) -> std::result::Result<u64, StreamError> {
    let file = File::create(path).await?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;
    Ok(written)
}
