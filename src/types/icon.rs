use serde::{Deserialize, Serialize};

/// An icon resolved from the document tree.
///
/// `image` is filled in after the export URL lookup, `size` after download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl IconRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            size: None,
        }
    }
}

/// A file written by the downloader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedIcon {
    /// Final file name (`sun.svg`), without any sub-directory
    pub name: String,
    /// Path relative to the export root (`Regular/sun.svg`)
    pub relative_path: String,
    /// Bytes written to disk
    pub size: u64,
}
