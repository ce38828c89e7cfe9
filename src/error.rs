use std::path::PathBuf;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum IconSyncError {
    #[error("Cannot find {page} page, check your settings")]
    PageNotFound { page: String },

    #[error("Cannot find {frame} frame in this page, check your settings")]
    FrameNotFound { frame: String },

    #[error("Cannot get icon urls: {message}")]
    ImageUrlFetchFailed { message: String },

    #[error("Failed to download {name}: {message}")]
    DownloadFailed { name: String, message: String },

    #[error("Cannot create directory {}: {source}", .path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write index file {}: {source}", .path.display())]
    IndexWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IconSyncError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        IconSyncError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn download(name: impl Into<String>, message: impl ToString) -> Self {
        IconSyncError::DownloadFailed {
            name: name.into(),
            message: message.to_string(),
        }
    }

    pub fn image_urls(message: impl Into<String>) -> Self {
        IconSyncError::ImageUrlFetchFailed {
            message: message.into(),
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            IconSyncError::PageNotFound { .. } => ErrorPayload::new(
                ErrorCategory::Document,
                self.to_string(),
                "Check FIGMA_PAGE matches a page name in the file exactly.",
            ),
            IconSyncError::FrameNotFound { .. } => ErrorPayload::new(
                ErrorCategory::Document,
                self.to_string(),
                "Check FIGMA_FRAME (use `/` between nested frame names, or -1 for none).",
            ),
            IconSyncError::ImageUrlFetchFailed { .. } => ErrorPayload::new(
                ErrorCategory::Figma,
                self.to_string(),
                "Retry after waiting; large icon sets can hit Figma render limits.",
            ),
            IconSyncError::DownloadFailed { .. } => ErrorPayload::new(
                ErrorCategory::Network,
                self.to_string(),
                "Something went wrong fetching the image, please try again.",
            ),
            IconSyncError::DirectoryCreateFailed { .. }
            | IconSyncError::IndexWriteFailed { .. } => ErrorPayload::new(
                ErrorCategory::Filesystem,
                self.to_string(),
                "Check EXPORT_PATH permissions.",
            ),
            IconSyncError::FigmaApi { status, message } => ErrorPayload::new(
                ErrorCategory::Figma,
                format!("Cannot get Figma file (status {:?}): {}", status, message),
                "Check FIGMA_ACCESS_TOKEN/FIGMA_FILE_ID and rate limits; retry after waiting.",
            ),
            IconSyncError::Io(e) => ErrorPayload::new(
                ErrorCategory::Filesystem,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            IconSyncError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            IconSyncError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify URL/format (e.g., https://api.figma.com/v1).",
            ),
            IconSyncError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Figma,
                e.to_string(),
                "The Figma response could not be decoded; run with -v for details.",
            ),
            IconSyncError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check flags, environment variables and the config file.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, IconSyncError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Document,
    Figma,
    Network,
    Filesystem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_not_found_maps_to_document_category() {
        let err = IconSyncError::PageNotFound {
            page: "Icons".into(),
        };
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Document);
        assert!(payload.message.contains("Icons"));
        assert!(payload.remediation.is_some());
    }

    #[test]
    fn figma_api_payload_includes_status_and_message() {
        let err = IconSyncError::figma_api(Some(StatusCode::FORBIDDEN), "Invalid token");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Figma);
        assert!(payload.message.contains("403"));
        assert!(payload.message.contains("Invalid token"));
    }
}
