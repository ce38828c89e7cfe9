//! Thin client for the Figma REST API.
//!
//! Every request carries the personal access token in the `X-Figma-Token`
//! header and is timed; callers get the decoded body together with the
//! round-trip duration.

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Timeouts;
use crate::error::{IconSyncError, Result};
use crate::types::figma::FigmaApiErrorBody;
use crate::types::{FigmaFileResponse, FigmaImageResponse};

pub const FIGMA_TOKEN_HEADER: &str = "x-figma-token";

/// Personal access token used for every request.
#[derive(Clone)]
pub struct FigmaAuth {
    token: String,
}

impl FigmaAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(self.token.trim()).map_err(|_| {
            IconSyncError::Config("access token contains invalid header characters".to_string())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for FigmaAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigmaAuth").field("token", &"***").finish()
    }
}

/// Image export formats accepted by `GET /images/{file_key}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FigmaImageFormat {
    #[default]
    Svg,
    Png,
    Jpg,
    Pdf,
}

impl FigmaImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FigmaImageFormat::Svg => "svg",
            FigmaImageFormat::Png => "png",
            FigmaImageFormat::Jpg => "jpg",
            FigmaImageFormat::Pdf => "pdf",
        }
    }
}

/// A decoded response and how long the request took.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct FigmaApiClient {
    http: reqwest::Client,
    base: Url,
}

impl FigmaApiClient {
    pub fn new(auth: &FigmaAuth, api_url: &str, timeouts: &Timeouts) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(FIGMA_TOKEN_HEADER),
            auth.header_value()?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()?;

        // `Url::join` replaces the last segment unless the base ends with '/'.
        let base = if api_url.ends_with('/') {
            Url::parse(api_url)?
        } else {
            Url::parse(&format!("{api_url}/"))?
        };

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /files/{file_key}`: the full document tree.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_file(&self, file_key: &str) -> Result<Timed<FigmaFileResponse>> {
        self.get_json(&format!("files/{file_key}"), &[]).await
    }

    /// `GET /images/{file_key}?ids=..&format=..`: short-lived export URLs for
    /// every id, requested in a single batch.
    #[instrument(level = "debug", skip(self, ids), fields(count = ids.len()))]
    pub async fn get_image_urls(
        &self,
        file_key: &str,
        ids: &[String],
        format: FigmaImageFormat,
    ) -> Result<Timed<FigmaImageResponse>> {
        let joined = ids.join(",");
        self.get_json(
            &format!("images/{file_key}"),
            &[("ids", joined.as_str()), ("format", format.as_str())],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Timed<T>> {
        let url = self.base.join(path)?;
        debug!(%url, "Figma request");

        let started = Instant::now();
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let duration = started.elapsed();

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let value = serde_json::from_slice(&body)?;
        Ok(Timed { value, duration })
    }
}

fn api_error(status: reqwest::StatusCode, body: &[u8]) -> IconSyncError {
    let message = serde_json::from_slice::<FigmaApiErrorBody>(body)
        .ok()
        .and_then(|b| b.err)
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                text
            }
        });
    IconSyncError::figma_api(Some(status), message)
}
