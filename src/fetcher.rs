//! Resolving the configured page/frame to a list of icons with export URLs.

use tracing::{info, instrument};

use crate::dedupe::dedupe_names;
use crate::error::{IconSyncError, Result};
use crate::figma_client::{FigmaApiClient, FigmaImageFormat};
use crate::tree::{find_child, resolve_path};
use crate::types::{FigmaFileResponse, FigmaNode, IconRecord};

/// Where the icons live inside a Figma file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLocation {
    pub page: String,
    /// Frame path segments below the page; `None` takes the page's children.
    pub frame: Option<Vec<String>>,
}

/// Fetches the document, resolves the icon set and attaches export URLs.
#[instrument(level = "debug", skip(client, location), fields(page = %location.page))]
pub async fn fetch_icons(
    client: &FigmaApiClient,
    file_id: &str,
    location: &IconLocation,
) -> Result<Vec<IconRecord>> {
    info!("Fetching Figma file's data...");
    let file = client.get_file(file_id).await?;
    info!("Finished in {:.3}s", file.duration.as_secs_f64());

    let icons = resolve_icons(&file.value, location)?;
    fetch_image_urls(client, file_id, icons).await
}

/// Picks the icon nodes out of the document tree and dedupes their names.
pub fn resolve_icons(file: &FigmaFileResponse, location: &IconLocation) -> Result<Vec<IconRecord>> {
    let page = file
        .document
        .children
        .iter()
        .find(|c| c.name == location.page)
        .ok_or_else(|| IconSyncError::PageNotFound {
            page: location.page.clone(),
        })?;

    let container = match location.frame.as_deref() {
        None => page,
        Some(segments) => locate_frame(page, segments)?,
    };

    let icons = container
        .children
        .iter()
        .map(|node| IconRecord::new(node.id.clone(), node.name.clone()))
        .collect();

    Ok(dedupe_names(icons))
}

fn locate_frame<'a>(page: &'a FigmaNode, segments: &[String]) -> Result<&'a FigmaNode> {
    let Some((frame_name, parents)) = segments.split_last() else {
        return Ok(page);
    };
    let frame_root = resolve_path(page, parents);
    find_child(frame_root, frame_name).ok_or_else(|| IconSyncError::FrameNotFound {
        frame: frame_name.clone(),
    })
}

/// Requests export URLs for every icon in one batch and merges them by id.
///
/// Every returned record has an `image`; an id Figma could not render fails
/// the whole batch.
pub async fn fetch_image_urls(
    client: &FigmaApiClient,
    file_id: &str,
    mut icons: Vec<IconRecord>,
) -> Result<Vec<IconRecord>> {
    if icons.is_empty() {
        return Ok(icons);
    }

    info!("Fetching Figma file's icon urls...");
    let ids: Vec<String> = icons.iter().map(|icon| icon.id.clone()).collect();
    let response = client
        .get_image_urls(file_id, &ids, FigmaImageFormat::Svg)
        .await
        .map_err(|e| IconSyncError::image_urls(e.to_string()))?;
    info!("Finished in {:.3}s", response.duration.as_secs_f64());

    let images = response.value.images;
    if let Some(err) = response.value.err.filter(|e| !e.is_empty()) {
        return Err(IconSyncError::image_urls(err));
    }

    for icon in &mut icons {
        match images
            .get(&icon.id)
            .cloned()
            .flatten()
            .filter(|url| !url.is_empty())
        {
            Some(url) => icon.image = Some(url),
            None => {
                return Err(IconSyncError::image_urls(format!(
                    "no image url returned for {} ({})",
                    icon.name, icon.id
                )))
            }
        }
    }
    Ok(icons)
}
