//! In-place cleanup of exported SVG markup so icons inherit the text color
//! and scale with their container.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tokio::fs;

use crate::error::Result;

pub const CURRENT_COLOR: &str = "currentColor";

fn fill_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r##"fill="#[0-9a-fA-F]{6}""##).expect("valid fill regex"))
}

// A run of consecutive width/height attributes preceded by whitespace.
// Attributes glued to a previous token (`stroke-width="2"`) are left alone.
fn size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(^|\s)(?:(?:width|height)="[0-9]+")+"#).expect("valid size regex")
    })
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Rewrites solid hex fills to `currentColor`, drops integer `width` and
/// `height` attributes, trims, and collapses whitespace runs to one space.
///
/// Applying it twice gives the same result as applying it once.
pub fn normalize_svg(svg: &str) -> String {
    let filled = fill_re().replace_all(svg, format!(r#"fill="{CURRENT_COLOR}""#).as_str());
    let stripped = size_re().replace_all(&filled, "$1");
    whitespace_re()
        .replace_all(stripped.trim(), " ")
        .into_owned()
}

/// Normalizes an SVG file on disk.
pub async fn normalize_file(path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path).await?;
    fs::write(path, normalize_svg(&raw)).await?;
    Ok(())
}
