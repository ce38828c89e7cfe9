//! Generation of the JS index that re-exports every downloaded icon.

use std::path::Path;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::case::kebab_to_pascal;
use crate::error::{IconSyncError, Result};

/// How an icon module is imported by the generated index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFlavor {
    /// `from './sun.svg'`: the raw asset URL.
    #[default]
    Asset,
    /// `from './sun.svg?react'`: picked up by an SVG-to-component loader.
    Component,
}

impl ExportFlavor {
    fn query(self) -> &'static str {
        match self {
            ExportFlavor::Asset => "",
            ExportFlavor::Component => "?react",
        }
    }
}

/// `moon-icon.svg` -> `MoonIconSvg`
pub fn symbol_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".svg").unwrap_or(file_name);
    format!("{}Svg", kebab_to_pascal(stem))
}

pub fn export_statement(file_name: &str, flavor: ExportFlavor) -> String {
    format!(
        "export {{ default as {} }} from './{}{}';\n",
        symbol_name(file_name),
        file_name,
        flavor.query()
    )
}

/// Truncates `index_file` and appends one export line per file, in order.
///
/// Only the bare file name is referenced (`./sun.svg`), even for icons
/// written into a sub-directory of the export root; such imports do not
/// resolve from an index placed at the root and have to be fixed by hand.
pub async fn emit_exports<S: AsRef<str>>(
    file_names: &[S],
    index_file: &Path,
    flavor: ExportFlavor,
) -> Result<()> {
    let wrap = |source| IconSyncError::IndexWriteFailed {
        path: index_file.to_path_buf(),
        source,
    };

    if let Some(parent) = index_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(wrap)?;
    }
    fs::write(index_file, "").await.map_err(wrap)?;

    let mut file = OpenOptions::new()
        .append(true)
        .open(index_file)
        .await
        .map_err(wrap)?;
    for name in file_names {
        file.write_all(export_statement(name.as_ref(), flavor).as_bytes())
            .await
            .map_err(wrap)?;
    }
    file.flush().await.map_err(wrap)
}
