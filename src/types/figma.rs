//! Figma REST API payloads.
//!
//! Only the fields the icon pipeline reads are modelled; everything else in
//! the (large) file response is ignored during deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response of `GET /files/{file_key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFileResponse {
    /// File name as shown in Figma
    #[serde(default)]
    pub name: Option<String>,
    pub document: FigmaDocument,
}

/// Root of the document tree. Its children are the file's pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FigmaDocument {
    #[serde(default)]
    pub children: Vec<FigmaNode>,
}

/// A single node of the document tree (page, frame, group, icon, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigmaNode {
    pub id: String,
    pub name: String,
    /// Figma node type (CANVAS, FRAME, COMPONENT, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FigmaNode>,
}

impl FigmaNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<FigmaNode>) -> Self {
        self.children = children;
        self
    }
}

/// Response of `GET /images/{file_key}`.
///
/// Figma maps an id to `null` when the node could not be rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FigmaImageResponse {
    #[serde(default)]
    pub err: Option<String>,
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

/// Error body returned by the Figma API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct FigmaApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default, alias = "message")]
    pub err: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_response_ignores_unknown_fields() {
        let raw = r#"{
            "name": "Design System",
            "version": "123",
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [
                    {"id": "0:1", "name": "Icons", "type": "CANVAS", "backgroundColor": {},
                     "children": [{"id": "1:2", "name": "sun", "type": "COMPONENT"}]}
                ]
            }
        }"#;
        let file: FigmaFileResponse = serde_json::from_str(raw).expect("parse file");
        assert_eq!(file.document.children.len(), 1);
        let page = &file.document.children[0];
        assert_eq!(page.name, "Icons");
        assert_eq!(page.node_type.as_deref(), Some("CANVAS"));
        assert_eq!(page.children[0].id, "1:2");
        assert!(page.children[0].children.is_empty());
    }

    #[test]
    fn image_response_keeps_null_urls() {
        let raw = r#"{"err": null, "images": {"1:2": "https://s3/sun.svg", "1:3": null}}"#;
        let res: FigmaImageResponse = serde_json::from_str(raw).expect("parse images");
        assert_eq!(
            res.images.get("1:2").cloned().flatten().as_deref(),
            Some("https://s3/sun.svg")
        );
        assert_eq!(res.images.get("1:3"), Some(&None));
    }
}
