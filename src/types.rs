//! Data types used throughout the icon sync library.
//!
//! - [`figma`] - Figma REST API payloads (document tree, image exports)
//! - [`icon`] - Icon records produced while resolving and downloading

pub mod figma;
pub mod icon;

pub use figma::{FigmaDocument, FigmaFileResponse, FigmaImageResponse, FigmaNode};
pub use icon::{DownloadedIcon, IconRecord};
