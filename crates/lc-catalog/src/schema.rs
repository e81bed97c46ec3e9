//! Catalog document schema.

use lc_core::Preset;
use serde::{Deserialize, Serialize};

/// Newest document version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

fn latest_version() -> u32 {
    LATEST_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogFile {
    #[serde(default = "latest_version")]
    pub version: u32,
    #[serde(default)]
    pub presets: Vec<Preset>,
}
