//! Companion viewer configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Whether to write the HTML viewer next to the output
    pub enabled: bool,

    /// Viewer location; defaults to the output path with an `.html` extension
    pub path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}
