//! API identity and documentation metadata

use serde::{Deserialize, Serialize};

use bc_openapi_enhancer::options::{DEFAULT_API_PUBLISHER, DEFAULT_API_VERSION};

/// API identity used in server URLs and generated metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API name; derived from `info.title` when unset
    pub name: Option<String>,

    /// API version segment of the server URL
    pub version: String,

    /// API publisher segment of the server URL
    pub publisher: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            name: None,
            version: DEFAULT_API_VERSION.to_string(),
            publisher: DEFAULT_API_PUBLISHER.to_string(),
        }
    }
}

/// Overrides for the document's `info` block.
///
/// A value that is missing, blank or the literal `unset` keeps whatever the
/// converter produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
}
