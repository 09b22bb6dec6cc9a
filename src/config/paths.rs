//! Path tailoring switches

use serde::{Deserialize, Serialize};

/// Path tailoring configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Add the `company` query parameter to company-scoped paths
    pub company_parameter: bool,

    /// Drop navigation-property paths
    pub prune_navigation: bool,

    /// Remove system audit fields from create/update schemas
    pub strip_audit_fields: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            company_parameter: true,
            prune_navigation: true,
            strip_audit_fields: true,
        }
    }
}
