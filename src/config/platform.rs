//! Tenant and authentication settings

use serde::{Deserialize, Serialize};

use bc_openapi_enhancer::options::{DEFAULT_SECURITY_SCHEME, DEFAULT_TENANT_PLACEHOLDER};

/// Tenant segment of the server and token URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantConfig {
    /// Whether server URLs carry a tenant segment
    pub aware: bool,

    /// Literal token callers substitute with their tenant id
    pub placeholder: String,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            aware: true,
            placeholder: DEFAULT_TENANT_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Name of the OAuth2 scheme under `components.securitySchemes`
    pub scheme_name: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            scheme_name: DEFAULT_SECURITY_SCHEME.to_string(),
        }
    }
}
