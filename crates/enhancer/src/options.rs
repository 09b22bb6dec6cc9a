//! Immutable options record consumed by the pipeline

use crate::error::{EnhanceError, EnhanceResult};

/// Default API version used in server URLs
pub const DEFAULT_API_VERSION: &str = "v1.0";

/// Default API publisher segment used in server URLs
pub const DEFAULT_API_PUBLISHER: &str = "linc";

/// Default tenant placeholder token
pub const DEFAULT_TENANT_PLACEHOLDER: &str = "{tenant_id}";

/// Default name of the injected OAuth2 security scheme
pub const DEFAULT_SECURITY_SCHEME: &str = "oauth2bc";

/// Literal value that marks an override as deliberately unset.
pub const UNSET_SENTINEL: &str = "unset";

/// Options for a single pipeline run.
///
/// Built once by the caller and never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceOptions {
    /// Override for `info.title`
    pub title: Option<String>,

    /// Override for `info.description`
    pub description: Option<String>,

    /// Override for `info.version`
    pub info_version: Option<String>,

    /// API name used in server URLs and generated documentation
    pub api_name: Option<String>,

    /// API version used in server URLs
    pub api_version: String,

    /// Publisher segment of the server URL path
    pub api_publisher: String,

    /// Token substituted by callers with their tenant id
    pub tenant_placeholder: String,

    /// Whether server URLs address a specific tenant
    pub tenant_aware: bool,

    /// Name of the OAuth2 security scheme
    pub security_scheme_name: String,

    /// Add the `company` query parameter to company-scoped paths
    pub company_parameter: bool,

    /// Remove navigation-property paths
    pub prune_navigation_paths: bool,

    /// Remove system audit fields from create/update schemas
    pub strip_audit_fields: bool,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            info_version: None,
            api_name: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_publisher: DEFAULT_API_PUBLISHER.to_string(),
            tenant_placeholder: DEFAULT_TENANT_PLACEHOLDER.to_string(),
            tenant_aware: true,
            security_scheme_name: DEFAULT_SECURITY_SCHEME.to_string(),
            company_parameter: true,
            prune_navigation_paths: true,
            strip_audit_fields: true,
        }
    }
}

impl EnhanceOptions {
    /// Validate the options
    pub fn validate(&self) -> EnhanceResult<()> {
        if self.api_version.trim().is_empty() {
            return Err(EnhanceError::InvalidConfig(
                "API version cannot be empty".to_string(),
            ));
        }

        if self.api_publisher.trim().is_empty() || self.api_publisher.contains('/') {
            return Err(EnhanceError::InvalidConfig(format!(
                "API publisher must be a single non-empty path segment: '{}'",
                self.api_publisher
            )));
        }

        if self.tenant_placeholder.trim().is_empty() {
            return Err(EnhanceError::InvalidConfig(
                "tenant placeholder cannot be empty".to_string(),
            ));
        }

        if self.security_scheme_name.trim().is_empty() {
            return Err(EnhanceError::InvalidConfig(
                "security scheme name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// API name if one was configured
    pub fn api_name(&self) -> Option<&str> {
        override_value(&self.api_name)
    }
}

/// Returns the override if it is set: present, not blank and not the
/// `unset` sentinel.
pub fn override_value(value: &Option<String>) -> Option<&str> {
    let value = value.as_deref()?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(UNSET_SENTINEL) {
        None
    } else {
        Some(value)
    }
}
