//! Main configuration structure and implementation

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ApiConfig, InfoConfig, PathsConfig, SecurityConfig, TenantConfig, ViewerConfig};
use bc_openapi_enhancer::EnhanceOptions;

/// Supported configuration file version
pub const CONFIG_VERSION: &str = "1.0";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// API identity
    #[serde(default)]
    pub api: ApiConfig,

    /// `info` overrides
    #[serde(default)]
    pub info: InfoConfig,

    /// Tenant settings
    #[serde(default)]
    pub tenant: TenantConfig,

    /// Security scheme settings
    #[serde(default)]
    pub security: SecurityConfig,

    /// Path tailoring switches
    #[serde(default)]
    pub paths: PathsConfig,

    /// Companion viewer settings
    #[serde(default)]
    pub viewer: ViewerConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        self.to_options().validate()?;

        if let Some(path) = &self.viewer.path {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("viewer.path must not be empty"));
            }
        }

        Ok(())
    }

    /// Options record for the enhancement pipeline
    pub fn to_options(&self) -> EnhanceOptions {
        EnhanceOptions {
            title: self.info.title.clone(),
            description: self.info.description.clone(),
            info_version: self.info.version.clone(),
            api_name: self.api.name.clone(),
            api_version: self.api.version.clone(),
            api_publisher: self.api.publisher.clone(),
            tenant_placeholder: self.tenant.placeholder.clone(),
            tenant_aware: self.tenant.aware,
            security_scheme_name: self.security.scheme_name.clone(),
            company_parameter: self.paths.company_parameter,
            prune_navigation_paths: self.paths.prune_navigation,
            strip_audit_fields: self.paths.strip_audit_fields,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            api: ApiConfig::default(),
            info: InfoConfig::default(),
            tenant: TenantConfig::default(),
            security: SecurityConfig::default(),
            paths: PathsConfig::default(),
            viewer: ViewerConfig::default(),
        }
    }
}
