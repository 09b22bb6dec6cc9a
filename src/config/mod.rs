//! Configuration management for bc-openapi

pub mod api;
pub mod config;
pub mod paths;
pub mod platform;
pub mod viewer;


// Re-export main types for convenience
pub use api::{ApiConfig, InfoConfig};
pub use config::Config;
pub use paths::PathsConfig;
pub use platform::{SecurityConfig, TenantConfig};
pub use viewer::ViewerConfig;
