//! Validate command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate configuration file")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating configuration file");

    let source = utils::get_config_path(matches);
    let config = utils::load_config(matches)?;
    let options = config.to_options();

    match &source {
        Some(path) => println!("Configuration file {path:?} is valid!"),
        None => println!("No configuration file found; defaults are valid!"),
    }
    println!("Version: {}", config.version);
    println!(
        "API: {} {} (publisher {})",
        options.api_name().unwrap_or("<derived from info.title>"),
        options.api_version,
        options.api_publisher
    );
    println!(
        "Tenant: {}",
        if options.tenant_aware {
            options.tenant_placeholder.as_str()
        } else {
            "<not tenant-aware>"
        }
    );
    println!("Security scheme: {}", options.security_scheme_name);
    println!("Path tailoring:");
    println!("  - company parameter: {}", options.company_parameter);
    println!("  - prune navigation paths: {}", options.prune_navigation_paths);
    println!("  - strip audit fields: {}", options.strip_audit_fields);
    println!(
        "Viewer: {}",
        if config.viewer.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(())
}
