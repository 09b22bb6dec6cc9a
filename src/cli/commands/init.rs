//! Init command implementation

use crate::Config;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".bc-openapi.yaml"),
        )
        .arg(
            clap::Arg::new("example")
                .short('e')
                .long("example")
                .help("Create example configuration")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing configuration file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("--output is required"))?;
    let example = matches.get_flag("example");

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "{:?} already exists; use --force to overwrite it",
            output_path
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    let config = if example {
        create_example_config()
    } else {
        Config::default()
    };

    config.save_to_file(&output_path)?;

    info!("Configuration file created: {:?}", output_path);

    if example {
        println!("Example configuration created for a custom Business Central API.");
        println!("Edit the API name, publisher and info overrides to match your extension.");
    } else {
        println!("Default configuration file created.");
        println!("Run 'bc-openapi enhance <INPUT> <OUTPUT>' to use it.");
    }

    Ok(())
}

pub(crate) fn create_example_config() -> Config {
    let mut config = Config::default();

    config.api.name = Some("sales".to_string());
    config.api.version = "v2.0".to_string();
    config.info.title = Some("Sales API".to_string());
    config.info.description = Some("unset".to_string());
    config.tenant.placeholder = "{tenant}".to_string();

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_is_valid() {
        let config = create_example_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.to_options().api_name(), Some("sales"));
    }
}
