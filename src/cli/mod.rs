//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("bc-openapi")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Turn converter-generated OpenAPI documents into deployable Business Central API descriptions")
            .subcommand_negates_reqs(true)
            .subcommand(commands::enhance::command())
            .subcommand(commands::check::command())
            .subcommand(commands::init::command())
            .subcommand(commands::validate::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("enhance", sub_matches)) => commands::enhance::run(sub_matches).await,
            Some(("check", sub_matches)) => commands::check::run(sub_matches).await,
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::Result;
    use clap::{Arg, ArgAction, ArgMatches};
    use std::path::PathBuf;
    use tracing::debug;

    /// Configuration files looked up in the working directory
    pub const DEFAULT_CONFIG_PATHS: [&str; 3] =
        [".bc-openapi.yaml", ".bc-openapi.yml", "bc-openapi.yaml"];

    /// Get configuration file path from arguments or the first default
    /// file that exists
    pub fn get_config_path(matches: &ArgMatches) -> Option<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Some(PathBuf::from(config_path));
        }

        DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Load configuration from file, or defaults when there is none
    pub fn load_config(matches: &ArgMatches) -> Result<crate::Config> {
        match get_config_path(matches) {
            Some(config_path) => {
                debug!("Loading configuration from {:?}", config_path);
                crate::Config::from_file(&config_path)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(crate::Config::default())
            }
        }
    }

    /// Create the application context
    pub fn create_app(config: crate::Config) -> Result<crate::BcOpenApi> {
        crate::BcOpenApi::new(config)
    }

    /// `--config` argument shared by every command that reads configuration
    pub fn config_arg() -> Arg {
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// Input/output positionals plus the flags that override configuration
    /// values
    pub fn enhancement_args() -> Vec<Arg> {
        let value = |id: &'static str, help: &'static str, name: &'static str| {
            Arg::new(id).long(id).help(help).value_name(name)
        };
        let flag = |id: &'static str, help: &'static str| {
            Arg::new(id).long(id).help(help).action(ArgAction::SetTrue)
        };

        vec![
            Arg::new("input")
                .help("Baseline OpenAPI JSON document")
                .value_name("INPUT")
                .required(true),
            Arg::new("output")
                .help("Enhanced OpenAPI JSON document")
                .value_name("OUTPUT")
                .required(true),
            config_arg(),
            value("title", "Override info.title ('unset' keeps the upstream value)", "TEXT"),
            value(
                "description",
                "Override info.description ('unset' keeps the upstream value)",
                "TEXT",
            ),
            value("info-version", "Override info.version", "VERSION"),
            value("api-name", "API name used in server URLs", "NAME"),
            value("api-version", "API version used in server URLs", "VERSION"),
            value("api-publisher", "API publisher used in server URLs", "PUBLISHER"),
            value("tenant-placeholder", "Tenant placeholder token", "TOKEN"),
            value("security-scheme", "Name of the OAuth2 security scheme", "NAME"),
            flag("no-tenant", "Leave the tenant segment out of server URLs"),
            flag("no-company-parameter", "Don't add the company query parameter"),
            flag("keep-navigation-paths", "Don't prune navigation-property paths"),
            flag("keep-audit-fields", "Don't strip system audit fields"),
        ]
    }

    /// Apply the flags from [`enhancement_args`] on top of `config`
    pub fn apply_overrides(config: &mut crate::Config, matches: &ArgMatches) {
        let value = |id: &str| matches.get_one::<String>(id).cloned();

        if let Some(title) = value("title") {
            config.info.title = Some(title);
        }
        if let Some(description) = value("description") {
            config.info.description = Some(description);
        }
        if let Some(version) = value("info-version") {
            config.info.version = Some(version);
        }
        if let Some(name) = value("api-name") {
            config.api.name = Some(name);
        }
        if let Some(version) = value("api-version") {
            config.api.version = version;
        }
        if let Some(publisher) = value("api-publisher") {
            config.api.publisher = publisher;
        }
        if let Some(placeholder) = value("tenant-placeholder") {
            config.tenant.placeholder = placeholder;
        }
        if let Some(scheme) = value("security-scheme") {
            config.security.scheme_name = scheme;
        }

        if matches.get_flag("no-tenant") {
            config.tenant.aware = false;
        }
        if matches.get_flag("no-company-parameter") {
            config.paths.company_parameter = false;
        }
        if matches.get_flag("keep-navigation-paths") {
            config.paths.prune_navigation = false;
        }
        if matches.get_flag("keep-audit-fields") {
            config.paths.strip_audit_fields = false;
        }
    }

    /// Required path argument
    pub fn path_arg(matches: &ArgMatches, id: &str) -> PathBuf {
        matches
            .get_one::<String>(id)
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        CliApp::app()
            .try_get_matches_from(args.iter().copied())
            .unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        CliApp::app().debug_assert();
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let matches = parse(&[
            "bc-openapi",
            "enhance",
            "in.json",
            "out.json",
            "--api-name",
            "Sales",
            "--tenant-placeholder",
            "{tenant}",
            "--no-tenant",
            "--keep-audit-fields",
            "--no-viewer",
        ]);
        let (_, sub_matches) = matches.subcommand().unwrap();

        let mut config = crate::Config::default();
        utils::apply_overrides(&mut config, sub_matches);

        assert_eq!(config.api.name.as_deref(), Some("Sales"));
        assert_eq!(config.tenant.placeholder, "{tenant}");
        assert!(!config.tenant.aware);
        assert!(!config.paths.strip_audit_fields);
        assert!(config.paths.prune_navigation);
        assert_eq!(config.info.title, None);
    }

    #[test]
    fn test_enhance_requires_input_and_output() {
        assert!(CliApp::app()
            .try_get_matches_from(["bc-openapi", "enhance", "in.json"])
            .is_err());
        assert!(CliApp::app()
            .try_get_matches_from(["bc-openapi", "check", "in.json", "out.json"])
            .is_ok());
    }
}
