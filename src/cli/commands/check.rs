//! Check command implementation

use crate::cli::utils;
use crate::utils::short_digest;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("check")
        .about("Check that an enhanced document is up to date without writing anything")
        .args(utils::enhancement_args())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let input = utils::path_arg(matches, "input");
    let output = utils::path_arg(matches, "output");
    info!("Checking {:?} against {:?}", output, input);

    let mut config = utils::load_config(matches)?;
    utils::apply_overrides(&mut config, matches);

    let app = utils::create_app(config)?;
    let status = app.check(&input, &output)?.into_result()?;

    println!("Output is up to date!");
    println!("  Document: {:?}", status.output);
    println!("  SHA-256: {}", short_digest(&status.expected_sha256));

    Ok(())
}
