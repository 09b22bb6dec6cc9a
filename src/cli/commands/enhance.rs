//! Enhance command implementation

use crate::cli::utils;
use crate::utils::{format_bytes, format_duration, short_digest};
use crate::ViewerOutcome;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub fn command() -> Command {
    Command::new("enhance")
        .about("Enhance a baseline OpenAPI document")
        .args(utils::enhancement_args())
        .arg(
            clap::Arg::new("no-viewer")
                .long("no-viewer")
                .help("Don't write the companion HTML viewer")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("viewer-path")
                .long("viewer-path")
                .help("Companion viewer location (defaults to OUTPUT with an .html extension)")
                .value_name("FILE"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let input = utils::path_arg(matches, "input");
    let output = utils::path_arg(matches, "output");
    info!("Enhancing {:?} into {:?}", input, output);

    let mut config = utils::load_config(matches)?;
    utils::apply_overrides(&mut config, matches);
    if matches.get_flag("no-viewer") {
        config.viewer.enabled = false;
    }
    if let Some(viewer_path) = matches.get_one::<String>("viewer-path") {
        config.viewer.path = Some(PathBuf::from(viewer_path));
    }

    let app = utils::create_app(config)?;
    let outcome = app.enhance(&input, &output)?;
    let summary = &outcome.summary;
    let report = &summary.report;

    println!("Enhancement completed successfully!");
    println!(
        "Output: {:?} ({}, sha256 {})",
        summary.written.path,
        format_bytes(summary.written.bytes as u64),
        short_digest(&summary.written.sha256)
    );
    println!(
        "API name: {}{}",
        report.servers.api_name,
        if report.servers.derived {
            " (derived from title)"
        } else {
            ""
        }
    );
    println!("Security scheme: {}", report.security.scheme);
    if let Some(added) = report.company_parameters_added {
        println!("Company parameter added to {added} paths");
    }
    if !report.navigation_paths_removed.is_empty() {
        println!(
            "Navigation paths removed: {}",
            report.navigation_paths_removed.len()
        );
    }
    if let Some(audit) = &report.audit_fields {
        println!(
            "Audit fields removed: {} from {} schemas",
            audit.fields_removed, audit.schemas_modified
        );
    }
    println!(
        "Schemas: {} retained, {} removed",
        report.schemas.retained.len(),
        report.schemas.removed.len()
    );
    println!(
        "Processing time: {}",
        format_duration(Duration::from_millis(summary.processing_time_ms))
    );

    match &outcome.viewer {
        Some(ViewerOutcome::Created(path)) => println!("Viewer written: {path:?}"),
        Some(ViewerOutcome::Skipped(path)) => println!("Viewer kept: {path:?} (already exists)"),
        None => {}
    }

    Ok(())
}
