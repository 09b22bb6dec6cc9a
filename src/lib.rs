//! Business Central OpenAPI tooling
//!
//! Application layer around the [`bc_openapi_enhancer`] pipeline: YAML
//! configuration, the `bc-openapi` command line and the companion HTML
//! viewer written next to each enhanced document.

pub mod cli;
pub mod config;
pub mod utils;
pub mod viewer;

pub use bc_openapi_enhancer as enhancer;
pub use config::Config;
pub use viewer::ViewerOutcome;

use anyhow::{Context, Result};
use bc_openapi_enhancer::{content_digest, Pipeline, RunSummary};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main application context
pub struct BcOpenApi {
    config: Config,
    pipeline: Pipeline,
}

impl BcOpenApi {
    /// Create a new instance, validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let pipeline = Pipeline::new(config.to_options())?;
        Ok(Self { config, pipeline })
    }

    /// Where the companion viewer for `output` goes, `None` when disabled
    pub fn viewer_path(&self, output: &Path) -> Option<PathBuf> {
        if !self.config.viewer.enabled {
            return None;
        }
        Some(
            self.config
                .viewer
                .path
                .clone()
                .unwrap_or_else(|| viewer::default_viewer_path(output)),
        )
    }

    /// Enhance `input` into `output`, then write the companion viewer if
    /// enabled and not already present.
    pub fn enhance(&self, input: &Path, output: &Path) -> Result<EnhanceOutcome> {
        let summary = self
            .pipeline
            .run(input, output)
            .with_context(|| format!("Failed to enhance {}", input.display()))?;

        info!(
            api_name = %summary.report.servers.api_name,
            schemas_removed = summary.report.schemas.removed.len(),
            paths_removed = summary.report.navigation_paths_removed.len(),
            processing_time_ms = summary.processing_time_ms,
            "enhancement completed"
        );

        let viewer = match self.viewer_path(output) {
            Some(path) => {
                let title = summary
                    .report
                    .title
                    .as_deref()
                    .unwrap_or(viewer::FALLBACK_TITLE);
                Some(viewer::write_viewer_if_absent(&path, output, title)?)
            }
            None => None,
        };

        Ok(EnhanceOutcome { summary, viewer })
    }

    /// Compare `output` against what [`BcOpenApi::enhance`] would write,
    /// without touching the filesystem.
    pub fn check(&self, input: &Path, output: &Path) -> Result<CheckStatus> {
        let (_, bytes) = self
            .pipeline
            .render(input)
            .with_context(|| format!("Failed to enhance {}", input.display()))?;
        let expected_sha256 = content_digest(&bytes);

        let actual_sha256 = if output.exists() {
            Some(utils::calculate_file_hash(output)?)
        } else {
            warn!(output = %output.display(), "output document does not exist");
            None
        };

        Ok(CheckStatus {
            output: output.to_path_buf(),
            expected_sha256,
            actual_sha256,
        })
    }
}

/// Result of [`BcOpenApi::enhance`]
#[derive(Debug, Clone)]
pub struct EnhanceOutcome {
    pub summary: RunSummary,
    /// `None` when the viewer is disabled
    pub viewer: Option<ViewerOutcome>,
}

/// Result of [`BcOpenApi::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckStatus {
    pub output: PathBuf,
    pub expected_sha256: String,
    /// `None` when the output does not exist
    pub actual_sha256: Option<String>,
}

impl CheckStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.actual_sha256.as_deref() == Some(self.expected_sha256.as_str())
    }

    /// Turn a stale status into an error
    pub fn into_result(self) -> std::result::Result<Self, BcOpenApiError> {
        match &self.actual_sha256 {
            None => Err(BcOpenApiError::MissingOutput {
                output: self.output,
            }),
            Some(actual) if *actual != self.expected_sha256 => Err(BcOpenApiError::OutOfDate {
                output: self.output.clone(),
                expected: self.expected_sha256.clone(),
                actual: actual.clone(),
            }),
            Some(_) => Ok(self),
        }
    }
}

/// Error types for bc-openapi
#[derive(thiserror::Error, Debug)]
pub enum BcOpenApiError {
    #[error("Output {output:?} does not exist; run 'bc-openapi enhance' first")]
    MissingOutput { output: PathBuf },

    #[error("Output {output:?} is out of date (expected sha256 {expected}, found {actual})")]
    OutOfDate {
        output: PathBuf,
        expected: String,
        actual: String,
    },
}
