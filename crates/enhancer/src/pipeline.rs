//! The fixed sequence of enhancement stages

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::audit::{strip_audit_fields, AuditStrip};
use crate::company::add_company_parameter;
use crate::document::OpenApiDocument;
use crate::error::{EnhanceError, EnhanceResult};
use crate::info::{enhance_info, InfoChanges};
use crate::navigation::prune_navigation_paths;
use crate::normalize::{normalize_schemas, SchemaNormalization};
use crate::options::EnhanceOptions;
use crate::security::{inject_security, SecurityInjection};
use crate::servers::{inject_servers, ServerInjection};
use crate::writer::{to_canonical_bytes, write_document, WrittenDocument};

/// What each stage changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementReport {
    /// `info.title` after enhancement
    pub title: Option<String>,
    pub info: InfoChanges,
    pub servers: ServerInjection,
    pub security: SecurityInjection,
    /// `None` when the stage is disabled
    pub company_parameters_added: Option<usize>,
    pub navigation_paths_removed: Vec<String>,
    /// `None` when the stage is disabled
    pub audit_fields: Option<AuditStrip>,
    pub schemas: SchemaNormalization,
}

/// Outcome of a file-to-file run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: EnhancementReport,
    pub written: WrittenDocument,
    pub processing_time_ms: u64,
}

/// Enhancement pipeline bound to one set of options
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: EnhanceOptions,
}

impl Pipeline {
    /// Create a pipeline, validating the options up front
    pub fn new(options: EnhanceOptions) -> EnhanceResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Run every stage on `doc` in order.
    ///
    /// On error the document is left partially enhanced and must be
    /// discarded; nothing has been written.
    pub fn enhance(&self, doc: &mut OpenApiDocument) -> EnhanceResult<EnhancementReport> {
        let options = &self.options;

        let info = enhance_info(doc, options);
        let title = doc
            .info()
            .and_then(|info| info.get("title"))
            .and_then(|title| title.as_str())
            .map(str::to_string);
        let servers = inject_servers(doc, options)?;
        let security = inject_security(doc, options)?;

        let company_parameters_added = options
            .company_parameter
            .then(|| add_company_parameter(doc));
        let navigation_paths_removed = if options.prune_navigation_paths {
            prune_navigation_paths(doc)
        } else {
            Vec::new()
        };
        let audit_fields = options.strip_audit_fields.then(|| strip_audit_fields(doc));

        // must follow every stage that adds or removes references
        let schemas = normalize_schemas(doc)?;

        Ok(EnhancementReport {
            title,
            info,
            servers,
            security,
            company_parameters_added,
            navigation_paths_removed,
            audit_fields,
            schemas,
        })
    }

    /// Load `input`, enhance it and return the canonical output bytes
    /// without touching the filesystem.
    pub fn render(&self, input: &Path) -> EnhanceResult<(EnhancementReport, Vec<u8>)> {
        let mut doc = OpenApiDocument::from_path(input)?;
        let report = self.enhance(&mut doc)?;
        let bytes = to_canonical_bytes(&doc).map_err(|e| EnhanceError::MalformedDocument {
            document: doc.source().to_string(),
            reason: format!("cannot serialize enhanced document: {e}"),
        })?;
        Ok((report, bytes))
    }

    /// Load `input`, enhance it and write the result to `output`.
    pub fn run(&self, input: &Path, output: &Path) -> EnhanceResult<RunSummary> {
        let start_time = Instant::now();
        info!(input = %input.display(), output = %output.display(), "enhancing document");

        let mut doc = OpenApiDocument::from_path(input)?;
        let report = self.enhance(&mut doc)?;
        let written = write_document(&doc, output)?;

        Ok(RunSummary {
            report,
            written,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MEMORY_SOURCE;
    use serde_json::json;

    #[test]
    fn test_invalid_options_are_rejected_up_front() {
        let options = EnhanceOptions {
            api_version: String::new(),
            ..EnhanceOptions::default()
        };
        assert!(matches!(
            Pipeline::new(options),
            Err(EnhanceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_disabled_stages_report_none() {
        let pipeline = Pipeline::new(EnhanceOptions {
            company_parameter: false,
            prune_navigation_paths: false,
            strip_audit_fields: false,
            ..EnhanceOptions::default()
        })
        .unwrap();
        let mut doc = OpenApiDocument::from_value(
            json!({
                "openapi": "3.1.0",
                "info": {"title": "Sales", "version": "1.0"},
                "paths": {"/items({id})/picture": {"get": {}}}
            }),
            MEMORY_SOURCE,
        )
        .unwrap();

        let report = pipeline.enhance(&mut doc).unwrap();
        assert_eq!(report.company_parameters_added, None);
        assert_eq!(report.audit_fields, None);
        assert!(report.navigation_paths_removed.is_empty());
        assert!(doc.paths().unwrap().contains_key("/items({id})/picture"));
        assert!(doc.component_section("parameters").is_none());
    }
}
