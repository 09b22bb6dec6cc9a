//! Info section enhancement

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::document::OpenApiDocument;
use crate::options::{override_value, EnhanceOptions};

const GETTING_STARTED_TEMPLATE: &str = include_str!("getting_started.md");

/// Which info fields were rewritten
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoChanges {
    pub title: FieldChange,
    pub description: FieldChange,
    pub version: FieldChange,
}

/// How a single info field was treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldChange {
    /// Upstream value kept
    #[default]
    Preserved,
    /// Replaced by a configured override
    Overridden,
    /// Upstream value was missing and a default was generated
    Defaulted,
}

/// Apply title, description and version overrides to `info`.
///
/// Overrides only win when they are set; otherwise the upstream value stays.
/// Missing upstream values get a generated default when an API name is
/// known.
pub fn enhance_info(doc: &mut OpenApiDocument, options: &EnhanceOptions) -> InfoChanges {
    let api_name = options.api_name().map(str::to_string);
    let info = doc.info_mut();

    let title = apply_field(
        info,
        "title",
        override_value(&options.title),
        api_name.as_deref().map(default_title),
    );
    let description = apply_field(
        info,
        "description",
        override_value(&options.description),
        api_name.as_deref().map(default_description),
    );
    let version = apply_field(
        info,
        "version",
        override_value(&options.info_version),
        Some(options.api_version.clone()),
    );

    let changes = InfoChanges {
        title,
        description,
        version,
    };
    info!(
        title = ?changes.title,
        description = ?changes.description,
        version = ?changes.version,
        "enhanced info section"
    );
    changes
}

fn apply_field(
    info: &mut Map<String, Value>,
    field: &str,
    overridden: Option<&str>,
    default: Option<String>,
) -> FieldChange {
    if let Some(value) = overridden {
        info.insert(field.to_string(), Value::String(value.to_string()));
        return FieldChange::Overridden;
    }

    let upstream_blank = match info.get(field) {
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
        None => true,
    };

    match default {
        Some(default) if upstream_blank => {
            debug!(field, "info field missing upstream, generating default");
            info.insert(field.to_string(), Value::String(default));
            FieldChange::Defaulted
        }
        _ => FieldChange::Preserved,
    }
}

/// Default `info.title` for an API name
pub fn default_title(api_name: &str) -> String {
    format!("{api_name} API")
}

/// Default `info.description` for an API name
pub fn default_description(api_name: &str) -> String {
    GETTING_STARTED_TEMPLATE
        .trim_end()
        .replace("{api_name}", api_name)
}
