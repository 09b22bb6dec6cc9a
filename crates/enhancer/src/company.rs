//! Company query parameter injection

use serde_json::{json, Value};
use tracing::info;

use crate::document::OpenApiDocument;

/// Reference to the shared company parameter
pub const COMPANY_PARAMETER_REF: &str = "#/components/parameters/company";

/// Tenant-level endpoints that never take a company
pub const TENANT_LEVEL_PREFIXES: &[&str] = &[
    "/$batch",
    "/apicategoryroutes",
    "/companies",
    "/entitydefinitions",
    "/entityDefinitions",
    "/externalbusinesseventdefinitions",
    "/externaleventsubscriptions",
    "/subscriptions",
];

/// Register `components.parameters.company` and reference it from every
/// path item outside the tenant-level endpoints. Returns the number of path
/// items updated.
pub fn add_company_parameter(doc: &mut OpenApiDocument) -> usize {
    doc.component_section_mut("parameters").insert(
        "company".to_string(),
        json!({
            "in": "query",
            "name": "company",
            "description": "The company name to which the request is directed.",
            "required": true,
            "schema": {
                "type": "string",
                "maxLength": 100
            }
        }),
    );

    let mut updated = 0;
    for (path, item) in doc.paths_mut().iter_mut() {
        if is_tenant_level(path) {
            continue;
        }
        let Some(item) = item.as_object_mut() else {
            continue;
        };

        let parameters = item
            .entry("parameters".to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let Some(parameters) = parameters.as_array_mut() else {
            continue;
        };

        let already_present = parameters
            .iter()
            .any(|p| p.get("$ref").and_then(Value::as_str) == Some(COMPANY_PARAMETER_REF));
        if !already_present {
            parameters.push(json!({ "$ref": COMPANY_PARAMETER_REF }));
            updated += 1;
        }
    }

    info!(paths = updated, "added company parameter");
    updated
}

/// Whether a path addresses a tenant-level system endpoint
pub fn is_tenant_level(path: &str) -> bool {
    TENANT_LEVEL_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}
