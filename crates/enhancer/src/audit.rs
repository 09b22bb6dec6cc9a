//! System audit field stripping for create/update schemas

use serde_json::Value;
use tracing::info;

use crate::document::OpenApiDocument;

/// Server-maintained fields clients cannot set
pub const SYSTEM_AUDIT_FIELDS: &[&str] = &[
    "systemCreatedAt",
    "systemCreatedBy",
    "systemModifiedAt",
    "systemModifiedBy",
];

/// Schema name suffixes of request-body variants
pub const MUTATION_SUFFIXES: &[&str] = &["-create", "-update"];

/// Counts of what was stripped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditStrip {
    pub schemas_modified: usize,
    pub fields_removed: usize,
}

/// Remove the system audit fields from every `-create`/`-update` schema.
pub fn strip_audit_fields(doc: &mut OpenApiDocument) -> AuditStrip {
    let mut result = AuditStrip::default();

    for (name, schema) in doc.component_section_mut("schemas").iter_mut() {
        if !is_mutation_schema(name) {
            continue;
        }

        let mut removed = 0;
        if let Some(properties) = schema.get_mut("properties").and_then(Value::as_object_mut) {
            for field in SYSTEM_AUDIT_FIELDS {
                if properties.remove(*field).is_some() {
                    removed += 1;
                }
            }
        }
        if let Some(required) = schema.get_mut("required").and_then(Value::as_array_mut) {
            required.retain(|r| !r.as_str().is_some_and(|r| SYSTEM_AUDIT_FIELDS.contains(&r)));
        }

        if removed > 0 {
            result.schemas_modified += 1;
            result.fields_removed += removed;
        }
    }

    info!(
        schemas = result.schemas_modified,
        fields = result.fields_removed,
        "stripped system audit fields from mutation schemas"
    );
    result
}

/// Whether a schema is a create or update request body variant
pub fn is_mutation_schema(name: &str) -> bool {
    MUTATION_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MEMORY_SOURCE;
    use serde_json::json;

    #[test]
    fn test_strips_fields_from_mutation_schemas_only() {
        let audit = json!({
            "type": "object",
            "properties": {
                "number": {"type": "string"},
                "systemCreatedAt": {"type": "string"},
                "systemModifiedBy": {"type": "string"}
            },
            "required": ["number", "systemCreatedAt"]
        });
        let mut doc = OpenApiDocument::from_value(
            json!({
                "openapi": "3.1.0",
                "info": {"title": "Sales", "version": "1.0"},
                "paths": {},
                "components": {
                    "schemas": {
                        "Microsoft.NAV.customer": audit.clone(),
                        "Microsoft.NAV.customer-create": audit.clone(),
                        "Microsoft.NAV.customer-update": audit
                    }
                }
            }),
            MEMORY_SOURCE,
        )
        .unwrap();

        let result = strip_audit_fields(&mut doc);
        assert_eq!(
            result,
            AuditStrip {
                schemas_modified: 2,
                fields_removed: 4
            }
        );

        let schemas = doc.component_section("schemas").unwrap();
        let create = &schemas["Microsoft.NAV.customer-create"];
        assert!(create["properties"].get("systemCreatedAt").is_none());
        assert_eq!(create["required"], json!(["number"]));
        assert!(schemas["Microsoft.NAV.customer"]["properties"]
            .get("systemCreatedAt")
            .is_some());
    }
}
