//! `$ref` discovery helpers

use serde_json::Value;

/// Prefix of local references into the schemas section
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Collect the names of all schemas referenced anywhere inside `value`, in
/// document order.
pub fn collect_schema_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match (key.as_str(), child) {
                    ("$ref", Value::String(reference)) => {
                        if let Some(name) = schema_ref_name(reference) {
                            out.push(name);
                        }
                    }
                    _ => collect_schema_refs(child, out),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_schema_refs(item, out);
            }
        }
        _ => {}
    }
}

/// Schema name addressed by a local reference, or `None` for references
/// outside `#/components/schemas/`.
///
/// Pointers into a sub-schema resolve to the top-level schema, and JSON
/// pointer escapes are decoded.
pub fn schema_ref_name(reference: &str) -> Option<String> {
    let rest = reference.strip_prefix(SCHEMA_REF_PREFIX)?;
    let token = rest.split('/').next().unwrap_or_default();
    if token.is_empty() {
        return None;
    }
    Some(token.replace("~1", "/").replace("~0", "~"))
}

/// Local reference to a schema name, with JSON pointer escapes applied
pub fn schema_ref(name: &str) -> String {
    format!(
        "{SCHEMA_REF_PREFIX}{}",
        name.replace('~', "~0").replace('/', "~1")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_ref_name() {
        assert_eq!(
            schema_ref_name("#/components/schemas/Microsoft.NAV.customer"),
            Some("Microsoft.NAV.customer".to_string())
        );
        assert_eq!(
            schema_ref_name("#/components/schemas/Order/properties/lines"),
            Some("Order".to_string())
        );
        assert_eq!(
            schema_ref_name("#/components/schemas/a~1b~0c"),
            Some("a/b~c".to_string())
        );
        assert_eq!(schema_ref_name("#/components/parameters/company"), None);
        assert_eq!(schema_ref_name("other.json#/Order"), None);
        assert_eq!(schema_ref_name("#/components/schemas/"), None);
    }

    #[test]
    fn test_schema_ref_escapes() {
        assert_eq!(schema_ref("a/b~c"), "#/components/schemas/a~1b~0c");
        assert_eq!(schema_ref_name(&schema_ref("a/b~c")).unwrap(), "a/b~c");
    }

    #[test]
    fn test_collect_nested_refs() {
        let value = json!({
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/A"}}}},
            "responses": {
                "200": {"content": {"application/json": {"schema": {
                    "type": "array",
                    "items": {"anyOf": [{"$ref": "#/components/schemas/B"}, {"$ref": "#/components/parameters/p"}]}
                }}}}
            }
        });
        let mut refs = Vec::new();
        collect_schema_refs(&value, &mut refs);
        refs.sort();
        assert_eq!(refs, vec!["A", "B"]);
    }
}
