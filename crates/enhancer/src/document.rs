//! Baseline document loading and the in-memory document model

use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

use crate::error::{EnhanceError, EnhanceResult};

/// Source label used for documents that were not read from a file
pub const MEMORY_SOURCE: &str = "<memory>";

/// OpenAPI major versions the pipeline understands
const SUPPORTED_MAJOR_VERSIONS: &[&str] = &["3"];

/// HTTP methods that may appear as operations in a path item
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// A validated OpenAPI document.
///
/// Construction goes through [`OpenApiDocument::from_value`], which enforces
/// the minimal shape every pipeline stage relies on: `openapi` is a 3.x
/// version string, `info` and `paths` are mappings, every path item is a
/// mapping, and the optional `components`, `servers` and `security` sections
/// have the right container type.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    source: String,
    root: Map<String, Value>,
}

impl OpenApiDocument {
    /// Load a document from a JSON file
    pub fn from_path(path: &Path) -> EnhanceResult<Self> {
        let source = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| EnhanceError::Read {
            document: source.clone(),
            source: e,
        })?;
        Self::from_slice(&bytes, source)
    }

    /// Load a document from JSON bytes
    pub fn from_slice(bytes: &[u8], source: impl Into<String>) -> EnhanceResult<Self> {
        let source = source.into();
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| EnhanceError::MalformedDocument {
                document: source.clone(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::from_value(value, source)
    }

    /// Validate an already parsed JSON value
    pub fn from_value(value: Value, source: impl Into<String>) -> EnhanceResult<Self> {
        let source = source.into();
        let root = match value {
            Value::Object(root) => root,
            other => {
                return Err(EnhanceError::MalformedDocument {
                    document: source,
                    reason: format!("top-level value is {}, expected a mapping", kind(&other)),
                })
            }
        };

        check_version(&root, &source)?;
        check_shape(&root, &source)?;

        let path_count = root.get("paths").and_then(Value::as_object).map_or(0, Map::len);
        debug!(document = %source, paths = path_count, "loaded baseline document");

        Ok(Self { source, root })
    }

    /// Label of the document source, used in error messages
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The `openapi` version string
    pub fn openapi_version(&self) -> &str {
        self.root
            .get("openapi")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Root mapping of the document
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Mutable root mapping of the document
    pub fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    /// The `info` mapping
    pub fn info(&self) -> Option<&Map<String, Value>> {
        self.root.get("info").and_then(Value::as_object)
    }

    /// Mutable `info` mapping
    pub fn info_mut(&mut self) -> &mut Map<String, Value> {
        object_entry(&mut self.root, "info")
    }

    /// The `paths` mapping
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.root.get("paths").and_then(Value::as_object)
    }

    /// Mutable `paths` mapping
    pub fn paths_mut(&mut self) -> &mut Map<String, Value> {
        object_entry(&mut self.root, "paths")
    }

    /// A section of `components`, such as `schemas`
    pub fn component_section(&self, section: &str) -> Option<&Map<String, Value>> {
        self.root
            .get("components")
            .and_then(|c| c.get(section))
            .and_then(Value::as_object)
    }

    /// Mutable section of `components`, created when missing
    pub fn component_section_mut(&mut self, section: &str) -> &mut Map<String, Value> {
        let components = object_entry(&mut self.root, "components");
        object_entry(components, section)
    }
}

/// Fetch `key` from `map` as a mapping, inserting an empty one when absent.
pub(crate) fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> &'a mut Map<String, Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(map) => map,
        _ => unreachable!("entry was just replaced with a mapping"),
    }
}

fn check_version(root: &Map<String, Value>, source: &str) -> EnhanceResult<()> {
    let version = match root.get("openapi") {
        Some(Value::String(version)) => version,
        Some(other) => {
            return Err(EnhanceError::UnsupportedVersion {
                document: source.to_string(),
                found: format!("non-string {}", kind(other)),
            })
        }
        None => {
            return Err(EnhanceError::UnsupportedVersion {
                document: source.to_string(),
                found: "missing 'openapi' field".to_string(),
            })
        }
    };

    let major = version.trim().split('.').next().unwrap_or_default();
    if SUPPORTED_MAJOR_VERSIONS.contains(&major) {
        Ok(())
    } else {
        Err(EnhanceError::UnsupportedVersion {
            document: source.to_string(),
            found: version.clone(),
        })
    }
}

fn check_shape(root: &Map<String, Value>, source: &str) -> EnhanceResult<()> {
    let malformed = |reason: String| EnhanceError::MalformedDocument {
        document: source.to_string(),
        reason,
    };

    match root.get("info") {
        Some(Value::Object(_)) => {}
        Some(other) => return Err(malformed(format!("'info' is {}", kind(other)))),
        None => return Err(malformed("missing 'info' mapping".to_string())),
    }

    match root.get("paths") {
        Some(Value::Object(paths)) => {
            for (path, item) in paths {
                if !item.is_object() {
                    return Err(malformed(format!(
                        "path item '{path}' is {}, expected a mapping",
                        kind(item)
                    )));
                }
            }
        }
        Some(other) => return Err(malformed(format!("'paths' is {}", kind(other)))),
        None => return Err(malformed("missing 'paths' mapping".to_string())),
    }

    if let Some(components) = root.get("components") {
        let components = components
            .as_object()
            .ok_or_else(|| malformed(format!("'components' is {}", kind(components))))?;
        for section in ["schemas", "securitySchemes", "parameters"] {
            if let Some(value) = components.get(section) {
                if !value.is_object() {
                    return Err(malformed(format!(
                        "'components.{section}' is {}",
                        kind(value)
                    )));
                }
            }
        }
    }

    for key in ["servers", "security"] {
        if let Some(value) = root.get(key) {
            if !value.is_array() {
                return Err(malformed(format!("'{key}' is {}, expected a sequence", kind(value))));
            }
        }
    }

    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "openapi": "3.1.0",
            "info": {"title": "Sales", "version": "1.0"},
            "paths": {}
        })
    }

    #[test]
    fn test_load_minimal_document() {
        let doc = OpenApiDocument::from_value(minimal(), MEMORY_SOURCE).unwrap();
        assert_eq!(doc.openapi_version(), "3.1.0");
        assert_eq!(doc.source(), MEMORY_SOURCE);
        assert!(doc.paths().unwrap().is_empty());
    }

    #[test]
    fn test_non_mapping_is_malformed() {
        let err = OpenApiDocument::from_slice(b"[1, 2]", "list.json").unwrap_err();
        assert!(matches!(err, EnhanceError::MalformedDocument { .. }));
        assert!(err.to_string().contains("list.json"));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = OpenApiDocument::from_slice(b"{not json", MEMORY_SOURCE).unwrap_err();
        assert!(matches!(err, EnhanceError::MalformedDocument { .. }));
    }

    #[test]
    fn test_missing_version_is_unsupported() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("openapi");
        let err = OpenApiDocument::from_value(value, MEMORY_SOURCE).unwrap_err();
        assert!(matches!(err, EnhanceError::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_swagger_two_is_unsupported() {
        let mut value = minimal();
        value["openapi"] = json!("2.0");
        let err = OpenApiDocument::from_value(value, MEMORY_SOURCE).unwrap_err();
        match err {
            EnhanceError::UnsupportedVersion { found, .. } => assert_eq!(found, "2.0"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_version_checked_before_shape() {
        let err = OpenApiDocument::from_value(json!({"info": 1}), MEMORY_SOURCE).unwrap_err();
        assert!(matches!(err, EnhanceError::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_missing_paths_is_malformed() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("paths");
        let err = OpenApiDocument::from_value(value, MEMORY_SOURCE).unwrap_err();
        assert!(matches!(err, EnhanceError::MalformedDocument { .. }));
    }

    #[test]
    fn test_servers_must_be_sequence() {
        let mut value = minimal();
        value["servers"] = json!({"url": "https://example.com"});
        let err = OpenApiDocument::from_value(value, MEMORY_SOURCE).unwrap_err();
        assert!(matches!(err, EnhanceError::MalformedDocument { .. }));
    }

    #[test]
    fn test_component_section_created_on_demand() {
        let mut doc = OpenApiDocument::from_value(minimal(), MEMORY_SOURCE).unwrap();
        assert!(doc.component_section("schemas").is_none());
        doc.component_section_mut("schemas")
            .insert("Order".to_string(), json!({"type": "object"}));
        assert!(doc.component_section("schemas").unwrap().contains_key("Order"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = OpenApiDocument::from_path(Path::new("/nonexistent/api.json")).unwrap_err();
        assert!(matches!(err, EnhanceError::Read { .. }));
    }
}
