//! Deterministic document serialization and atomic writes

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::document::OpenApiDocument;
use crate::error::{EnhanceError, EnhanceResult};

const INDENT: &[u8] = b"    ";

/// Result of writing a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

/// Serialize a document to its canonical byte form.
///
/// Mapping keys are emitted in sorted order, indentation is four spaces and
/// the output ends with a newline, so equal documents always serialize to
/// identical bytes.
pub fn to_canonical_bytes(doc: &OpenApiDocument) -> Result<Vec<u8>, serde_json::Error> {
    let canonical = canonicalize(&Value::Object(doc.root().clone()));
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    canonical.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

/// Rebuild every mapping with its keys in sorted order, whatever map
/// representation `serde_json` was built with.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// SHA-256 digest of serialized content, hex encoded
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Write the document to `path`.
///
/// Content goes to a temporary file in the target directory, which is then
/// renamed over `path`; a failed write leaves any existing file untouched.
pub fn write_document(doc: &OpenApiDocument, path: &Path) -> EnhanceResult<WrittenDocument> {
    let write_error = |source: std::io::Error| EnhanceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let bytes = to_canonical_bytes(doc).map_err(|e| write_error(e.into()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(write_error)?;

    let mut temp = tempfile::NamedTempFile::new_in(&dir).map_err(write_error)?;
    temp.write_all(&bytes).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(path).map_err(|e| write_error(e.error))?;

    let written = WrittenDocument {
        path: path.to_path_buf(),
        bytes: bytes.len(),
        sha256: content_digest(&bytes),
    };
    info!(
        path = %written.path.display(),
        bytes = written.bytes,
        sha256 = %written.sha256,
        "wrote enhanced document"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MEMORY_SOURCE;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc() -> OpenApiDocument {
        OpenApiDocument::from_value(
            json!({
                "paths": {},
                "openapi": "3.1.0",
                "info": {"version": "1.0", "title": "Sales"}
            }),
            MEMORY_SOURCE,
        )
        .unwrap()
    }

    #[test]
    fn test_canonical_bytes_sort_keys_and_indent() {
        let text = String::from_utf8(to_canonical_bytes(&doc()).unwrap()).unwrap();
        assert_eq!(
            text,
            "{\n    \"info\": {\n        \"title\": \"Sales\",\n        \"version\": \"1.0\"\n    },\n    \"openapi\": \"3.1.0\",\n    \"paths\": {}\n}\n"
        );
    }

    #[test]
    fn test_non_ascii_is_written_verbatim() {
        let mut doc = doc();
        doc.info_mut().insert("title".to_string(), json!("Bestellübersicht"));
        let text = String::from_utf8(to_canonical_bytes(&doc).unwrap()).unwrap();
        assert!(text.contains("Bestellübersicht"));
    }

    #[test]
    fn test_write_creates_directories_and_reports_digest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("api.json");

        let written = write_document(&doc(), &path).unwrap();
        let on_disk = std::fs::read(&path).unwrap();
        assert_eq!(written.bytes, on_disk.len());
        assert_eq!(written.sha256, content_digest(&on_disk));

        // only the target file remains in the directory
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("api.json");
        let first = write_document(&doc(), &path).unwrap();
        let second = write_document(&doc(), &path).unwrap();
        assert_eq!(first.sha256, second.sha256);
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_document(&doc(), &blocker.join("api.json")).unwrap_err();
        assert_eq!(err.kind(), "WriteError");
    }
}
