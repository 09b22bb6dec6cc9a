//! Schema normalization: drop every schema the paths cannot reach
//!
//! Reachability is a breadth-first walk over `$ref` edges. The walk is seeded
//! from every path item and from the component sections that path items
//! reference (`parameters`, `responses`, `requestBodies`, `headers`), then
//! follows references inside each reached schema. A schema is expanded once,
//! so reference cycles terminate. When several generated variants of one
//! entity are reachable they are all kept.

use std::collections::{BTreeSet, VecDeque};

use serde_json::Value;
use tracing::{debug, info};

use crate::document::OpenApiDocument;
use crate::error::{EnhanceError, EnhanceResult};
use crate::refs::{collect_schema_refs, schema_ref};

/// Component sections whose entries may reference schemas
const REFERENCING_SECTIONS: &[&str] = &["parameters", "responses", "requestBodies", "headers"];

/// Outcome of schema normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaNormalization {
    /// Schemas kept, sorted
    pub retained: Vec<String>,

    /// Schemas deleted, sorted
    pub removed: Vec<String>,
}

/// Compute the schemas reachable from the paths, sorted by name.
///
/// Fails with [`EnhanceError::DanglingReference`] on the first reachable
/// reference that names a schema absent from `components.schemas`.
pub fn reachable_schemas(doc: &OpenApiDocument) -> EnhanceResult<BTreeSet<String>> {
    let empty = serde_json::Map::new();
    let schemas = doc.component_section("schemas").unwrap_or(&empty);

    let mut queue: VecDeque<(String, String)> = VecDeque::new();
    if let Some(paths) = doc.paths() {
        for (path, item) in paths {
            enqueue_refs(item, &format!("path '{path}'"), &mut queue);
        }
    }
    for section in REFERENCING_SECTIONS {
        if let Some(entries) = doc.component_section(section) {
            for (name, entry) in entries {
                enqueue_refs(entry, &format!("#/components/{section}/{name}"), &mut queue);
            }
        }
    }

    let mut visited = BTreeSet::new();
    while let Some((name, referenced_from)) = queue.pop_front() {
        let Some(schema) = schemas.get(&name) else {
            return Err(EnhanceError::DanglingReference {
                document: doc.source().to_string(),
                reference: schema_ref(&name),
                referenced_from,
            });
        };
        if !visited.insert(name.clone()) {
            continue;
        }
        enqueue_refs(schema, &schema_ref(&name), &mut queue);
    }

    Ok(visited)
}

/// Delete every schema that is not reachable from the paths.
pub fn normalize_schemas(doc: &mut OpenApiDocument) -> EnhanceResult<SchemaNormalization> {
    let reachable = reachable_schemas(doc)?;

    let schemas = doc.component_section_mut("schemas");
    let removed: Vec<String> = schemas
        .keys()
        .filter(|name| !reachable.contains(*name))
        .cloned()
        .collect();
    for name in &removed {
        debug!(schema = %name, "removing unreferenced schema");
        schemas.remove(name);
    }

    let retained: Vec<String> = reachable.into_iter().collect();
    info!(
        retained = retained.len(),
        removed = removed.len(),
        "normalized schemas"
    );

    Ok(SchemaNormalization { retained, removed })
}

fn enqueue_refs(value: &Value, origin: &str, queue: &mut VecDeque<(String, String)>) {
    let mut refs = Vec::new();
    collect_schema_refs(value, &mut refs);
    queue.extend(refs.into_iter().map(|name| (name, origin.to_string())));
}
