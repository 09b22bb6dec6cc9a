//! Navigation-property path pruning
//!
//! The upstream converter emits a path for every navigation property of
//! every entity, e.g. `/companies({id})/customers({id1})/paymentTerm`. Only
//! entity collections and single entities are kept.

use tracing::{debug, info};

use crate::document::OpenApiDocument;

/// Company-scoped path prefix
const COMPANY_SCOPE: &str = "/companies({id})/";

/// Tenant-level endpoints kept regardless of depth when addressed directly
/// or by key
const SYSTEM_ENDPOINTS: &[&str] = &[
    "/$batch",
    "/apicategoryroutes",
    "/entitydefinitions",
    "/entityDefinitions",
    "/externalbusinesseventdefinitions",
    "/externaleventsubscriptions",
    "/subscriptions",
];

/// Remove navigation paths; returns the removed path templates in order.
pub fn prune_navigation_paths(doc: &mut OpenApiDocument) -> Vec<String> {
    let paths = doc.paths_mut();
    let removed: Vec<String> = paths
        .keys()
        .filter(|path| is_navigation_path(path))
        .cloned()
        .collect();

    for path in &removed {
        debug!(path = %path, "removing navigation path");
        paths.remove(path);
    }

    info!(
        removed = removed.len(),
        remaining = paths.len(),
        "pruned navigation paths"
    );
    removed
}

/// Whether `path` traverses a navigation property.
pub fn is_navigation_path(path: &str) -> bool {
    if is_system_endpoint(path) {
        return false;
    }

    let segments: Vec<&str> = match path.strip_prefix(COMPANY_SCOPE) {
        Some(rest) => rest.split('/').filter(|s| !s.is_empty()).collect(),
        None if path.starts_with("/companies") => return false,
        None => path.trim_matches('/').split('/').collect(),
    };

    match segments.as_slice() {
        [] | [_] => false,
        [_, second] => !is_key_segment(second),
        _ => true,
    }
}

fn is_system_endpoint(path: &str) -> bool {
    if path == "/companies" || path == "/companies({id})" {
        return true;
    }
    SYSTEM_ENDPOINTS.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('('))
    })
}

fn is_key_segment(segment: &str) -> bool {
    segment.starts_with('(') && segment.ends_with(')')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MEMORY_SOURCE;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("/companies", false)]
    #[case("/companies({id})", false)]
    #[case("/companies({id})/customers", false)]
    #[case("/companies({id})/customers({id1})", false)]
    #[case("/companies({id})/customers({id1})/paymentTerm", true)]
    #[case("/companies({id})/customers/paymentTerm", true)]
    #[case("/companies({id})/customers/(key)", false)]
    #[case("/companies({id})/salesOrders({id1})/salesOrderLines({id2})/item", true)]
    #[case("/$batch", false)]
    #[case("/subscriptions({subscriptionId})", false)]
    #[case("/entityDefinitions", false)]
    #[case("/items", false)]
    #[case("/items({id})", false)]
    #[case("/items({id})/picture", true)]
    #[case("/items/(key)", false)]
    fn test_is_navigation_path(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_navigation_path(path), expected, "{path}");
    }

    #[test]
    fn test_prune_removes_only_navigation_paths() {
        let mut doc = OpenApiDocument::from_value(
            json!({
                "openapi": "3.1.0",
                "info": {"title": "Sales", "version": "1.0"},
                "paths": {
                    "/companies({id})/customers": {"get": {}},
                    "/companies({id})/customers({id1})": {"get": {}},
                    "/companies({id})/customers({id1})/paymentTerm": {"get": {}}
                }
            }),
            MEMORY_SOURCE,
        )
        .unwrap();

        let removed = prune_navigation_paths(&mut doc);
        assert_eq!(removed, vec!["/companies({id})/customers({id1})/paymentTerm"]);
        assert_eq!(doc.paths().unwrap().len(), 2);
    }
}
