//! OAuth2 security scheme injection

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::document::{OpenApiDocument, HTTP_METHODS};
use crate::error::{EnhanceError, EnhanceResult};
use crate::options::EnhanceOptions;

/// Scope granting read/write access to the Business Central API surface
pub const BC_DEFAULT_SCOPE: &str = "https://api.businesscentral.dynamics.com/.default";

/// Outcome of security scheme injection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityInjection {
    /// Name of the injected scheme
    pub scheme: String,

    /// Whether a compatible scheme of the same name was replaced
    pub replaced_existing: bool,

    /// Operations whose own `security` requirement was removed
    pub operation_overrides_removed: usize,
}

/// Token endpoint for the configured tenant placeholder
pub fn token_url(tenant_placeholder: &str) -> String {
    format!("https://login.microsoftonline.com/{tenant_placeholder}/oauth2/v2.0/token")
}

/// Build the client-credentials scheme definition
pub fn client_credentials_scheme(tenant_placeholder: &str) -> Value {
    json!({
        "type": "oauth2",
        "description": "OAuth2 client credentials flow for the Business Central API",
        "flows": {
            "clientCredentials": {
                "tokenUrl": token_url(tenant_placeholder),
                "scopes": {
                    BC_DEFAULT_SCOPE: "Read and write access to the Business Central API"
                }
            }
        }
    })
}

/// Register the OAuth2 scheme and require it globally.
///
/// A scheme of the same name with any other `type` is a conflict and is
/// left untouched.
pub fn inject_security(
    doc: &mut OpenApiDocument,
    options: &EnhanceOptions,
) -> EnhanceResult<SecurityInjection> {
    let scheme = options.security_scheme_name.clone();

    let existing = doc
        .component_section("securitySchemes")
        .and_then(|schemes| schemes.get(&scheme));
    let replaced_existing = match existing {
        None => false,
        Some(value) => match value.get("type").and_then(Value::as_str) {
            Some("oauth2") => true,
            found => {
                return Err(EnhanceError::SchemeConflict {
                    document: doc.source().to_string(),
                    scheme,
                    found_type: found.unwrap_or("<missing>").to_string(),
                })
            }
        },
    };

    doc.component_section_mut("securitySchemes").insert(
        scheme.clone(),
        client_credentials_scheme(&options.tenant_placeholder),
    );
    doc.root_mut()
        .insert("security".to_string(), json!([{ scheme.as_str(): [] }]));

    let operation_overrides_removed = strip_operation_security(doc);

    info!(
        scheme = %scheme,
        replaced_existing,
        operation_overrides_removed,
        "injected OAuth2 client credentials scheme"
    );

    Ok(SecurityInjection {
        scheme,
        replaced_existing,
        operation_overrides_removed,
    })
}

/// Remove per-operation `security` so the global requirement applies
/// everywhere.
fn strip_operation_security(doc: &mut OpenApiDocument) -> usize {
    let mut removed = 0;
    for (path, item) in doc.paths_mut().iter_mut() {
        for method in HTTP_METHODS {
            let Some(operation) = item.get_mut(*method).and_then(Value::as_object_mut) else {
                continue;
            };
            if operation.remove("security").is_some() {
                debug!(path = %path, method, "removed operation-level security");
                removed += 1;
            }
        }
    }
    removed
}
