//! Server entry injection

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::document::OpenApiDocument;
use crate::error::{EnhanceError, EnhanceResult};
use crate::options::EnhanceOptions;

/// Business Central API host, including the endpoint version segment
pub const BC_API_BASE: &str = "https://api.businesscentral.dynamics.com/v2.0";

/// Name used when neither the options nor the title yield an API name
pub const FALLBACK_API_NAME: &str = "api";

/// Environments a server entry is generated for, in output order
const ENVIRONMENTS: &[(&str, &str)] = &[
    ("Sandbox", "Sandbox environment"),
    ("Production", "Production environment"),
];

/// Outcome of server injection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInjection {
    /// API name rendered into the URLs
    pub api_name: String,

    /// Whether the name was derived from `info.title`
    pub derived: bool,

    /// Number of upstream server entries that were discarded
    pub replaced: usize,
}

/// Replace `servers` with the sandbox and production entries.
pub fn inject_servers(
    doc: &mut OpenApiDocument,
    options: &EnhanceOptions,
) -> EnhanceResult<ServerInjection> {
    let (api_name, derived) = match options.api_name() {
        Some(name) => (name.to_lowercase(), false),
        None => {
            let title = doc
                .info()
                .and_then(|info| info.get("title"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let name = derive_api_name(title);
            if name.is_empty() {
                warn!(
                    title,
                    fallback = FALLBACK_API_NAME,
                    "info.title yields no API name, using fallback"
                );
                (FALLBACK_API_NAME.to_string(), true)
            } else {
                (name, true)
            }
        }
    };

    let servers = build_servers(&api_name, options)?;
    let replaced = doc
        .root()
        .get("servers")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    doc.root_mut()
        .insert("servers".to_string(), Value::Array(servers));

    info!(api_name = %api_name, derived, replaced, "injected sandbox and production servers");

    Ok(ServerInjection {
        api_name,
        derived,
        replaced,
    })
}

/// Derive an API name from a title: lowercase ASCII alphanumerics only.
///
/// `"My API v2!"` becomes `"myapiv2"`.
pub fn derive_api_name(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Build the server URL for one environment
pub fn server_url(environment: &str, api_name: &str, options: &EnhanceOptions) -> String {
    let mut url = String::from(BC_API_BASE);
    if options.tenant_aware {
        url.push('/');
        url.push_str(&options.tenant_placeholder);
    }
    url.push_str(&format!(
        "/{environment}/api/{}/{api_name}/{}",
        options.api_publisher, options.api_version
    ));
    url
}

fn build_servers(api_name: &str, options: &EnhanceOptions) -> EnhanceResult<Vec<Value>> {
    let expected = usize::from(options.tenant_aware);
    let variable = placeholder_variable(&options.tenant_placeholder);

    ENVIRONMENTS
        .iter()
        .map(|(environment, description)| {
            let url = server_url(environment, api_name, options);
            let found = url.matches(options.tenant_placeholder.as_str()).count();
            if found != expected {
                return Err(EnhanceError::InvalidConfig(format!(
                    "server URL '{url}' contains tenant placeholder '{}' {found} times, expected {expected}",
                    options.tenant_placeholder
                )));
            }

            let mut server = Map::new();
            server.insert("url".to_string(), Value::String(url));
            server.insert(
                "description".to_string(),
                Value::String(description.to_string()),
            );
            if let (true, Some(name)) = (options.tenant_aware, variable) {
                server.insert(
                    "variables".to_string(),
                    json!({
                        name: {
                            "default": name,
                            "description": "Entra tenant id of the Business Central customer"
                        }
                    }),
                );
            }
            Ok(Value::Object(server))
        })
        .collect()
}

/// Variable name when the placeholder is an OpenAPI server variable
/// (`{name}`); doubled braces and other tokens are left undeclared.
fn placeholder_variable(placeholder: &str) -> Option<&str> {
    let name = placeholder.strip_prefix('{')?.strip_suffix('}')?;
    let mut chars = name.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}
