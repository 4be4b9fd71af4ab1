//! Module-registry merger.

use serde_json::{Map, Value};

use feo_overlay::FrontendObject;

use crate::error::MergeError;

/// Insert the tenant's module descriptor into the registry.
///
/// The registry key is the normalized tenant name; the descriptor gains a
/// `cdnPath` pointing at the tenant's first declared frontend path. A tenant
/// without a declared path is an error.
pub fn merge_module_registry(
    mut remote: Map<String, Value>,
    frontend: &FrontendObject,
) -> Result<Map<String, Value>, MergeError> {
    let cdn_path = frontend
        .spec
        .frontend
        .as_ref()
        .and_then(|f| f.paths.first())
        .ok_or_else(|| MergeError::MissingCdnPath {
            frontend: frontend.metadata.name.clone(),
        })?;

    let mut descriptor = frontend.spec.module.clone().unwrap_or_default();
    descriptor.insert("cdnPath".to_string(), Value::String(cdn_path.clone()));

    remote.insert(
        module_key(&frontend.metadata.name),
        Value::Object(descriptor),
    );
    Ok(remote)
}

/// Normalize a tenant name into a registry key: camel-case dash-separated
/// segments, strip leading digits, drop any remaining non-alphanumerics.
/// `"my-app-123"` becomes `"myApp123"`.
pub fn module_key(name: &str) -> String {
    let mut camel = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            // A dash swallows the following word character, uppercased.
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    chars.next();
                    camel.extend(next.to_uppercase());
                    continue;
                }
            }
        }
        camel.push(c);
    }
    camel
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
