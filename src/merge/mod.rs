//! Per-endpoint mergers.
//!
//! [`navigation`] is the recursive core; the other four are flat
//! replace-by-owner operations over lists or keyed maps.

pub mod modules;
pub mod navigation;
pub mod search;
pub mod tiles;
pub mod widgets;

pub use modules::{merge_module_registry, module_key};
pub use navigation::{merge as merge_navigation, NavigationBundle};
pub use search::merge_search_index;
pub use tiles::{merge_service_tiles, ServiceCategory, ServiceGroup};
pub use widgets::merge_widget_registry;

use serde_json::Value;

/// Drop entries owned by `frontend_name`, then append `additions` in their
/// original order. Ownership is the entry's `frontendRef` field.
pub(crate) fn replace_owned_entries(
    remote: Vec<Value>,
    frontend_name: &str,
    additions: &[Value],
) -> Vec<Value> {
    let mut result: Vec<Value> = remote
        .into_iter()
        .filter(|entry| entry.get("frontendRef").and_then(Value::as_str) != Some(frontend_name))
        .collect();
    result.extend(additions.iter().cloned());
    result
}
