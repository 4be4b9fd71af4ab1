//! Search-index merger.

use serde_json::Value;

use feo_overlay::FrontendObject;

use super::replace_owned_entries;

/// Replace the tenant's footprint in the search index: remote entries owned
/// by the tenant are dropped and the tenant's own entries appended in order.
pub fn merge_search_index(remote: Vec<Value>, frontend: &FrontendObject) -> Vec<Value> {
    replace_owned_entries(
        remote,
        &frontend.metadata.name,
        &frontend.spec.search_entries,
    )
}
