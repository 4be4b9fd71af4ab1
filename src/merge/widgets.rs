//! Widget-registry merger.

use serde_json::Value;

use feo_overlay::FrontendObject;

use super::replace_owned_entries;

/// Replace the tenant's widget entries, same rule as the search index:
/// drop remote entries owned by the tenant, append the tenant's own.
pub fn merge_widget_registry(remote: Vec<Value>, frontend: &FrontendObject) -> Vec<Value> {
    replace_owned_entries(
        remote,
        &frontend.metadata.name,
        &frontend.spec.widget_registry,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_owned_widgets_replaced() {
        let tenant: FrontendObject = serde_json::from_value(json!({
            "metadata": {"name": "my-app"},
            "spec": {"widgetRegistry": [{"scope": "myApp", "frontendRef": "my-app"}]}
        }))
        .unwrap();
        let remote = vec![
            json!({"scope": "stale", "frontendRef": "my-app"}),
            json!({"scope": "other", "frontendRef": "other"}),
        ];
        let merged = merge_widget_registry(remote, &tenant);
        assert_eq!(
            merged,
            vec![
                json!({"scope": "other", "frontendRef": "other"}),
                json!({"scope": "myApp", "frontendRef": "my-app"}),
            ]
        );
    }
}
