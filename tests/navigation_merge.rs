//! Navigation Merge Scenarios
//!
//! Deeper engine coverage than the unit tests: chained and nested segment
//! references, override precedence through several levels, and the
//! ordering/termination guarantees.

use serde_json::{json, Value};

use feo_interceptor::merge::navigation::merge;
use feo_interceptor::NavigationBundle;
use feo_overlay::OverlayDocument;

fn overlay(yaml: &str) -> OverlayDocument {
    OverlayDocument::from_yaml_str(yaml).unwrap()
}

fn bundle(id: &str, nav_items: Value) -> NavigationBundle {
    NavigationBundle {
        id: id.to_string(),
        title: Some(id.to_string()),
        nav_items: serde_json::from_value(nav_items).unwrap(),
    }
}

fn ids(items: &[feo_overlay::NavItem]) -> Vec<&str> {
    items.iter().filter_map(|n| n.id.as_deref()).collect()
}

// =============================================================================
// Segment-reference expansion
// =============================================================================

#[test]
fn test_chained_segments_expand_to_fixpoint() {
    // Segment "outer" resolves to a node list that itself references
    // segment "inner"; the re-scan picks the new reference up.
    let doc = overlay(
        r#"
objects:
  - metadata:
      name: my-app
    spec:
      feoConfigEnabled: true
      navigationSegments:
        - segmentId: outer
          navItems:
            - id: outer-first
            - segmentRef:
                segmentId: inner
                frontendName: my-app
        - segmentId: inner
          navItems:
            - id: inner-only
"#,
    );
    let remote = bundle(
        "b1",
        json!([
            {"id": "head"},
            {"segmentRef": {"segmentId": "outer", "frontendName": "my-app"}},
            {"id": "tail"}
        ]),
    );
    let merged = merge(&remote, &doc, "b1");
    assert_eq!(ids(&merged), vec!["head", "outer-first", "inner-only", "tail"]);
}

#[test]
fn test_nested_reference_inside_resolved_node_expands() {
    // A resolved segment node carrying navItems has those items merged
    // recursively, including references nested inside them.
    let doc = overlay(
        r#"
objects:
  - metadata:
      name: my-app
    spec:
      feoConfigEnabled: true
      navigationSegments:
        - segmentId: outer
          navItems:
            - id: wrapper
              navItems:
                - segmentRef:
                    segmentId: inner
                    frontendName: my-app
        - segmentId: inner
          navItems:
            - id: nested-leaf
"#,
    );
    let remote = bundle(
        "b1",
        json!([{"segmentRef": {"segmentId": "outer", "frontendName": "my-app"}}]),
    );
    let merged = merge(&remote, &doc, "b1");
    assert_eq!(ids(&merged), vec!["wrapper"]);
    let nested = merged[0].nav_items.as_ref().unwrap();
    assert_eq!(ids(nested), vec!["nested-leaf"]);
}

#[test]
fn test_run_of_references_spliced_once() {
    let doc = overlay(
        r#"
objects:
  - metadata:
      name: my-app
    spec:
      feoConfigEnabled: true
      navigationSegments:
        - segmentId: s2
          navItems:
            - id: r1
            - id: r2
"#,
    );
    let remote = bundle(
        "b1",
        json!([
            {"id": "before"},
            {"segmentRef": {"segmentId": "s2", "frontendName": "my-app"}},
            {"segmentRef": {"segmentId": "s2", "frontendName": "my-app"}},
            {"id": "between"},
            {"segmentRef": {"segmentId": "s2", "frontendName": "my-app"}}
        ]),
    );
    let merged = merge(&remote, &doc, "b1");
    // The contiguous pair collapses into one expansion; the separate
    // trailing reference expands on a later pass.
    assert_eq!(
        ids(&merged),
        vec!["before", "r1", "r2", "between", "r1", "r2"]
    );
}

#[test]
fn test_unresolved_reference_blocks_later_ones_until_cap() {
    let doc = overlay(
        r#"
objects:
  - metadata:
      name: my-app
    spec:
      feoConfigEnabled: true
      navigationSegments:
        - segmentId: good
          navItems:
            - id: resolved
"#,
    );
    let remote = bundle(
        "b1",
        json!([
            {"segmentRef": {"segmentId": "missing", "frontendName": "my-app"}},
            {"segmentRef": {"segmentId": "good", "frontendName": "my-app"}}
        ]),
    );
    // Every pass finds the unresolvable reference first, so the loop runs
    // to the cap and both references survive unexpanded.
    let merged = merge(&remote, &doc, "b1");
    assert_eq!(merged.len(), 2);
    assert!(merged[0].is_segment_ref());
    assert!(merged[1].is_segment_ref());
}

// =============================================================================
// Bundle-segment merging through the tree
// =============================================================================

#[test]
fn test_override_reaches_nodes_inside_groups() {
    let doc = overlay(
        r#"
objects:
  - metadata:
      name: my-app
    spec:
      feoConfigEnabled: true
      bundleSegments:
        - segmentId: s1
          bundleId: b1
          position: 100
          navItems:
            - id: grouped
              title: Overridden
"#,
    );
    let remote = bundle(
        "b1",
        json!([{
            "groupId": "g1",
            "title": "Group",
            "navItems": [{
                "id": "grouped",
                "title": "Original",
                "frontendRef": "my-app",
                "bundleSegmentRef": "s1"
            }]
        }]),
    );
    let merged = merge(&remote, &doc, "b1");
    let inner = merged[0].nav_items.as_ref().unwrap();
    assert_eq!(inner[0].extra.get("title"), Some(&json!("Overridden")));
    assert_eq!(inner[0].numeric_position(), Some(100.0));
}

#[test]
fn test_local_route_list_unions_with_remote() {
    let doc = overlay(
        r#"
objects:
  - metadata:
      name: my-app
    spec:
      feoConfigEnabled: true
      bundleSegments:
        - segmentId: s1
          bundleId: b1
          position: 10
          navItems:
            - id: x
              routes:
                - id: shared
                  title: Local shared
                - id: local-only
"#,
    );
    let remote = bundle(
        "b1",
        json!([{
            "id": "x",
            "frontendRef": "my-app",
            "bundleSegmentRef": "s1",
            "routes": [
                {"id": "shared", "title": "Remote shared", "href": "/shared"},
                {"id": "remote-only"}
            ]
        }]),
    );
    let merged = merge(&remote, &doc, "b1");
    let routes = merged[0].routes.as_ref().unwrap();
    assert_eq!(ids(routes), vec!["shared", "local-only", "remote-only"]);
    assert_eq!(routes[0].extra.get("title"), Some(&json!("Local shared")));
    assert_eq!(routes[0].extra.get("href"), Some(&json!("/shared")));
}

#[test]
fn test_unknown_fields_survive_the_merge() {
    let doc = overlay(
        r#"
objects:
  - metadata:
      name: my-app
    spec:
      feoConfigEnabled: true
"#,
    );
    let remote = bundle(
        "b1",
        json!([{
            "id": "home",
            "title": "Home",
            "icon": "house",
            "expandable": true,
            "routes": [{"id": "sub", "product": "thing"}]
        }]),
    );
    let merged = merge(&remote, &doc, "b1");
    let value = serde_json::to_value(&merged[0]).unwrap();
    assert_eq!(value["icon"], "house");
    assert_eq!(value["expandable"], true);
    assert_eq!(value["routes"][0]["product"], "thing");
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_positions_non_decreasing_and_unpositioned_stable() {
    let doc = overlay(
        r#"
objects:
  - metadata:
      name: my-app
    spec:
      feoConfigEnabled: true
      bundleSegments:
        - segmentId: s1
          bundleId: b1
          position: 50
          navItems:
            - id: injected
"#,
    );
    let remote = bundle(
        "b1",
        json!([
            {"id": "u1"},
            {"id": "p200", "position": 200},
            {"id": "u2"},
            {"id": "p100", "position": 100}
        ]),
    );
    let merged = merge(&remote, &doc, "b1");

    let positions: Vec<f64> = merged.iter().filter_map(|n| n.numeric_position()).collect();
    let mut sorted = positions.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(positions, sorted);

    let unpositioned: Vec<&str> = merged
        .iter()
        .filter(|n| n.numeric_position().is_none())
        .filter_map(|n| n.id.as_deref())
        .collect();
    assert_eq!(unpositioned, vec!["u1", "u2"]);
}
