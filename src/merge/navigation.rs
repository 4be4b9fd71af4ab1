//! Navigation-tree merge engine.
//!
//! Recursively reconciles a remote navigation bundle with the tenant's
//! bundle and navigation segment declarations: identifier-keyed structural
//! merging per node shape, two-level segment-reference resolution, a
//! bounded expansion loop, and a deterministic final ordering.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::{debug, warn};

use feo_overlay::{
    BundleSegment, NavItem, NavItemShape, NavigationSegment, OverlayDocument,
    MAX_SEGMENT_EXPANSIONS,
};

/// Canonical payload for one navigation bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationBundle {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub nav_items: Vec<NavItem>,
}

/// Per-invocation merge state: the segment lookup maps plus the identity of
/// the bundle and tenant being merged. Built fresh inside [`merge`], passed
/// down recursively, never retained across calls.
struct MergeContext<'a> {
    bundle_segments: &'a HashMap<&'a str, &'a BundleSegment>,
    navigation_segments: &'a HashMap<&'a str, &'a NavigationSegment>,
    bundle_id: &'a str,
    frontend_name: &'a str,
}

impl<'a> MergeContext<'a> {
    /// Bundle segment with this id, when it belongs to the current bundle.
    fn bundle_segment(&self, segment_id: &str) -> Option<&'a BundleSegment> {
        self.bundle_segments
            .get(segment_id)
            .copied()
            .filter(|segment| segment.bundle_id == self.bundle_id)
    }

    fn navigation_segment(&self, segment_id: &str) -> Option<&'a NavigationSegment> {
        self.navigation_segments.get(segment_id).copied()
    }
}

/// Merge one remote bundle with the tenant overlay document.
///
/// Returns the merged top-level node list, ordered by position. The remote
/// bundle is never mutated; with no tenant objects the remote list comes
/// back unchanged (modulo the final ordering pass).
pub fn merge(
    remote: &NavigationBundle,
    overlay: &OverlayDocument,
    bundle_id: &str,
) -> Vec<NavItem> {
    let mut bundle_segments: HashMap<&str, &BundleSegment> = HashMap::new();
    let mut navigation_segments: HashMap<&str, &NavigationSegment> = HashMap::new();
    let mut merged = remote.nav_items.clone();

    for object in &overlay.objects {
        let spec = &object.spec;
        for segment in &spec.bundle_segments {
            bundle_segments.insert(segment.segment_id.as_str(), segment);
        }
        for segment in &spec.navigation_segments {
            navigation_segments.insert(segment.segment_id.as_str(), segment);
        }

        // Segments of this bundle that no top-level node references yet
        // surface as synthesized nodes stamped with the segment position.
        let mut items = remote.nav_items.clone();
        for segment in &spec.bundle_segments {
            if segment.bundle_id != bundle_id
                || is_referenced(&remote.nav_items, &segment.segment_id)
            {
                continue;
            }
            for item in &segment.nav_items {
                let mut node = item.clone();
                node.position = Some(Number::from(segment.position));
                items.push(node);
            }
        }

        let ctx = MergeContext {
            bundle_segments: &bundle_segments,
            navigation_segments: &navigation_segments,
            bundle_id,
            frontend_name: &object.metadata.name,
        };
        merged = merge_list(&items, &ctx);
    }

    sort_by_position(&mut merged);
    merged
}

fn is_referenced(nav_items: &[NavItem], segment_id: &str) -> bool {
    nav_items
        .iter()
        .any(|item| item.bundle_segment_ref.as_deref() == Some(segment_id))
}

/// Recursive merge of one node list: one pass per node shape, then the
/// segment-reference expansion over the result.
fn merge_list(items: &[NavItem], ctx: &MergeContext<'_>) -> Vec<NavItem> {
    let mut merged = Vec::with_capacity(items.len());
    for item in items {
        match item.shape() {
            NavItemShape::SegmentRef(_) => merged.push(item.clone()),
            NavItemShape::Group(_) => merged.push(merge_group(item, ctx)),
            NavItemShape::Plain => merged.push(merge_plain(item, ctx)),
        }
    }
    expand_segment_refs(merged, ctx)
}

/// Group nodes always merge their nested items, reference or not; absent
/// `navItems` are materialized as an empty list.
fn merge_group(item: &NavItem, ctx: &MergeContext<'_>) -> NavItem {
    let mut group = item.clone();
    let nested = item.nav_items.as_deref().unwrap_or(&[]);
    group.nav_items = Some(merge_list(nested, ctx));
    group
}

/// Plain nodes merge with their bundle segment's content when this tenant
/// owns them and the reference resolves; anything else passes through.
fn merge_plain(item: &NavItem, ctx: &MergeContext<'_>) -> NavItem {
    let Some(id) = item.id.as_deref() else {
        return item.clone();
    };
    if item.frontend_ref.as_deref() != Some(ctx.frontend_name) {
        return item.clone();
    }
    let Some(segment) = item
        .bundle_segment_ref
        .as_deref()
        .and_then(|segment_id| ctx.bundle_segment(segment_id))
    else {
        return item.clone();
    };
    match find_segment_item(&segment.nav_items, id) {
        Some(local) => combine_nested(local, item, segment, ctx),
        None => item.clone(),
    }
}

/// Locate a node by id within a segment's own tree: scan all direct
/// non-reference siblings first, then descend into each sibling's `routes`
/// and `navItems`, in that order.
fn find_segment_item<'a>(nav_items: &'a [NavItem], id: &str) -> Option<&'a NavItem> {
    for item in nav_items {
        if !item.is_segment_ref() && item.id.as_deref() == Some(id) {
            return Some(item);
        }
    }
    for item in nav_items {
        if item.is_segment_ref() {
            continue;
        }
        if let Some(routes) = &item.routes {
            if let Some(found) = find_segment_item(routes, id) {
                return Some(found);
            }
        }
        if let Some(nested) = &item.nav_items {
            if let Some(found) = find_segment_item(nested, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Combine a matched segment node with the remote node it overrides.
///
/// Scalar fields come from the local match atop the remote node's; nested
/// lists union local-over-remote and re-enter the recursive merge; the
/// position is stamped from the owning bundle segment.
fn combine_nested(
    local: &NavItem,
    remote: &NavItem,
    segment: &BundleSegment,
    ctx: &MergeContext<'_>,
) -> NavItem {
    let mut combined = local.scalar_overlay_on(remote);
    combined.routes = merge_nested_lists(local.routes.as_deref(), remote.routes.as_deref(), ctx);
    combined.nav_items =
        merge_nested_lists(local.nav_items.as_deref(), remote.nav_items.as_deref(), ctx);
    combined.position = Some(Number::from(segment.position));
    combined
}

/// Union the local list over the remote one when the local side is
/// non-empty; otherwise recursively merge whatever the remote carries.
fn merge_nested_lists(
    local: Option<&[NavItem]>,
    remote: Option<&[NavItem]>,
    ctx: &MergeContext<'_>,
) -> Option<Vec<NavItem>> {
    match local {
        Some(local_items) if !local_items.is_empty() => {
            let union = list_union(local_items, remote.unwrap_or(&[]));
            Some(merge_list(&union, ctx))
        }
        _ => remote.map(|remote_items| merge_list(remote_items, ctx)),
    }
}

/// Identifier-keyed union of a local list over a remote list.
///
/// Local items come first in their own order, each overlaid on the remote
/// item sharing its id when one exists; remote items whose id is absent
/// from the local list append in remote order, id-less remote items
/// included.
pub fn list_union(local: &[NavItem], remote: &[NavItem]) -> Vec<NavItem> {
    let remote_by_id: HashMap<&str, &NavItem> = remote
        .iter()
        .filter_map(|item| item.id.as_deref().map(|id| (id, item)))
        .collect();

    let mut union = Vec::with_capacity(local.len() + remote.len());
    for item in local {
        match item.id.as_deref().and_then(|id| remote_by_id.get(id)) {
            Some(remote_item) => union.push(item.overlaid_on(remote_item)),
            None => union.push(item.clone()),
        }
    }
    for item in remote {
        let matched = item
            .id
            .as_deref()
            .is_some_and(|id| local.iter().any(|l| l.id.as_deref() == Some(id)));
        if !matched {
            union.push(item.clone());
        }
    }
    union
}

/// Replace contiguous runs of tenant-matching segment references with their
/// resolved navigation-segment content, re-scanning from the start after
/// every splice.
///
/// An unresolvable reference stays in place and is found again on the next
/// pass; [`MAX_SEGMENT_EXPANSIONS`] bounds the loop either way, so cyclic or
/// self-expanding segment definitions terminate with the partially expanded
/// list.
fn expand_segment_refs(mut items: Vec<NavItem>, ctx: &MergeContext<'_>) -> Vec<NavItem> {
    let mut expanded: HashSet<String> = HashSet::new();

    for _ in 0..MAX_SEGMENT_EXPANSIONS {
        let Some((start, reference)) = items.iter().enumerate().find_map(|(index, item)| {
            item.segment_ref_for(ctx.frontend_name)
                .map(|r| (index, r.clone()))
        }) else {
            return items;
        };

        let mut run = 1;
        while items
            .get(start + run)
            .and_then(|item| item.segment_ref.as_ref())
            .is_some_and(|r| r.same_target(&reference))
        {
            run += 1;
        }

        if let Some(segment) = ctx
            .navigation_segment(&reference.segment_id)
            .filter(|segment| !segment.nav_items.is_empty())
        {
            if !expanded.insert(reference.segment_id.clone()) {
                warn!(
                    segment_id = %reference.segment_id,
                    frontend = %reference.frontend_name,
                    "navigation segment expanded more than once; cyclic segment definition?"
                );
            }
            let resolved: Vec<NavItem> = segment
                .nav_items
                .iter()
                .map(|item| resolve_segment_node(item, ctx))
                .collect();
            items.splice(start..start + run, resolved);
        }
    }

    debug!(
        frontend = %ctx.frontend_name,
        cap = MAX_SEGMENT_EXPANSIONS,
        "segment expansion cap reached; keeping partially expanded list"
    );
    items
}

/// Resolve one node of a navigation segment before splicing it in: nested
/// lists re-enter the recursive merge, `routes` taking precedence over
/// `navItems`.
fn resolve_segment_node(item: &NavItem, ctx: &MergeContext<'_>) -> NavItem {
    let mut resolved = item.clone();
    if let Some(routes) = &item.routes {
        resolved.routes = Some(merge_list(routes, ctx));
    } else if let Some(nested) = &item.nav_items {
        resolved.nav_items = Some(merge_list(nested, ctx));
    }
    resolved
}

/// Ascending ordering by numeric `position`.
///
/// Nodes declaring a numeric position sort stably among themselves; nodes
/// without one keep their slots untouched.
fn sort_by_position(items: &mut [NavItem]) {
    let slots: Vec<usize> = (0..items.len())
        .filter(|&index| items[index].numeric_position().is_some())
        .collect();
    if slots.len() < 2 {
        return;
    }
    let mut positioned: Vec<NavItem> = slots.iter().map(|&index| items[index].clone()).collect();
    positioned.sort_by(|a, b| {
        a.numeric_position()
            .partial_cmp(&b.numeric_position())
            .unwrap_or(Ordering::Equal)
    });
    for (slot, node) in slots.into_iter().zip(positioned) {
        items[slot] = node;
    }
}
