//! Navigation node types.
//!
//! A navigation tree is a list of [`NavItem`]s, each of which may nest
//! further lists under `routes` and `navItems`. Only the fields the merge
//! engine inspects are typed; everything else a node carries rides along in
//! `extra` and is re-emitted verbatim on serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Symbolic reference to a tenant's navigation segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRef {
    /// Navigation segment to splice in at this point.
    pub segment_id: String,
    /// Tenant that owns the segment.
    pub frontend_name: String,
}

impl SegmentRef {
    /// Whether another reference points at the same segment of the same tenant.
    pub fn same_target(&self, other: &SegmentRef) -> bool {
        self.segment_id == other.segment_id && self.frontend_name == other.frontend_name
    }
}

/// Merge shape of a navigation node. Exactly one applies to a given node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItemShape<'a> {
    /// Placeholder that must be resolved against a navigation segment.
    SegmentRef(&'a SegmentRef),
    /// Grouping node; nested `navItems` always merge recursively.
    Group(&'a str),
    /// Ordinary node.
    Plain,
}

/// A single node in a navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Node identity for identifier-keyed merges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Non-empty on grouping nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Present on segment-reference placeholder nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_ref: Option<SegmentRef>,
    /// Tenant that owns this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_ref: Option<String>,
    /// Bundle segment whose content merges into this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_segment_ref: Option<String>,
    /// Ordering hint for the final top-level sort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<NavItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_items: Option<Vec<NavItem>>,
    /// Fields the merge engine does not inspect, carried through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NavItem {
    /// Classify this node into its merge shape.
    ///
    /// A `segmentRef` wins over everything; a non-empty `groupId` makes a
    /// group; anything else is plain.
    pub fn shape(&self) -> NavItemShape<'_> {
        if let Some(segment_ref) = &self.segment_ref {
            return NavItemShape::SegmentRef(segment_ref);
        }
        match self.group_id.as_deref() {
            Some(group_id) if !group_id.is_empty() => NavItemShape::Group(group_id),
            _ => NavItemShape::Plain,
        }
    }

    /// Whether this node is a segment-reference placeholder.
    pub fn is_segment_ref(&self) -> bool {
        self.segment_ref.is_some()
    }

    /// The segment reference, when it belongs to the named tenant.
    pub fn segment_ref_for(&self, frontend_name: &str) -> Option<&SegmentRef> {
        self.segment_ref
            .as_ref()
            .filter(|r| r.frontend_name == frontend_name)
    }

    /// Declared position as a number, when it is one.
    pub fn numeric_position(&self) -> Option<f64> {
        self.position.as_ref().and_then(Number::as_f64)
    }

    /// Shallow overlay of `self` atop `remote`: every field present locally
    /// wins, including the nested lists; extras merge per key with the local
    /// value taking precedence.
    pub fn overlaid_on(&self, remote: &NavItem) -> NavItem {
        let mut merged = self.scalar_overlay_on(remote);
        merged.routes = self.routes.clone().or_else(|| remote.routes.clone());
        merged.nav_items = self.nav_items.clone().or_else(|| remote.nav_items.clone());
        merged
    }

    /// Overlay of `self` atop `remote` with `routes`/`navItems` denied; the
    /// nested merge sets those explicitly afterwards.
    pub fn scalar_overlay_on(&self, remote: &NavItem) -> NavItem {
        let mut extra = remote.extra.clone();
        for (key, value) in &self.extra {
            extra.insert(key.clone(), value.clone());
        }
        NavItem {
            id: self.id.clone().or_else(|| remote.id.clone()),
            group_id: self.group_id.clone().or_else(|| remote.group_id.clone()),
            segment_ref: self
                .segment_ref
                .clone()
                .or_else(|| remote.segment_ref.clone()),
            frontend_ref: self
                .frontend_ref
                .clone()
                .or_else(|| remote.frontend_ref.clone()),
            bundle_segment_ref: self
                .bundle_segment_ref
                .clone()
                .or_else(|| remote.bundle_segment_ref.clone()),
            position: self.position.clone().or_else(|| remote.position.clone()),
            routes: None,
            nav_items: None,
            extra,
        }
    }
}
