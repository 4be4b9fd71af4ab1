//! Tenant-declared navigation segments.

use serde::{Deserialize, Serialize};

use crate::nav::NavItem;

/// A navigation fragment scoped to a single bundle.
///
/// Content is injected into the bundle's top-level navigation, ordered by
/// `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSegment {
    pub segment_id: String,
    /// Bundle this segment belongs to.
    pub bundle_id: String,
    /// Ordering hint stamped onto injected nodes.
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub nav_items: Vec<NavItem>,
}

/// A reusable navigation fragment.
///
/// Replaces segment-reference placeholders wherever they cite its
/// `segment_id`. Distinct namespace from [`BundleSegment`] even though both
/// are keyed by `segment_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSegment {
    pub segment_id: String,
    #[serde(default)]
    pub nav_items: Vec<NavItem>,
}
