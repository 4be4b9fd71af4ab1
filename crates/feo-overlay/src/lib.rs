//! Tenant Overlay Document Model
//!
//! Defines the Frontend CRD types a tenant supplies to override shared
//! platform data: bundle segments, navigation segments, flat override lists,
//! and the recursive navigation node shape.

pub mod document;
pub mod nav;
pub mod segment;

pub use document::{
    FrontendObject, FrontendPaths, FrontendSpec, ObjectMetadata, OverlayDocument, OverlayError,
    ServiceTile,
};
pub use nav::{NavItem, NavItemShape, SegmentRef};
pub use segment::{BundleSegment, NavigationSegment};

/// Upper bound on segment-reference expansion passes over a single node list.
///
/// A safety valve against cyclic or self-expanding segment definitions; on
/// reaching the cap the partially expanded list is kept as-is.
pub const MAX_SEGMENT_EXPANSIONS: usize = 100;
