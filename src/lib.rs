//! Frontend Overlay Interceptor
//!
//! Overlays a tenant-supplied configuration document onto shared console
//! platform data (navigation trees, search indexes, service tile catalogs,
//! module registries, widget registries), producing a per-tenant merged view
//! without mutating the upstream payloads.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod merge;
pub mod pipeline;

pub use config::{ConfigError, InterceptorConfig};
pub use endpoint::Endpoint;
pub use error::{InterceptError, MergeError};
pub use merge::navigation::NavigationBundle;
pub use pipeline::{
    process_request, FileOverlayProvider, Interceptor, OverlayProvider, StaticOverlayProvider,
};
