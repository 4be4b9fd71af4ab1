//! Overlay document types and loading.
//!
//! The overlay document is the tenant's Frontend CRD, read from YAML. It is
//! loaded fresh per request and immutable for the duration of the call.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::segment::{BundleSegment, NavigationSegment};

/// Errors loading an overlay document.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("failed to read overlay document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse overlay document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parsed tenant overlay document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayDocument {
    #[serde(default)]
    pub objects: Vec<FrontendObject>,
}

impl OverlayDocument {
    /// Parse an overlay document from YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self, OverlayError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse an overlay document from disk.
    pub fn load(path: &Path) -> Result<Self, OverlayError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Overlay features are enabled when the first tenant object opts in.
    pub fn feature_enabled(&self) -> bool {
        self.objects
            .first()
            .map(|object| object.spec.feo_config_enabled)
            .unwrap_or(false)
    }

    /// The tenant object driving the flat mergers.
    pub fn frontend(&self) -> Option<&FrontendObject> {
        self.objects.first()
    }
}

/// One tenant object within the overlay document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendObject {
    pub metadata: ObjectMetadata,
    #[serde(default)]
    pub spec: FrontendSpec,
}

/// Object metadata; `name` is the tenant identity every ownership check
/// compares against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub name: String,
}

/// Tenant-declared overrides and additions.
///
/// Absent lists deserialize to empty; absent `feoConfigEnabled` means the
/// overlay is disabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendSpec {
    #[serde(default)]
    pub feo_config_enabled: bool,
    #[serde(default)]
    pub bundle_segments: Vec<BundleSegment>,
    #[serde(default)]
    pub navigation_segments: Vec<NavigationSegment>,
    /// Replacement search-index entries owned by this tenant.
    #[serde(default)]
    pub search_entries: Vec<Value>,
    #[serde(default)]
    pub service_tiles: Vec<ServiceTile>,
    /// Replacement widget-registry entries owned by this tenant.
    #[serde(default)]
    pub widget_registry: Vec<Value>,
    /// Module descriptor published into the module registry.
    #[serde(default)]
    pub module: Option<Map<String, Value>>,
    #[serde(default)]
    pub frontend: Option<FrontendPaths>,
}

/// A tenant service tile, tagged with the category and group it lands in.
///
/// Tiles are spliced into the catalog verbatim, tags included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTile {
    pub section: String,
    pub group: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// CDN paths declared by the tenant frontend; the first one becomes the
/// module registry `cdnPath`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontendPaths {
    #[serde(default)]
    pub paths: Vec<String>,
}
