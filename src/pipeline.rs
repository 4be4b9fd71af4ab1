//! Request pipeline.
//!
//! Routes a decoded request to the right merger and serializes the result,
//! degrading to passthrough on any failure or when the tenant has not
//! enabled the overlay.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use feo_overlay::{OverlayDocument, OverlayError};

use crate::endpoint::Endpoint;
use crate::error::InterceptError;
use crate::merge::navigation::{self, NavigationBundle};
use crate::merge::tiles::ServiceCategory;
use crate::merge::{
    merge_module_registry, merge_search_index, merge_service_tiles, merge_widget_registry,
};

/// Source of overlay documents; the seam between the pipeline and tenant
/// configuration storage.
pub trait OverlayProvider {
    fn load(&self, location: &str) -> Result<OverlayDocument, OverlayError>;
}

/// Reads overlay documents from YAML files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOverlayProvider;

impl OverlayProvider for FileOverlayProvider {
    fn load(&self, location: &str) -> Result<OverlayDocument, OverlayError> {
        OverlayDocument::load(Path::new(location))
    }
}

/// Serves one pre-built document regardless of location; for tests and
/// embedding.
#[derive(Debug, Clone)]
pub struct StaticOverlayProvider {
    pub document: OverlayDocument,
}

impl OverlayProvider for StaticOverlayProvider {
    fn load(&self, _location: &str) -> Result<OverlayDocument, OverlayError> {
        Ok(self.document.clone())
    }
}

/// Request interceptor: loads the tenant overlay and merges it onto the
/// remote payload for the classified endpoint.
pub struct Interceptor<P = FileOverlayProvider> {
    provider: P,
}

impl Interceptor<FileOverlayProvider> {
    /// Interceptor reading overlay documents from disk.
    pub fn new() -> Self {
        Self {
            provider: FileOverlayProvider,
        }
    }
}

impl Default for Interceptor<FileOverlayProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OverlayProvider> Interceptor<P> {
    /// Interceptor over a custom overlay source.
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Apply the tenant overlay to a remote payload.
    ///
    /// Total: every failure mode is logged and returns `remote_body`
    /// verbatim, so the caller always has a response to serve.
    pub fn process_request(&self, url: &str, remote_body: &str, overlay_location: &str) -> String {
        match self.try_process(url, remote_body, overlay_location) {
            Ok(body) => body,
            Err(error) => {
                warn!(%url, %error, "overlay merge failed; returning remote body unchanged");
                remote_body.to_string()
            }
        }
    }

    fn try_process(
        &self,
        url: &str,
        remote_body: &str,
        overlay_location: &str,
    ) -> Result<String, InterceptError> {
        let overlay = self.provider.load(overlay_location)?;

        if !overlay.feature_enabled() {
            debug!(%url, "overlay features not enabled; returning remote body unchanged");
            return Ok(remote_body.to_string());
        }
        let Some(frontend) = overlay.frontend() else {
            return Ok(remote_body.to_string());
        };

        let Some(endpoint) = Endpoint::classify(url) else {
            debug!(%url, "no endpoint matched; returning remote body unchanged");
            return Ok(remote_body.to_string());
        };

        debug!(
            %url,
            endpoint = endpoint.name(),
            tenant = %frontend.metadata.name,
            "merging overlay into remote payload"
        );

        let merged = match endpoint {
            Endpoint::Navigation => {
                let bundles: Vec<NavigationBundle> = serde_json::from_str(remote_body)?;
                let merged: Vec<NavigationBundle> = bundles
                    .iter()
                    .map(|bundle| NavigationBundle {
                        id: bundle.id.clone(),
                        title: bundle.title.clone(),
                        nav_items: navigation::merge(bundle, &overlay, &bundle.id),
                    })
                    .collect();
                serde_json::to_string(&merged)?
            }
            Endpoint::SearchIndex => {
                let entries: Vec<Value> = serde_json::from_str(remote_body)?;
                serde_json::to_string(&merge_search_index(entries, frontend))?
            }
            Endpoint::ServiceTiles => {
                let categories: Vec<ServiceCategory> = serde_json::from_str(remote_body)?;
                serde_json::to_string(&merge_service_tiles(categories, frontend))?
            }
            Endpoint::Modules => {
                let registry: Map<String, Value> = serde_json::from_str(remote_body)?;
                serde_json::to_string(&merge_module_registry(registry, frontend)?)?
            }
            Endpoint::WidgetRegistry => {
                let entries: Vec<Value> = serde_json::from_str(remote_body)?;
                serde_json::to_string(&merge_widget_registry(entries, frontend))?
            }
        };

        info!(
            %url,
            endpoint = endpoint.name(),
            original_size = remote_body.len(),
            merged_size = merged.len(),
            "request intercepted and merged"
        );
        Ok(merged)
    }
}

/// Apply the overlay document at `overlay_location` to a remote payload.
///
/// Convenience wiring of [`Interceptor`] with the file provider.
pub fn process_request(url: &str, remote_body: &str, overlay_location: &str) -> String {
    Interceptor::new().process_request(url, remote_body, overlay_location)
}
