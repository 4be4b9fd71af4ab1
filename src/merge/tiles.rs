//! Service-tile catalog merger.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use feo_overlay::{FrontendObject, ServiceTile};

/// One category of the service tile catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
    pub id: String,
    #[serde(default)]
    pub links: Vec<ServiceGroup>,
}

/// A group of tiles within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroup {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default)]
    pub links: Vec<Value>,
}

/// Splice the tenant's tiles into the catalog.
///
/// Tenant tiles are grouped by their `(section, group)` tags; within every
/// remote group, tiles owned by the tenant are dropped and the tenant's
/// tiles for that `(category, group)` pair appended. Categories and groups
/// the tenant does not target pass through untouched.
pub fn merge_service_tiles(
    remote: Vec<ServiceCategory>,
    frontend: &FrontendObject,
) -> Vec<ServiceCategory> {
    let frontend_name = frontend.metadata.name.as_str();

    let mut additions: HashMap<(&str, &str), Vec<Value>> = HashMap::new();
    for tile in &frontend.spec.service_tiles {
        additions
            .entry((tile.section.as_str(), tile.group.as_str()))
            .or_default()
            .push(tile_value(tile));
    }

    remote
        .into_iter()
        .map(|category| {
            let ServiceCategory {
                description,
                icon,
                id,
                links,
            } = category;
            let links = links
                .into_iter()
                .map(|group| {
                    let ServiceGroup {
                        id: group_id,
                        is_group,
                        title,
                        links,
                    } = group;
                    let mut tiles: Vec<Value> = links
                        .into_iter()
                        .filter(|tile| {
                            tile.get("frontendRef").and_then(Value::as_str) != Some(frontend_name)
                        })
                        .collect();
                    if let Some(added) = additions.get(&(id.as_str(), group_id.as_str())) {
                        tiles.extend(added.iter().cloned());
                    }
                    ServiceGroup {
                        id: group_id,
                        is_group,
                        title,
                        links: tiles,
                    }
                })
                .collect();
            ServiceCategory {
                description,
                icon,
                id,
                links,
            }
        })
        .collect()
}

/// A tenant tile as it lands in the catalog, placement tags included.
fn tile_value(tile: &ServiceTile) -> Value {
    let mut object = Map::new();
    object.insert("section".to_string(), Value::String(tile.section.clone()));
    object.insert("group".to_string(), Value::String(tile.group.clone()));
    for (key, value) in &tile.extra {
        object.insert(key.clone(), value.clone());
    }
    Value::Object(object)
}
