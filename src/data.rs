use dashmap::DashMap;
use rust_embed::Embed;
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use crate::globe::{CandidateArc, GlobeConfig};

pub const SAMPLE_ARCS: &str = "arcs.json";
pub const LAND: &str = "land.json";
pub const GLOBE_CONFIG: &str = "globe-config.json";

pub static GLOBAL_ARC_CACHE: LazyLock<DashMap<String, Arc<Vec<CandidateArc>>>> =
    LazyLock::new(DashMap::new);
pub static GLOBAL_LAND_CACHE: LazyLock<DashMap<String, Arc<Vec<Value>>>> =
    LazyLock::new(DashMap::new);

#[derive(Embed)]
#[folder = "data"]
pub struct GlobeAssets;

#[derive(Error, Debug, Clone)]
pub enum DataError {
    #[error("Globe data file not found: {0}")]
    NotFound(String),
    #[error("Couldn't parse globe data file {0}: {1}")]
    ParseError(String, String),
}

fn read_asset(name: &str) -> Result<Vec<u8>, DataError> {
    GlobeAssets::get(name)
        .map(|file| file.data.into_owned())
        .ok_or_else(|| DataError::NotFound(name.to_string()))
}

fn parse_asset<T: serde::de::DeserializeOwned>(name: &str) -> Result<T, DataError> {
    let bytes = read_asset(name)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| DataError::ParseError(name.to_string(), e.to_string()))
}

/// Candidate arcs from an embedded dataset. Records are not validated here.
pub fn get_arcs(name: &str) -> Result<Arc<Vec<CandidateArc>>, DataError> {
    let cache = &*GLOBAL_ARC_CACHE;
    if let Some(arcs) = cache.get(name) {
        return Ok(arcs.clone());
    }
    let arcs = Arc::new(parse_asset::<Vec<CandidateArc>>(name)?);
    cache.insert(name.to_string(), arcs.clone());
    Ok(arcs)
}

/// Features of a GeoJSON collection that actually carry geometry coordinates.
pub fn valid_features(collection: &Value) -> Vec<Value> {
    collection
        .get("features")
        .and_then(Value::as_array)
        .map(|features| {
            features
                .iter()
                .filter(|f| {
                    f.get("geometry")
                        .and_then(|g| g.get("coordinates"))
                        .is_some_and(|c| !c.is_null())
                })
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

pub fn get_land(name: &str) -> Result<Arc<Vec<Value>>, DataError> {
    let cache = &*GLOBAL_LAND_CACHE;
    if let Some(land) = cache.get(name) {
        return Ok(land.clone());
    }
    let collection = parse_asset::<Value>(name)?;
    let land = Arc::new(valid_features(&collection));
    cache.insert(name.to_string(), land.clone());
    Ok(land)
}

pub fn get_globe_config(name: &str) -> Result<GlobeConfig, DataError> {
    parse_asset(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::validate_arcs;
    use serde_json::json;

    #[test]
    fn test_sample_arcs_load() {
        let arcs = get_arcs(SAMPLE_ARCS).expect("sample arcs should parse");
        assert!(!arcs.is_empty());
        assert_eq!(validate_arcs(&arcs).len(), arcs.len());

        // second read comes from the cache
        let again = get_arcs(SAMPLE_ARCS).expect("sample arcs should parse");
        assert!(Arc::ptr_eq(&arcs, &again));
    }

    #[test]
    fn test_missing_asset() {
        assert!(matches!(
            get_arcs("nope.json"),
            Err(DataError::NotFound(name)) if name == "nope.json"
        ));
    }

    #[test]
    fn test_land_and_config_load() {
        let land = get_land(LAND).expect("land should parse");
        assert!(!land.is_empty());
        let config = get_globe_config(GLOBE_CONFIG).expect("config should parse");
        assert!(config.point_size > 0.0);
        assert!(config.initial_position.is_some());
    }

    #[test]
    fn test_valid_features_filters_geometry() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 1], [0, 1], [0, 0]]]}},
                {"type": "Feature", "geometry": null},
                {"type": "Feature", "geometry": {"type": "Polygon"}},
                {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": null}},
                {"type": "Feature"}
            ]
        });
        assert_eq!(valid_features(&collection).len(), 1);
        assert!(valid_features(&json!({"type": "FeatureCollection"})).is_empty());
    }
}
