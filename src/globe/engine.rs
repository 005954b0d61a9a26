use serde::Serialize;
use thiserror::Error;

use super::arcs::{ArcRecord, RenderPoint};
use super::color::{sanitize_color, ColorFade};

#[derive(Error, Debug)]
pub enum GlobeError {
    #[error("couldn't serialize globe payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("rendering engine rejected call: {0}")]
    Engine(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialOptions {
    pub color: String,
    pub emissive: String,
    pub emissive_intensity: f64,
    pub shininess: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HexPolygonLayer {
    pub features: Vec<serde_json::Value>,
    pub resolution: u32,
    pub margin: f64,
    pub color: String,
    pub show_atmosphere: bool,
    pub atmosphere_color: String,
    pub atmosphere_altitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcDatum {
    pub order: i64,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub arc_alt: f64,
    pub color: String,
    pub stroke: f64,
}

impl ArcDatum {
    pub fn new(arc: &ArcRecord, stroke: f64) -> Self {
        Self {
            order: arc.order,
            start_lat: arc.start_lat,
            start_lng: arc.start_lng,
            end_lat: arc.end_lat,
            end_lng: arc.end_lng,
            arc_alt: arc.arc_alt,
            color: sanitize_color(&arc.color),
            stroke,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcLayer {
    pub arcs: Vec<ArcDatum>,
    pub dash_length: f64,
    pub dash_gap: f64,
    pub dash_animate_time: f64,
}

/// A render point as the engine sees it; `index` refers back into the point list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDatum {
    pub index: usize,
    pub lat: f64,
    pub lng: f64,
    pub order: i64,
    pub size: f64,
    pub color: String,
}

impl PointDatum {
    pub fn new(index: usize, point: &RenderPoint) -> Self {
        Self {
            index,
            lat: point.lat,
            lng: point.lng,
            order: point.order,
            size: point.size,
            color: point.color.at(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLayer {
    pub points: Vec<PointDatum>,
    pub altitude: f64,
    pub radius: f64,
    pub merge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingStyle {
    pub max_radius: f64,
    pub propagation_speed: f64,
    pub repeat_period: f64,
    /// Per-point fades, indexed like [`PointDatum::index`]. Not sent as data.
    #[serde(skip)]
    pub colors: Vec<ColorFade>,
}

/// The configuration surface of the 3D globe renderer.
pub trait GlobeEngine {
    fn set_material(&mut self, material: &MaterialOptions) -> Result<(), GlobeError>;
    fn set_hex_polygons(&mut self, layer: &HexPolygonLayer) -> Result<(), GlobeError>;
    fn set_arcs(&mut self, layer: &ArcLayer) -> Result<(), GlobeError>;
    fn set_points(&mut self, layer: &PointLayer) -> Result<(), GlobeError>;
    fn set_ring_style(&mut self, style: &RingStyle) -> Result<(), GlobeError>;
    fn set_rings_data(&mut self, rings: &[PointDatum]) -> Result<(), GlobeError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Material,
        HexPolygons(usize),
        Arcs(usize),
        Points(usize),
        RingStyle,
    }

    #[derive(Debug, Default)]
    pub struct RecordingEngine {
        pub calls: Vec<Call>,
        pub rings: Vec<Vec<PointDatum>>,
        pub arcs: Vec<ArcLayer>,
        pub fail_rings: bool,
        pub fail_arcs: bool,
    }

    impl GlobeEngine for RecordingEngine {
        fn set_material(&mut self, _material: &MaterialOptions) -> Result<(), GlobeError> {
            self.calls.push(Call::Material);
            Ok(())
        }

        fn set_hex_polygons(&mut self, layer: &HexPolygonLayer) -> Result<(), GlobeError> {
            self.calls.push(Call::HexPolygons(layer.features.len()));
            Ok(())
        }

        fn set_arcs(&mut self, layer: &ArcLayer) -> Result<(), GlobeError> {
            if self.fail_arcs {
                return Err(GlobeError::Engine("arcs unavailable".to_string()));
            }
            self.calls.push(Call::Arcs(layer.arcs.len()));
            self.arcs.push(layer.clone());
            Ok(())
        }

        fn set_points(&mut self, layer: &PointLayer) -> Result<(), GlobeError> {
            self.calls.push(Call::Points(layer.points.len()));
            Ok(())
        }

        fn set_ring_style(&mut self, _style: &RingStyle) -> Result<(), GlobeError> {
            self.calls.push(Call::RingStyle);
            Ok(())
        }

        fn set_rings_data(&mut self, rings: &[PointDatum]) -> Result<(), GlobeError> {
            if self.fail_rings {
                return Err(GlobeError::Engine("rings unavailable".to_string()));
            }
            self.rings.push(rings.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_arc_datum_sanitizes_color() {
        let arc = ArcRecord {
            order: 3,
            start_lat: 1.0,
            start_lng: 2.0,
            end_lat: 3.0,
            end_lng: 4.0,
            arc_alt: 0.3,
            color: "#ABC".to_string(),
        };
        let datum = ArcDatum::new(&arc, 0.3);
        assert_eq!(datum.color, "#aabbcc");

        let bad = ArcRecord {
            color: "chartreuse".to_string(),
            ..arc
        };
        assert_eq!(ArcDatum::new(&bad, 0.3).color, "#ffffff");
    }

    #[test]
    fn test_payload_uses_camel_case() {
        let datum = PointDatum {
            index: 0,
            lat: 1.0,
            lng: 2.0,
            order: 1,
            size: 4.0,
            color: "rgba(1, 2, 3, 1)".to_string(),
        };
        let style = RingStyle {
            max_radius: 3.0,
            propagation_speed: 3.0,
            repeat_period: 900.0,
            colors: Vec::new(),
        };
        let point = serde_json::to_value(&datum).expect("should serialize");
        assert_eq!(point["lat"], 1.0);
        let style = serde_json::to_value(&style).expect("should serialize");
        assert_eq!(style["maxRadius"], 3.0);
        assert!(style.get("colors").is_none());
    }
}
