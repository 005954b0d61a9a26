use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::color::{hex_to_rgb, ColorFade};

/// An arc as supplied by a caller. Any field may be missing, `null`, or of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateArc {
    #[serde(deserialize_with = "lenient_number")]
    pub order: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub start_lat: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub start_lng: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub end_lat: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub end_lng: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub arc_alt: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub color: Option<String>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_owned)))
}

fn is_valid_coordinate(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl CandidateArc {
    /// `Some` iff every numeric field is present and finite and the color is non-empty.
    pub fn validate(&self) -> Option<ArcRecord> {
        let color = self.color.as_ref().filter(|c| !c.is_empty())?;
        Some(ArcRecord {
            order: is_valid_coordinate(self.order)?.trunc() as i64,
            start_lat: is_valid_coordinate(self.start_lat)?,
            start_lng: is_valid_coordinate(self.start_lng)?,
            end_lat: is_valid_coordinate(self.end_lat)?,
            end_lng: is_valid_coordinate(self.end_lng)?,
            arc_alt: is_valid_coordinate(self.arc_alt)?,
            color: color.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcRecord {
    pub order: i64,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub arc_alt: f64,
    pub color: String,
}

/// Drop every candidate that fails validation, keeping input order.
pub fn validate_arcs(candidates: &[CandidateArc]) -> Vec<ArcRecord> {
    candidates.iter().filter_map(CandidateArc::validate).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPoint {
    pub lat: f64,
    pub lng: f64,
    pub order: i64,
    pub size: f64,
    pub color: ColorFade,
}

// -0.0 and 0.0 compare equal under `==`, so they must share a key
fn coordinate_key(lat: f64, lng: f64) -> (u64, u64) {
    ((lat + 0.0).to_bits(), (lng + 0.0).to_bits())
}

/// One point per distinct endpoint across `arcs`; the first arc to reach a coordinate owns it.
/// Arcs whose color doesn't parse contribute no points.
pub fn derive_render_points(arcs: &[ArcRecord], point_size: f64) -> Vec<RenderPoint> {
    if arcs.is_empty() {
        log::warn!("No valid position data found for the globe.");
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut points = Vec::new();
    for arc in arcs {
        let rgb = match hex_to_rgb(&arc.color) {
            Ok(rgb) => rgb,
            Err(err) => {
                log::warn!("Skipping points for arc {}: {err}", arc.order);
                continue;
            }
        };
        let fade = ColorFade::new(rgb);
        for (lat, lng) in [(arc.start_lat, arc.start_lng), (arc.end_lat, arc.end_lng)] {
            if seen.insert(coordinate_key(lat, lng)) {
                points.push(RenderPoint {
                    lat,
                    lng,
                    order: arc.order,
                    size: point_size,
                    color: fade,
                });
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        order: f64,
        (start_lat, start_lng): (f64, f64),
        (end_lat, end_lng): (f64, f64),
        color: &str,
    ) -> CandidateArc {
        CandidateArc {
            order: Some(order),
            start_lat: Some(start_lat),
            start_lng: Some(start_lng),
            end_lat: Some(end_lat),
            end_lng: Some(end_lng),
            arc_alt: Some(0.1),
            color: Some(color.to_string()),
        }
    }

    #[test]
    fn test_validation_drops_bad_records_and_keeps_order() {
        let good_a = candidate(1.0, (1.0, 2.0), (3.0, 4.0), "#fff");
        let good_b = candidate(2.0, (5.0, 6.0), (7.0, 8.0), "#000");
        let mut nan = candidate(3.0, (1.0, 2.0), (3.0, 4.0), "#fff");
        nan.end_lng = Some(f64::NAN);
        let mut inf = candidate(4.0, (1.0, 2.0), (3.0, 4.0), "#fff");
        inf.arc_alt = Some(f64::INFINITY);
        let mut missing = candidate(5.0, (1.0, 2.0), (3.0, 4.0), "#fff");
        missing.start_lat = None;
        let mut no_order = candidate(6.0, (1.0, 2.0), (3.0, 4.0), "#fff");
        no_order.order = Some(f64::NEG_INFINITY);
        let empty_color = candidate(7.0, (1.0, 2.0), (3.0, 4.0), "");
        let mut no_color = candidate(8.0, (1.0, 2.0), (3.0, 4.0), "#fff");
        no_color.color = None;

        let valid = validate_arcs(&[
            nan,
            good_a,
            inf,
            missing,
            good_b,
            no_order,
            empty_color,
            no_color,
        ]);
        let orders: Vec<i64> = valid.iter().map(|a| a.order).collect();
        assert_eq!(orders, vec![1, 2]);
        for arc in &valid {
            assert!([arc.start_lat, arc.start_lng, arc.end_lat, arc.end_lng, arc.arc_alt]
                .iter()
                .all(|v| v.is_finite()));
            assert!(!arc.color.is_empty());
        }
    }

    #[test]
    fn test_fractional_order_truncates() {
        let arc = candidate(2.9, (0.0, 0.0), (1.0, 1.0), "#fff")
            .validate()
            .expect("should be valid");
        assert_eq!(arc.order, 2);
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let json = r##"[
            {"order": 1, "startLat": 10, "startLng": 20, "endLat": 30, "endLng": 40, "arcAlt": 0.2, "color": "#ff0000"},
            {"order": 2, "startLat": null, "startLng": 20, "endLat": 30, "endLng": 40, "arcAlt": 0.2, "color": "#ff0000"},
            {"order": 3, "startLat": "north", "startLng": 20, "endLat": 30, "endLng": 40, "arcAlt": 0.2, "color": 7},
            {"order": 4}
        ]"##;
        let candidates: Vec<CandidateArc> =
            serde_json::from_str(json).expect("lenient deserialize should not fail");
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[1].start_lat, None);
        assert_eq!(candidates[2].start_lat, None);
        assert_eq!(candidates[2].color, None);
        assert_eq!(candidates[3].end_lng, None);

        let valid = validate_arcs(&candidates);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].order, 1);
    }

    #[test]
    fn test_shared_endpoint_dedup_first_wins() {
        let arcs = validate_arcs(&[
            candidate(1.0, (10.0, 20.0), (30.0, 40.0), "#ff0000"),
            candidate(2.0, (10.0, 20.0), (50.0, 60.0), "#00ff00"),
        ]);
        let points = derive_render_points(&arcs, 4.0);
        assert_eq!(points.len(), 3);

        let shared: Vec<_> = points
            .iter()
            .filter(|p| p.lat == 10.0 && p.lng == 20.0)
            .collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].order, 1);
        assert_eq!(shared[0].color.at(0.25), "rgba(255, 0, 0, 0.75)");
        assert!(points.iter().any(|p| p.lat == 30.0 && p.lng == 40.0));
        assert!(points.iter().any(|p| p.lat == 50.0 && p.lng == 60.0));
        assert!(points.iter().all(|p| p.size == 4.0));
    }

    #[test]
    fn test_dedup_is_exact_not_approximate() {
        let arcs = validate_arcs(&[
            candidate(1.0, (10.0, 20.0), (10.0, 20.000001), "#fff"),
            candidate(2.0, (0.0, 0.0), (-0.0, 0.0), "#fff"),
        ]);
        let points = derive_render_points(&arcs, 1.0);
        // (10,20) and (10,20.000001) differ; (0,0) and (-0,0) are equal
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_unparseable_color_skips_only_that_arc() {
        let arcs = validate_arcs(&[
            candidate(1.0, (1.0, 1.0), (2.0, 2.0), "not-a-color"),
            candidate(2.0, (1.0, 1.0), (3.0, 3.0), "#0000ff"),
        ]);
        assert_eq!(arcs.len(), 2);
        let points = derive_render_points(&arcs, 1.0);
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.order == 2));
        assert_eq!(points[0].color.at(0.0), "rgba(0, 0, 255, 1)");
    }

    #[test]
    fn test_empty_input_yields_no_points() {
        assert!(derive_render_points(&[], 1.0).is_empty());
        assert!(validate_arcs(&[]).is_empty());
    }
}
