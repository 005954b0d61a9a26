pub mod arcs;
pub mod color;
pub mod config;
pub mod engine;
pub mod rings;

use std::sync::Arc;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

pub use arcs::{derive_render_points, validate_arcs, ArcRecord, CandidateArc, RenderPoint};
pub use color::{hex_to_rgb, sanitize_color, ColorError, ColorFade, Rgb, FALLBACK_COLOR};
pub use config::{GlobeConfig, LatLng, SceneOptions};
pub use engine::{GlobeEngine, GlobeError};
pub use rings::{gen_random_numbers, ring_count, RingScheduler, RING_INTERVAL_MS};

use engine::{
    ArcDatum, ArcLayer, HexPolygonLayer, MaterialOptions, PointDatum, PointLayer, RingStyle,
};

const RING_PROPAGATION_SPEED: f64 = 3.0;
const ARC_STROKES: [f64; 3] = [0.32, 0.28, 0.3];
const ARC_DASH_GAP: f64 = 15.0;
const HEX_POLYGON_RESOLUTION: u32 = 3;
const HEX_POLYGON_MARGIN: f64 = 0.7;
const POINT_RADIUS: f64 = 2.0;

/// Owns everything one mounted globe needs: its config, the validated arcs, the derived
/// points, the ring selection, and (while mounted) the engine handle.
pub struct GlobeController<E: GlobeEngine> {
    config: GlobeConfig,
    land: Arc<Vec<serde_json::Value>>,
    arcs: Option<Vec<ArcRecord>>,
    points: Vec<RenderPoint>,
    rings: RingScheduler,
    engine: Option<E>,
    rng: StdRng,
}

impl<E: GlobeEngine> GlobeController<E> {
    pub fn new(config: GlobeConfig, land: Arc<Vec<serde_json::Value>>) -> Self {
        Self::with_rng(config, land, StdRng::from_entropy())
    }

    pub fn with_seed(config: GlobeConfig, land: Arc<Vec<serde_json::Value>>, seed: u64) -> Self {
        Self::with_rng(config, land, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GlobeConfig, land: Arc<Vec<serde_json::Value>>, rng: StdRng) -> Self {
        Self {
            config,
            land,
            arcs: None,
            points: Vec::new(),
            rings: RingScheduler::new(),
            engine: None,
            rng,
        }
    }

    pub fn arcs(&self) -> &[ArcRecord] {
        self.arcs.as_deref().unwrap_or_default()
    }

    pub fn points(&self) -> &[RenderPoint] {
        &self.points
    }

    pub fn ring_selection(&self) -> &[usize] {
        self.rings.selection()
    }

    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    pub fn scene_options(&self) -> SceneOptions {
        SceneOptions::from(&self.config)
    }

    /// Validate `candidates` and rebuild the points, but only if the valid arcs changed.
    /// Returns whether a rebuild happened.
    pub fn set_data(&mut self, candidates: &[CandidateArc]) -> bool {
        let arcs = validate_arcs(candidates);
        if self.arcs.as_ref() == Some(&arcs) {
            return false;
        }
        let had_points = !self.points.is_empty();
        self.points = derive_render_points(&arcs, self.config.point_size);
        self.arcs = Some(arcs);
        self.rings.reset();
        if had_points && self.points.is_empty() {
            self.clear_layers();
        } else {
            self.configure_layers();
        }
        true
    }

    pub fn attach(&mut self, engine: E) {
        self.engine = Some(engine);
        self.configure_material();
        self.configure_layers();
    }

    /// Release the engine. Nothing reaches it after this returns.
    pub fn detach(&mut self) -> Option<E> {
        self.rings.reset();
        self.engine.take()
    }

    pub fn tick(&mut self) -> &[usize] {
        self.rings
            .tick(&self.points, self.engine.as_mut(), &mut self.rng);
        self.rings.selection()
    }

    fn configure_material(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let material = MaterialOptions {
            color: self.config.globe_color.clone(),
            emissive: self.config.emissive.clone(),
            emissive_intensity: self.config.emissive_intensity,
            shininess: self.config.shininess,
        };
        if let Err(err) = engine.set_material(&material) {
            log::error!("Error building material: {err}");
        }
    }

    /// Empty the arc, point and ring layers of an attached engine.
    fn clear_layers(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let arc_layer = ArcLayer {
            arcs: Vec::new(),
            dash_length: self.config.arc_length,
            dash_gap: ARC_DASH_GAP,
            dash_animate_time: self.config.arc_time,
        };
        let point_layer = PointLayer {
            points: Vec::new(),
            altitude: 0.0,
            radius: POINT_RADIUS,
            merge: true,
        };
        let res = engine
            .set_rings_data(&[])
            .and_then(|_| engine.set_arcs(&arc_layer))
            .and_then(|_| engine.set_points(&point_layer));
        if let Err(err) = res {
            log::error!("Error clearing globe: {err}");
        }
    }

    fn configure_layers(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if self.points.is_empty() {
            return;
        }
        let arcs = self.arcs.as_deref().unwrap_or_default();

        let polygons = HexPolygonLayer {
            features: self.land.to_vec(),
            resolution: HEX_POLYGON_RESOLUTION,
            margin: HEX_POLYGON_MARGIN,
            color: self.config.polygon_color.clone(),
            show_atmosphere: self.config.show_atmosphere,
            atmosphere_color: self.config.atmosphere_color.clone(),
            atmosphere_altitude: self.config.atmosphere_altitude,
        };
        if let Err(err) = engine.set_hex_polygons(&polygons) {
            log::error!("Error setting up globe: {err}");
            return;
        }

        let rng = &mut self.rng;
        let arc_layer = ArcLayer {
            arcs: arcs
                .iter()
                .map(|arc| {
                    let stroke = ARC_STROKES
                        .choose(&mut *rng)
                        .copied()
                        .unwrap_or(ARC_STROKES[0]);
                    ArcDatum::new(arc, stroke)
                })
                .collect(),
            dash_length: self.config.arc_length,
            dash_gap: ARC_DASH_GAP,
            dash_animate_time: self.config.arc_time,
        };
        let point_layer = PointLayer {
            points: self
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| PointDatum::new(i, p))
                .collect(),
            altitude: 0.0,
            radius: POINT_RADIUS,
            merge: true,
        };
        let ring_style = RingStyle {
            max_radius: self.config.max_rings,
            propagation_speed: RING_PROPAGATION_SPEED,
            repeat_period: self.config.ring_repeat_period(),
            colors: self.points.iter().map(|p| p.color).collect(),
        };

        let res = engine
            .set_arcs(&arc_layer)
            .and_then(|_| engine.set_points(&point_layer))
            .and_then(|_| engine.set_rings_data(&[]))
            .and_then(|_| engine.set_ring_style(&ring_style));
        if let Err(err) = res {
            log::error!("Error starting animation: {err}");
        }
    }
}
