use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

const CAMERA_Z: f64 = 300.0;
const ASPECT: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Globe appearance and animation options. Any key missing from the source takes the
/// default listed on [`GlobeConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobeConfig {
    pub point_size: f64,
    pub globe_color: String,
    pub show_atmosphere: bool,
    pub atmosphere_color: String,
    pub atmosphere_altitude: f64,
    pub emissive: String,
    pub emissive_intensity: f64,
    pub shininess: f64,
    pub polygon_color: String,
    pub ambient_light: String,
    pub directional_left_light: String,
    pub directional_top_light: String,
    pub point_light: String,
    /// Milliseconds for one dash to travel an arc.
    pub arc_time: f64,
    pub arc_length: f64,
    pub rings: u32,
    pub max_rings: f64,
    pub initial_position: Option<LatLng>,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            globe_color: "#1d072e".to_string(),
            show_atmosphere: true,
            atmosphere_color: "#ffffff".to_string(),
            atmosphere_altitude: 0.1,
            emissive: "#000000".to_string(),
            emissive_intensity: 0.1,
            shininess: 0.9,
            polygon_color: "rgba(255,255,255,0.7)".to_string(),
            ambient_light: "#ffffff".to_string(),
            directional_left_light: "#ffffff".to_string(),
            directional_top_light: "#ffffff".to_string(),
            point_light: "#ffffff".to_string(),
            arc_time: 2000.0,
            arc_length: 0.9,
            rings: 1,
            max_rings: 3.0,
            initial_position: None,
            auto_rotate: true,
            auto_rotate_speed: 1.0,
        }
    }
}

impl GlobeConfig {
    pub fn ring_repeat_period(&self) -> f64 {
        self.arc_time * self.arc_length / f64::from(self.rings.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraOptions {
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FogOptions {
    pub color: u32,
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LightOptions {
    pub color: String,
    pub intensity: f64,
    pub position: Option<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsOptions {
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub min_distance: f64,
    pub max_distance: f64,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub min_polar_angle: f64,
    pub max_polar_angle: f64,
}

/// Everything the engine needs before the first frame: camera, lights, controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneOptions {
    pub camera: CameraOptions,
    pub fog: FogOptions,
    pub ambient_light: LightOptions,
    pub directional_left_light: LightOptions,
    pub directional_top_light: LightOptions,
    pub point_light: LightOptions,
    pub controls: ControlsOptions,
    pub initial_position: Option<LatLng>,
    pub clear_color: u32,
    pub clear_alpha: f64,
}

impl From<&GlobeConfig> for SceneOptions {
    fn from(config: &GlobeConfig) -> Self {
        Self {
            camera: CameraOptions {
                fov: 50.0,
                aspect: ASPECT,
                near: 180.0,
                far: 1800.0,
                distance: CAMERA_Z,
            },
            fog: FogOptions {
                color: 0xffffff,
                near: 400.0,
                far: 2000.0,
            },
            ambient_light: LightOptions {
                color: config.ambient_light.clone(),
                intensity: 0.6,
                position: None,
            },
            directional_left_light: LightOptions {
                color: config.directional_left_light.clone(),
                intensity: 1.0,
                position: Some([-400.0, 100.0, 400.0]),
            },
            directional_top_light: LightOptions {
                color: config.directional_top_light.clone(),
                intensity: 1.0,
                position: Some([-200.0, 500.0, 200.0]),
            },
            point_light: LightOptions {
                color: config.point_light.clone(),
                intensity: 0.8,
                position: Some([-200.0, 500.0, 200.0]),
            },
            controls: ControlsOptions {
                enable_pan: false,
                enable_zoom: false,
                min_distance: CAMERA_Z,
                max_distance: CAMERA_Z,
                auto_rotate: config.auto_rotate,
                auto_rotate_speed: config.auto_rotate_speed,
                min_polar_angle: PI / 3.5,
                max_polar_angle: PI - PI / 3.0,
            },
            initial_position: config.initial_position,
            clear_color: 0xffaaff,
            clear_alpha: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: GlobeConfig =
            serde_json::from_str(r##"{"pointSize": 4, "globeColor": "#062056", "autoRotate": false}"##)
                .expect("partial config should parse");
        assert_eq!(config.point_size, 4.0);
        assert_eq!(config.globe_color, "#062056");
        assert!(!config.auto_rotate);
        assert_eq!(config.arc_time, 2000.0);
        assert_eq!(config.max_rings, 3.0);
        assert_eq!(config.polygon_color, "rgba(255,255,255,0.7)");
        assert_eq!(config.initial_position, None);
    }

    #[test]
    fn test_ring_repeat_period() {
        let config = GlobeConfig::default();
        assert!((config.ring_repeat_period() - 1800.0).abs() < 1e-9);
        let config = GlobeConfig {
            rings: 0,
            arc_time: 1000.0,
            arc_length: 0.5,
            ..Default::default()
        };
        assert!((config.ring_repeat_period() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_scene_follows_config() {
        let config = GlobeConfig {
            auto_rotate_speed: 0.5,
            ambient_light: "#38bdf8".to_string(),
            initial_position: Some(LatLng {
                lat: 22.3,
                lng: 114.2,
            }),
            ..Default::default()
        };
        let scene = SceneOptions::from(&config);
        assert_eq!(scene.controls.auto_rotate_speed, 0.5);
        assert!(scene.controls.auto_rotate);
        assert_eq!(scene.ambient_light.color, "#38bdf8");
        assert_eq!(scene.controls.min_distance, scene.camera.distance);
        assert_eq!(scene.initial_position.map(|p| p.lat), Some(22.3));
    }
}
