use leptos::web_sys::HtmlElement;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::globe::engine::{
    ArcLayer, HexPolygonLayer, MaterialOptions, PointDatum, PointLayer, RingStyle,
};
use crate::globe::{ColorFade, GlobeEngine, GlobeError, SceneOptions, FALLBACK_COLOR};

#[wasm_bindgen(module = "/public/globe-bridge.js")]
extern "C" {
    type GlobeBridge;

    #[wasm_bindgen(constructor, catch)]
    fn new(container: &HtmlElement, scene: &str) -> Result<GlobeBridge, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setMaterial)]
    fn set_material(this: &GlobeBridge, material: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setHexPolygons)]
    fn set_hex_polygons(this: &GlobeBridge, layer: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setArcs)]
    fn set_arcs(this: &GlobeBridge, layer: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setPoints)]
    fn set_points(this: &GlobeBridge, layer: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setRingStyle)]
    fn set_ring_style(
        this: &GlobeBridge,
        style: &str,
        color_at: &Closure<dyn Fn(u32, f64) -> String>,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setRingsData)]
    fn set_rings_data(this: &GlobeBridge, rings: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn dispose(this: &GlobeBridge);
}

fn engine_err(value: JsValue) -> GlobeError {
    GlobeError::Engine(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, GlobeError> {
    Ok(serde_json::to_string(value)?)
}

/// three-globe behind the JS bridge. Dropping it stops the render loop and frees the canvas.
pub struct ThreeGlobeEngine {
    bridge: GlobeBridge,
    // must outlive every ring the renderer may still be drawing
    ring_colors: Option<Closure<dyn Fn(u32, f64) -> String>>,
}

impl ThreeGlobeEngine {
    pub fn mount(container: &HtmlElement, scene: &SceneOptions) -> Result<Self, GlobeError> {
        let bridge = GlobeBridge::new(container, &to_json(scene)?).map_err(engine_err)?;
        Ok(Self {
            bridge,
            ring_colors: None,
        })
    }
}

impl GlobeEngine for ThreeGlobeEngine {
    fn set_material(&mut self, material: &MaterialOptions) -> Result<(), GlobeError> {
        self.bridge
            .set_material(&to_json(material)?)
            .map_err(engine_err)
    }

    fn set_hex_polygons(&mut self, layer: &HexPolygonLayer) -> Result<(), GlobeError> {
        self.bridge
            .set_hex_polygons(&to_json(layer)?)
            .map_err(engine_err)
    }

    fn set_arcs(&mut self, layer: &ArcLayer) -> Result<(), GlobeError> {
        self.bridge.set_arcs(&to_json(layer)?).map_err(engine_err)
    }

    fn set_points(&mut self, layer: &PointLayer) -> Result<(), GlobeError> {
        self.bridge.set_points(&to_json(layer)?).map_err(engine_err)
    }

    fn set_ring_style(&mut self, style: &RingStyle) -> Result<(), GlobeError> {
        let colors: Vec<ColorFade> = style.colors.clone();
        let color_at = Closure::<dyn Fn(u32, f64) -> String>::new(move |index: u32, t: f64| {
            colors
                .get(index as usize)
                .map(|fade| fade.at(t))
                .unwrap_or_else(|| FALLBACK_COLOR.to_string())
        });
        self.bridge
            .set_ring_style(&to_json(style)?, &color_at)
            .map_err(engine_err)?;
        self.ring_colors = Some(color_at);
        Ok(())
    }

    fn set_rings_data(&mut self, rings: &[PointDatum]) -> Result<(), GlobeError> {
        self.bridge
            .set_rings_data(&to_json(rings)?)
            .map_err(engine_err)
    }
}

impl Drop for ThreeGlobeEngine {
    fn drop(&mut self) {
        self.bridge.dispose();
    }
}
