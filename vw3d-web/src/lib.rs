//! VW3D Web - Scene building and SVG rendering for browsers
//!
//! Exposes the core pipeline to JavaScript: build a scene, drive the
//! camera, and fetch the rendered SVG markup or mount it straight into a
//! DOM element.

use nalgebra::Point3;
use vw3d_core::{Camera, ElementId, Geometry, Scene};
use wasm_bindgen::prelude::*;

/// A scene with its camera, driven from JavaScript.
#[wasm_bindgen]
pub struct WireScene {
    scene: Scene,
    camera: Camera,
}

#[wasm_bindgen]
impl WireScene {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WireScene {
        WireScene {
            scene: Scene::new(),
            camera: Camera::new(),
        }
    }

    pub fn add_line(&mut self, x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> u32 {
        self.scene
            .add(Geometry::line(
                Point3::new(x1, y1, z1),
                Point3::new(x2, y2, z2),
            ))
            .as_u32()
    }

    /// Points arrive as a flat `[x, y, z, ...]` array; a trailing partial
    /// triple is ignored.
    pub fn add_polyline(&mut self, coordinates: &[f64], closed: bool) -> u32 {
        let points = coordinates
            .chunks_exact(3)
            .map(|triple| Point3::new(triple[0], triple[1], triple[2]))
            .collect();
        self.scene
            .add(Geometry::Polyline { points, closed })
            .as_u32()
    }

    pub fn add_box(&mut self, x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> u32 {
        self.scene
            .add(Geometry::box_between(
                Point3::new(x1, y1, z1),
                Point3::new(x2, y2, z2),
            ))
            .as_u32()
    }

    pub fn add_sphere(&mut self, x: f64, y: f64, z: f64, radius: f64) -> u32 {
        self.scene
            .add(Geometry::sphere(Point3::new(x, y, z), radius))
            .as_u32()
    }

    /// Load geometry from wire-format text. Returns how many elements
    /// were added.
    pub fn load_wire(&mut self, text: &str) -> Result<u32, JsValue> {
        let geometries = vw3d_core::parse_wire(text.as_bytes())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let count = geometries.len() as u32;
        for geometry in geometries {
            self.scene.add(geometry);
        }
        Ok(count)
    }

    /// Set one style attribute on an element. False if the id is unknown.
    pub fn set_material(&mut self, id: u32, key: &str, value: &str) -> bool {
        match self.scene.get_mut(ElementId::from_raw(id)) {
            Some(element) => {
                element.set_material(key, value);
                true
            }
            None => false,
        }
    }

    /// Label an element. False if the id is unknown.
    pub fn add_tag(&mut self, id: u32, tag: &str) -> bool {
        match self.scene.get_mut(ElementId::from_raw(id)) {
            Some(element) => {
                element.tag(tag);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u32) -> bool {
        self.scene.remove(ElementId::from_raw(id))
    }

    pub fn clear(&mut self) {
        self.scene.reset();
    }

    pub fn element_count(&self) -> u32 {
        self.scene.len() as u32
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    pub fn move_by(&mut self, dx: f64, dy: f64, dz: f64) {
        self.camera.move_by(dx, dy, dz);
    }

    pub fn track(&mut self, dx: f64, dy: f64) {
        self.camera.track(dx, dy);
    }

    pub fn pan(&mut self, angle: f64, degrees: bool) {
        self.camera.pan(angle, degrees);
    }

    pub fn tilt(&mut self, angle: f64, degrees: bool) {
        self.camera.tilt(angle, degrees);
    }

    pub fn rotate(&mut self, angle: f64, degrees: bool) {
        self.camera.rotate(angle, degrees);
    }

    pub fn look_at(&mut self, x: f64, y: f64, z: f64) {
        self.camera.look_at(Point3::new(x, y, z));
    }

    pub fn set_camera_position(&mut self, x: f64, y: f64, z: f64) {
        self.camera.set_position(Point3::new(x, y, z));
    }

    pub fn set_extents(&mut self, w: f64, h: f64) {
        self.camera.set_extents(w, h);
    }

    /// Render the scene and return the SVG markup.
    pub fn render_svg(&self, width: f64, height: f64) -> String {
        let rendered = self.scene.render(&self.camera);
        vw3d_svg::document(&rendered, self.camera.extents(), width, height)
    }

    /// Render and write the markup into the DOM element with this id.
    pub fn mount(&self, element_id: &str, width: f64, height: f64) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let target = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str("mount target not found"))?;
        target.set_inner_html(&self.render_svg(width, height));
        Ok(())
    }
}

impl Default for WireScene {
    fn default() -> Self {
        Self::new()
    }
}
