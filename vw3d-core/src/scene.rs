//! Scene contents and the depth-sorted render pass
use crate::camera::Camera;
use crate::error::GeometryError;
use crate::geometry::{tessellate, Geometry};
use crate::projection::project_path;
use nalgebra::Point2;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Identifier of an element within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Style attributes carried through to the serializer untouched.
pub type Material = HashMap<String, String>;

/// One scene entry: a primitive plus presentation metadata.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    geometry: Geometry,
    /// Serializer attributes; the pipeline never interprets them.
    pub material: Material,
    /// Free-form labels for selection.
    pub tags: HashSet<String>,
}

impl Element {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn set_material(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.material.insert(key.into(), value.into());
    }

    pub fn tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Ordered collection of drawable elements.
///
/// Insertion order is kept and breaks depth ties in the render pass.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<Element>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive with an empty material and no tags.
    pub fn add(&mut self, geometry: Geometry) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(Element {
            id,
            geometry,
            material: Material::new(),
            tags: HashSet::new(),
        });
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Elements matching a predicate, in insertion order.
    pub fn find<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a Element>
    where
        P: FnMut(&Element) -> bool + 'a,
    {
        self.elements.iter().filter(move |e| predicate(e))
    }

    pub fn find_mut<'a, P>(&'a mut self, mut predicate: P) -> impl Iterator<Item = &'a mut Element>
    where
        P: FnMut(&Element) -> bool + 'a,
    {
        self.elements.iter_mut().filter(move |e| predicate(&**e))
    }

    /// Remove one element. Returns whether it existed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != before
    }

    /// Remove every element matching the predicate. Returns how many went.
    pub fn remove_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&Element) -> bool,
    {
        let before = self.elements.len();
        self.elements.retain(|e| !predicate(e));
        before - self.elements.len()
    }

    /// Drop every element. Assigned ids are not reused.
    pub fn reset(&mut self) {
        self.elements.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Tessellate, project, and depth-sort every element's sub-paths.
    ///
    /// Sub-paths come out farthest first across the whole scene, so a
    /// serializer drawing them in order paints near geometry over far.
    /// The sort is stable; equal depths keep insertion order. An element
    /// that fails to tessellate is reported in `skipped` and logged, and
    /// the render still completes.
    pub fn render(&self, camera: &Camera) -> Rendered<'_> {
        let mut paths = Vec::new();
        let mut skipped = Vec::new();
        for element in &self.elements {
            match tessellate(&element.geometry) {
                Ok(world_paths) => {
                    for world_path in &world_paths {
                        if let Some(projected) = project_path(camera, world_path) {
                            paths.push(RenderedPath {
                                id: element.id,
                                points: projected.points,
                                depth: projected.depth,
                                material: &element.material,
                            });
                        }
                    }
                }
                Err(err) => {
                    log::warn!("element {} skipped: {}", element.id.as_u32(), err);
                    skipped.push((element.id, err));
                }
            }
        }
        paths.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));
        Rendered { paths, skipped }
    }
}

/// One depth-sorted sub-path, ready for serialization.
#[derive(Debug, Clone)]
pub struct RenderedPath<'a> {
    pub id: ElementId,
    /// 4n picture-plane control points.
    pub points: Vec<Point2<f64>>,
    pub depth: f64,
    pub material: &'a Material,
}

/// Output of a render pass: sub-paths farthest first, plus the elements
/// that could not be drawn.
#[derive(Debug, Clone)]
pub struct Rendered<'a> {
    pub paths: Vec<RenderedPath<'a>>,
    pub skipped: Vec<(ElementId, GeometryError)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn unit_line(z: f64) -> Geometry {
        Geometry::line(Point3::new(0.0, 0.0, z), Point3::new(1.0, 0.0, z))
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut scene = Scene::new();
        let a = scene.add(unit_line(0.0));
        let b = scene.add(unit_line(-1.0));
        assert_ne!(a, b);
        scene.remove(a);
        let c = scene.add(unit_line(-2.0));
        assert_ne!(b, c);
        assert!(scene.get(a).is_none());
        assert!(scene.get(c).is_some());
    }

    #[test]
    fn test_find_by_tag() {
        let mut scene = Scene::new();
        let a = scene.add(unit_line(0.0));
        scene.add(unit_line(-1.0));
        let c = scene.add(unit_line(-2.0));
        for id in [a, c] {
            if let Some(element) = scene.get_mut(id) {
                element.tag("frame");
            }
        }
        let found: Vec<ElementId> = scene.find(|e| e.has_tag("frame")).map(|e| e.id()).collect();
        assert_eq!(found, vec![a, c]);
    }

    #[test]
    fn test_remove_where() {
        let mut scene = Scene::new();
        scene.add(unit_line(0.0));
        let keep = scene.add(Geometry::sphere(Point3::origin(), 1.0));
        scene.add(unit_line(-1.0));
        let removed = scene.remove_where(|e| matches!(e.geometry(), Geometry::LineCurve { .. }));
        assert_eq!(removed, 2);
        assert_eq!(scene.len(), 1);
        assert!(scene.get(keep).is_some());
    }

    #[test]
    fn test_reset_clears_elements() {
        let mut scene = Scene::new();
        scene.add(unit_line(0.0));
        scene.reset();
        assert!(scene.is_empty());
        // Ids keep counting up after a reset.
        let next = scene.add(unit_line(0.0));
        assert_eq!(next.as_u32(), 1);
    }

    #[test]
    fn test_render_orders_farthest_first() {
        let mut scene = Scene::new();
        let near = scene.add(unit_line(-2.0));
        let far = scene.add(unit_line(-5.0));
        let middle = scene.add(unit_line(-3.5));
        let rendered = scene.render(&Camera::new());
        let order: Vec<ElementId> = rendered.paths.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![far, middle, near]);
        assert!(rendered.skipped.is_empty());
    }

    #[test]
    fn test_render_keeps_insertion_order_on_ties() {
        let mut scene = Scene::new();
        let first = scene.add(unit_line(-2.0));
        let second = scene.add(Geometry::line(
            Point3::new(3.0, 1.0, -2.0),
            Point3::new(4.0, 1.0, -2.0),
        ));
        let rendered = scene.render(&Camera::new());
        let order: Vec<ElementId> = rendered.paths.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![first, second]);
    }

    #[test]
    fn test_render_pairs_paths_with_materials() {
        let mut scene = Scene::new();
        let id = scene.add(unit_line(-1.0));
        if let Some(element) = scene.get_mut(id) {
            element.set_material("stroke", "red");
        }
        let rendered = scene.render(&Camera::new());
        assert_eq!(rendered.paths[0].material.get("stroke"), Some(&"red".to_string()));
    }

    #[test]
    fn test_render_skips_failing_elements() {
        let mut scene = Scene::new();
        let bad = scene.add(Geometry::box_between(
            Point3::origin(),
            Point3::new(2.0, 2.0, 2.0),
        ));
        let good = scene.add(unit_line(-1.0));
        let rendered = scene.render(&Camera::new());
        assert_eq!(rendered.paths.len(), 1);
        assert_eq!(rendered.paths[0].id, good);
        assert_eq!(rendered.skipped.len(), 1);
        assert_eq!(rendered.skipped[0].0, bad);
    }

    #[test]
    fn test_render_drops_empty_tessellations() {
        let mut scene = Scene::new();
        scene.add(Geometry::sphere(Point3::origin(), -1.0));
        scene.add(Geometry::polyline(vec![Point3::origin()]));
        let rendered = scene.render(&Camera::new());
        assert!(rendered.paths.is_empty());
        assert!(rendered.skipped.is_empty());
    }
}
