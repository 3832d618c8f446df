//! VW3D SVG Library - Markup serialization for rendered scenes
//!
//! Turns the depth-sorted output of [`vw3d_core::Scene::render`] into an
//! SVG document. The camera's logical window, centered on the picture
//! plane origin, maps onto the requested canvas with the y axis flipped,
//! since SVG y grows downward.

use nalgebra::Point2;
use vw3d_core::{Extents, Material, Rendered, RenderedPath};

/// Stroke attributes for elements whose material is empty.
const DEFAULT_STYLE: &str =
    r#"stroke="black" fill="none" stroke-linecap="round" stroke-width="0.7mm""#;

/// Mapping from picture-plane coordinates to canvas pixels.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    fn new(extents: Extents, width: f64, height: f64) -> Self {
        Self {
            x_min: extents.w / -2.0,
            x_max: extents.w / 2.0,
            y_min: extents.h / -2.0,
            y_max: extents.h / 2.0,
            width,
            height,
        }
    }

    fn to_x(&self, v: f64) -> f64 {
        normalize(self.x_min, self.x_max, v) * self.width
    }

    fn to_y(&self, v: f64) -> f64 {
        self.height - normalize(self.y_min, self.y_max, v) * self.height
    }
}

fn normalize(min: f64, max: f64, value: f64) -> f64 {
    (value - min) / (max - min)
}

/// Build a complete SVG document from a render pass.
///
/// Paths are written in the order they arrive, which the render pass
/// guarantees is farthest first.
pub fn document(rendered: &Rendered<'_>, extents: Extents, width: f64, height: f64) -> String {
    let viewport = Viewport::new(extents, width, height);
    let mut lines = Vec::with_capacity(rendered.paths.len() + 2);
    lines.push(format!(
        r#"<svg version="1.1" width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
        coord(width),
        coord(height),
    ));
    for path in &rendered.paths {
        if let Some(markup) = path_markup(path, &viewport) {
            lines.push(markup);
        }
    }
    lines.push("</svg>".to_string());
    lines.join("\n")
}

/// One `<path>` element, or `None` without a full cubic segment.
fn path_markup(path: &RenderedPath<'_>, viewport: &Viewport) -> Option<String> {
    let d = path_data(&path.points, viewport)?;
    Some(format!(
        r#"<path d="{}" {} />"#,
        d,
        style_attributes(path.material)
    ))
}

/// Cubic path data: one `M` at the first point, then a `C` per 4-point
/// segment. Each segment's repeated start point is skipped.
fn path_data(points: &[Point2<f64>], viewport: &Viewport) -> Option<String> {
    if points.len() < 4 {
        return None;
    }
    let mut d = vec![format!(
        "M {} {}",
        coord(viewport.to_x(points[0].x)),
        coord(viewport.to_y(points[0].y)),
    )];
    for segment in points.chunks_exact(4) {
        d.push(format!(
            "C {} {} {} {} {} {}",
            coord(viewport.to_x(segment[1].x)),
            coord(viewport.to_y(segment[1].y)),
            coord(viewport.to_x(segment[2].x)),
            coord(viewport.to_y(segment[2].y)),
            coord(viewport.to_x(segment[3].x)),
            coord(viewport.to_y(segment[3].y)),
        ));
    }
    Some(d.join(" "))
}

/// Material entries as XML attributes, sorted by key so output is stable;
/// an empty material falls back to [`DEFAULT_STYLE`].
fn style_attributes(material: &Material) -> String {
    if material.is_empty() {
        return DEFAULT_STYLE.to_string();
    }
    let mut entries: Vec<(&String, &String)> = material.iter().collect();
    entries.sort();
    let attributes: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!(r#"{}="{}""#, escape(key), escape(value)))
        .collect();
    attributes.join(" ")
}

/// Minimal XML attribute escaping.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format a coordinate with at most four decimals and no trailing zeros.
fn coord(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
