//! Drawable primitives and their tessellation into cubic control points
use crate::error::GeometryError;
use crate::vector::EPS;
use nalgebra::Point3;

/// Quarter-circle cubic handle length, as a fraction of the radius.
pub const KAPPA: f64 = 0.5519150244;

/// How far apart two box corners may sit on an axis and still be treated
/// as spanning a face orthogonal to it.
pub const BOX_FACE_TOLERANCE: f64 = 1.0;

/// A drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Straight segment between two points.
    LineCurve { from: Point3<f64>, to: Point3<f64> },
    /// Connected straight segments through `points`; `closed` joins the
    /// last point back to the first.
    Polyline { points: Vec<Point3<f64>>, closed: bool },
    /// Box given by two opposite corners. Only the orthogonal face the
    /// corners span is drawn.
    Box { min: Point3<f64>, max: Point3<f64> },
    /// Sphere, drawn as its outline circle on the picture plane.
    Sphere { center: Point3<f64>, radius: f64 },
}

impl Geometry {
    pub fn line(from: Point3<f64>, to: Point3<f64>) -> Self {
        Self::LineCurve { from, to }
    }

    pub fn polyline(points: Vec<Point3<f64>>) -> Self {
        Self::Polyline {
            points,
            closed: false,
        }
    }

    pub fn closed_polyline(points: Vec<Point3<f64>>) -> Self {
        Self::Polyline {
            points,
            closed: true,
        }
    }

    pub fn box_between(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self::Box { min, max }
    }

    pub fn sphere(center: Point3<f64>, radius: f64) -> Self {
        Self::Sphere { center, radius }
    }
}

/// A world-space sub-path produced by tessellation.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldPath {
    /// 4n control points: start, two controls, end per cubic segment,
    /// with the shared point repeated between consecutive segments.
    Cubics(Vec<Point3<f64>>),
    /// Sphere outline. Its circle depends on the camera, so only center
    /// and radius are fixed in world space.
    Disc { center: Point3<f64>, radius: f64 },
}

/// Convert a primitive into world-space sub-paths.
///
/// Primitives with nothing to draw (zero-length lines, polylines with
/// fewer than two points, non-positive sphere radii) yield no sub-paths
/// rather than an error. A box whose corners agree on no axis within
/// [`BOX_FACE_TOLERANCE`] fails with [`GeometryError::DegenerateBox`].
pub fn tessellate(geometry: &Geometry) -> Result<Vec<WorldPath>, GeometryError> {
    match geometry {
        Geometry::LineCurve { from, to } => {
            if (to - from).norm() < EPS {
                log::debug!("line endpoints coincide; nothing to draw");
                return Ok(Vec::new());
            }
            Ok(vec![WorldPath::Cubics(straight_segment(*from, *to).to_vec())])
        }
        Geometry::Polyline { points, closed } => Ok(tessellate_polyline(points, *closed)),
        Geometry::Box { min, max } => Ok(vec![WorldPath::Cubics(orthogonal_face(*min, *max)?)]),
        Geometry::Sphere { center, radius } => {
            if *radius <= 0.0 {
                log::debug!("sphere radius {} is not positive; nothing to draw", radius);
                return Ok(Vec::new());
            }
            Ok(vec![WorldPath::Disc {
                center: *center,
                radius: *radius,
            }])
        }
    }
}

/// One straight cubic with controls at the 1/3 and 2/3 marks.
fn straight_segment(a: Point3<f64>, b: Point3<f64>) -> [Point3<f64>; 4] {
    let d = b - a;
    [a, a + d / 3.0, a + d * (2.0 / 3.0), b]
}

/// One straight cubic with both controls at the segment midpoint.
fn midpoint_segment(a: Point3<f64>, b: Point3<f64>) -> [Point3<f64>; 4] {
    let m = nalgebra::center(&a, &b);
    [a, m, m, b]
}

fn tessellate_polyline(points: &[Point3<f64>], closed: bool) -> Vec<WorldPath> {
    if points.len() < 2 {
        log::debug!("polyline with {} points; nothing to draw", points.len());
        return Vec::new();
    }
    let mut pts = points.to_vec();
    if closed {
        pts.push(pts[0]);
    }
    let mut controls = Vec::with_capacity((pts.len() - 1) * 4);
    for pair in pts.windows(2) {
        controls.extend(straight_segment(pair[0], pair[1]));
    }
    vec![WorldPath::Cubics(controls)]
}

/// The four edges of the rectangle the corners `a` and `b` span in the
/// plane of their agreeing axis, each edge a midpoint-control cubic.
///
/// Agreement is checked on z, then y, then x; the closest axis within
/// [`BOX_FACE_TOLERANCE`] wins. The face keeps `a`'s coordinate on the
/// agreeing axis and winds a -> b -> a through the two mixed corners.
fn orthogonal_face(a: Point3<f64>, b: Point3<f64>) -> Result<Vec<Point3<f64>>, GeometryError> {
    let gaps = [(a.z - b.z).abs(), (a.y - b.y).abs(), (a.x - b.x).abs()];
    let mut axis = 0;
    for (i, gap) in gaps.iter().enumerate() {
        if *gap < gaps[axis] {
            axis = i;
        }
    }
    if gaps[axis] >= BOX_FACE_TOLERANCE {
        return Err(GeometryError::DegenerateBox {
            tolerance: BOX_FACE_TOLERANCE,
        });
    }

    let quad = match axis {
        // Face in the xy plane at z = a.z
        0 => [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, b.y, a.z),
        ],
        // Face in the xz plane at y = a.y
        1 => [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, a.y, b.z),
        ],
        // Face in the yz plane at x = a.x
        _ => [
            Point3::new(a.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(a.x, a.y, b.z),
        ],
    };

    let mut controls = Vec::with_capacity(16);
    for i in 0..4 {
        controls.extend(midpoint_segment(quad[i], quad[(i + 1) % 4]));
    }
    Ok(controls)
}
