//! Orthographic projection of world sub-paths onto the picture plane
use crate::camera::Camera;
use crate::geometry::{WorldPath, KAPPA};
use crate::vector::{plane_coordinates, project_to_plane};
use nalgebra::{Point2, Vector3};

/// A sub-path in picture-plane coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPath {
    /// 4n control points, same layout as the world cubics.
    pub points: Vec<Point2<f64>>,
    /// Distance from the sub-path's camera-relative bounding-box center
    /// to that center's projection on the plane. Larger is farther away.
    pub depth: f64,
}

/// Project one world sub-path onto the camera's picture plane.
///
/// Points are taken relative to the camera position, flattened along the
/// plane normal, and expressed in `basis.x`/`basis.y` coordinates. A disc
/// becomes a four-arc cubic circle around its projected center, which is
/// where the view-dependent sphere outline finally takes shape. Sub-paths
/// with no points yield `None`.
pub fn project_path(camera: &Camera, path: &WorldPath) -> Option<ProjectedPath> {
    let (position, normal) = camera.compile();
    let basis = camera.stage();
    match path {
        WorldPath::Cubics(points) => {
            if points.is_empty() {
                return None;
            }
            let relative: Vec<Vector3<f64>> = points.iter().map(|p| p - position).collect();
            let projected = relative
                .iter()
                .map(|&q| plane_coordinates(project_to_plane(q, normal), basis.x, basis.y))
                .collect();
            Some(ProjectedPath {
                points: projected,
                depth: bounds_center_depth(&relative, normal),
            })
        }
        WorldPath::Disc { center, radius } => {
            let relative = center - position;
            let center_2d =
                plane_coordinates(project_to_plane(relative, normal), basis.x, basis.y);
            Some(ProjectedPath {
                points: circle(center_2d, *radius),
                depth: point_depth(relative, normal),
            })
        }
    }
}

/// Distance from a camera-relative point to its projection on the plane.
fn point_depth(q: Vector3<f64>, normal: Vector3<f64>) -> f64 {
    (q - project_to_plane(q, normal)).norm()
}

fn bounds_center_depth(relative: &[Vector3<f64>], normal: Vector3<f64>) -> f64 {
    let mut min = relative[0];
    let mut max = relative[0];
    for q in &relative[1..] {
        min.x = min.x.min(q.x);
        min.y = min.y.min(q.y);
        min.z = min.z.min(q.z);
        max.x = max.x.max(q.x);
        max.y = max.y.max(q.y);
        max.z = max.z.max(q.z);
    }
    point_depth((min + max) * 0.5, normal)
}

/// Four-arc cubic approximation of a circle: 16 control points starting
/// at the +x extreme and winding counterclockwise, seam points repeated.
fn circle(center: Point2<f64>, radius: f64) -> Vec<Point2<f64>> {
    let (cx, cy) = (center.x, center.y);
    let r = radius;
    let k = KAPPA * radius;
    vec![
        Point2::new(cx + r, cy),
        Point2::new(cx + r, cy + k),
        Point2::new(cx + k, cy + r),
        Point2::new(cx, cy + r),
        Point2::new(cx, cy + r),
        Point2::new(cx - k, cy + r),
        Point2::new(cx - r, cy + k),
        Point2::new(cx - r, cy),
        Point2::new(cx - r, cy),
        Point2::new(cx - r, cy - k),
        Point2::new(cx - k, cy - r),
        Point2::new(cx, cy - r),
        Point2::new(cx, cy - r),
        Point2::new(cx + k, cy - r),
        Point2::new(cx + r, cy - k),
        Point2::new(cx + r, cy),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{tessellate, Geometry};
    use nalgebra::Point3;

    fn assert_2d(p: Point2<f64>, x: f64, y: f64) {
        assert!(
            (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9,
            "got {:?}, expected ({}, {})",
            p,
            x,
            y
        );
    }

    fn project_first(camera: &Camera, geometry: &Geometry) -> ProjectedPath {
        let paths = tessellate(geometry).unwrap();
        project_path(camera, &paths[0]).unwrap()
    }

    #[test]
    fn test_line_on_plane_projects_in_place() {
        let camera = Camera::new();
        let line = Geometry::line(Point3::origin(), Point3::new(10.0, 0.0, 0.0));
        let projected = project_first(&camera, &line);
        assert_eq!(projected.points.len(), 4);
        assert_2d(projected.points[0], 0.0, 0.0);
        assert_2d(projected.points[1], 10.0 / 3.0, 0.0);
        assert_2d(projected.points[2], 20.0 / 3.0, 0.0);
        assert_2d(projected.points[3], 10.0, 0.0);
        assert!(projected.depth.abs() < 1e-9);
    }

    #[test]
    fn test_depth_grows_away_from_plane() {
        let camera = Camera::new();
        let near = Geometry::line(Point3::new(0.0, 0.0, -2.0), Point3::new(1.0, 0.0, -2.0));
        let far = Geometry::line(Point3::new(0.0, 0.0, -5.0), Point3::new(1.0, 0.0, -5.0));
        let near = project_first(&camera, &near);
        let far = project_first(&camera, &far);
        assert!((near.depth - 2.0).abs() < 1e-9);
        assert!((far.depth - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_depth_ignores_in_plane_extent() {
        // A long diagonal and a short segment at the same offset have the
        // same depth.
        let camera = Camera::new();
        let wide = Geometry::line(
            Point3::new(-50.0, -50.0, -3.0),
            Point3::new(50.0, 50.0, -3.0),
        );
        let narrow = Geometry::line(Point3::new(0.0, 0.0, -3.0), Point3::new(0.1, 0.0, -3.0));
        let wide = project_first(&camera, &wide);
        let narrow = project_first(&camera, &narrow);
        assert!((wide.depth - narrow.depth).abs() < 1e-9);
    }

    #[test]
    fn test_camera_position_offsets_projection() {
        let mut camera = Camera::new();
        camera.set_position(Point3::new(2.0, 1.0, 0.0));
        let line = Geometry::line(Point3::origin(), Point3::new(10.0, 0.0, 0.0));
        let projected = project_first(&camera, &line);
        assert_2d(projected.points[0], -2.0, -1.0);
        assert_2d(projected.points[3], 8.0, -1.0);
    }

    #[test]
    fn test_panned_camera_foreshortens() {
        // After a quarter pan the plane normal is +x, so a segment along
        // x collapses to a point and its depth is measured along x.
        let mut camera = Camera::new();
        camera.pan(90.0, true);
        let line = Geometry::line(Point3::new(-4.0, 0.0, 0.0), Point3::new(-6.0, 0.0, 0.0));
        let projected = project_first(&camera, &line);
        for p in &projected.points {
            assert!(p.x.abs() < 1e-9);
            assert!(p.y.abs() < 1e-9);
        }
        assert!((projected.depth - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_outline_circle() {
        let camera = Camera::new();
        let sphere = Geometry::sphere(Point3::new(0.0, 1.0, -4.0), 2.0);
        let projected = project_first(&camera, &sphere);
        assert_eq!(projected.points.len(), 16);
        assert!((projected.depth - 4.0).abs() < 1e-9);
        // Arc extremes sit on the axis-aligned circle around (0, 1).
        assert_2d(projected.points[0], 2.0, 1.0);
        assert_2d(projected.points[3], 0.0, 3.0);
        assert_2d(projected.points[7], -2.0, 1.0);
        assert_2d(projected.points[11], 0.0, -1.0);
        assert_2d(projected.points[15], 2.0, 1.0);
        // Handle length follows the quarter-circle constant.
        assert_2d(projected.points[1], 2.0, 1.0 + KAPPA * 2.0);
    }

    #[test]
    fn test_sphere_outline_is_view_independent_in_size() {
        // Rotating the camera moves the outline but never distorts it.
        let mut camera = Camera::new();
        camera.pan(37.0, true);
        camera.tilt(-12.0, true);
        let sphere = Geometry::sphere(Point3::new(1.0, 2.0, -6.0), 1.5);
        let projected = project_first(&camera, &sphere);
        let first = projected.points[0];
        let mid = projected.points[7];
        // Opposite extremes are a diameter apart.
        assert!(((first - mid).norm() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_cubics_yield_none() {
        let camera = Camera::new();
        assert!(project_path(&camera, &WorldPath::Cubics(Vec::new())).is_none());
    }
}
