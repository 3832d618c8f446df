//! VW3D Core Library - Camera, geometry, and projection pipeline
//!
//! This library provides the stateless core for vector wireframe
//! rendering: primitives tessellated into cubic control points, an
//! orthographic projection onto a movable picture plane, and depth
//! sorting for painter-order output. Serialization to markup lives in
//! the frontend crates.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod import;
pub mod projection;
pub mod scene;
pub mod vector;

// Re-export commonly used types
pub use camera::{Basis, Camera, Extents};
pub use error::{GeometryError, ImportError};
pub use geometry::{tessellate, Geometry, WorldPath};
pub use import::{parse_record, parse_wire};
pub use projection::{project_path, ProjectedPath};
pub use scene::{Element, ElementId, Material, Rendered, RenderedPath, Scene};
