//! VW3D Terminal Demo - Drafting table scene
//!
//! Previews a wire file, or a built-in demo scene when no path is given.
//! Usage: vw3d-terminal [path/to/file.wire]
//!
//! Controls:
//!   - A/D, W/S: Pan and tilt
//!   - Q/E: Roll the picture plane
//!   - Arrow Keys: Track across the plane
//!   - M/N: Dolly in and out
//!   - F: Look at the origin, R: Reset, X: Export view.svg
//!   - ESC: Quit

use nalgebra::Point3;
use std::env;
use std::fs;
use std::io;
use vw3d_core::{parse_wire, Geometry, Scene};
use vw3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    println!("VW3D Terminal Preview - Loading...");

    let args: Vec<String> = env::args().collect();
    let scene = match args.get(1) {
        Some(path) => load_scene(path)?,
        None => demo_scene(),
    };

    println!("Starting terminal preview (press ESC to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    // Run the terminal app
    let mut app = TerminalApp::new(scene)?;
    app.run()?;

    println!("Thank you for using VW3D Terminal Preview!");
    Ok(())
}

fn load_scene(path: &str) -> io::Result<Scene> {
    let data = fs::read(path).map_err(|e| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("Failed to read wire file: {}", e),
        )
    })?;
    let geometries = parse_wire(&data).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse wire file: {}", e),
        )
    })?;
    println!("Loaded {} elements from {}", geometries.len(), path);

    let mut scene = Scene::new();
    for geometry in geometries {
        scene.add(geometry);
    }
    Ok(scene)
}

/// Ground grid, a shallow box, a sphere, and a closed triangle.
fn demo_scene() -> Scene {
    let mut scene = Scene::new();

    for i in -2..=2 {
        let offset = f64::from(i) * 2.0;
        scene.add(Geometry::line(
            Point3::new(-4.0, -2.0, offset - 4.0),
            Point3::new(4.0, -2.0, offset - 4.0),
        ));
        scene.add(Geometry::line(
            Point3::new(offset, -2.0, -8.0),
            Point3::new(offset, -2.0, 0.0),
        ));
    }

    let slab = scene.add(Geometry::box_between(
        Point3::new(-2.5, -2.0, -4.0),
        Point3::new(-0.5, 0.0, -4.2),
    ));
    if let Some(element) = scene.get_mut(slab) {
        element.set_material("stroke", "steelblue");
        element.set_material("stroke-width", "1mm");
    }

    scene.add(Geometry::sphere(Point3::new(1.5, -0.5, -4.0), 1.5));

    scene.add(Geometry::closed_polyline(vec![
        Point3::new(-1.0, -2.0, -2.0),
        Point3::new(0.0, 0.5, -2.0),
        Point3::new(1.0, -2.0, -2.0),
    ]));

    scene
}
