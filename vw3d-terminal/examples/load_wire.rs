//! Example: Load and preview a wire geometry file in the terminal
//!
//! Usage: cargo run --example load_wire -- path/to/file.wire

use std::env;
use std::fs;
use std::io;
use vw3d_core::{parse_wire, Geometry, Scene};
use vw3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <wire-file>", args[0]);
        eprintln!("\nNo wire file provided, using a default scene...");
        let mut scene = Scene::new();
        scene.add(Geometry::box_between(
            nalgebra::Point3::new(-2.0, -2.0, -4.0),
            nalgebra::Point3::new(2.0, 2.0, -4.1),
        ));
        scene.add(Geometry::sphere(nalgebra::Point3::new(0.0, 0.0, -4.0), 1.0));
        let mut app = TerminalApp::new(scene)?;
        return app.run();
    }

    let wire_path = &args[1];

    println!("Loading wire file: {}", wire_path);

    let data = fs::read(wire_path).map_err(|e| {
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

    println!("Loaded {} elements", geometries.len());
    println!("Starting terminal preview (press ESC to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut scene = Scene::new();
    for geometry in geometries {
        scene.add(geometry);
    }

    let mut app = TerminalApp::new(scene)?;
    app.run()?;

    println!("Thank you for using VW3D Terminal Preview!");
    Ok(())
}
