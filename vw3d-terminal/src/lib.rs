//! Terminal preview for vector wireframe scenes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Point3;
use std::fs;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use vw3d_core::{Camera, Extents, Scene};

pub mod renderer;

pub use renderer::AsciiRasterizer;

/// Degrees per pan/tilt/roll key press.
const ANGLE_STEP: f64 = 5.0;
/// Picture-plane units per track or dolly key press.
const TRACK_STEP: f64 = 0.5;
/// Where the camera starts, back along +z from the scene origin.
const HOME_DISTANCE: f64 = 10.0;

/// Main application struct for the interactive preview
pub struct TerminalApp {
    scene: Scene,
    camera: Camera,
    rasterizer: AsciiRasterizer,
    home_extents: Extents,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    status: String,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let mut camera = Camera::new();
        // Terminal cells are roughly twice as tall as wide; widen the
        // window so geometry keeps its aspect on screen.
        let aspect = f64::from(width) / (f64::from(height) * 2.0);
        if aspect >= 1.0 {
            camera.set_extents(10.0 * aspect, 10.0);
        } else {
            camera.set_extents(10.0, 10.0 / aspect);
        }
        let home_extents = camera.extents();
        camera.move_by(0.0, 0.0, HOME_DISTANCE);

        Ok(Self {
            scene,
            camera,
            rasterizer: AsciiRasterizer::new(width as usize, height as usize),
            home_extents,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            status: String::new(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('a') => {
                    self.camera.pan(ANGLE_STEP, true);
                }
                KeyCode::Char('d') => {
                    self.camera.pan(-ANGLE_STEP, true);
                }
                KeyCode::Char('w') => {
                    self.camera.tilt(ANGLE_STEP, true);
                }
                KeyCode::Char('s') => {
                    self.camera.tilt(-ANGLE_STEP, true);
                }
                KeyCode::Char('q') => {
                    self.camera.rotate(ANGLE_STEP, true);
                }
                KeyCode::Char('e') => {
                    self.camera.rotate(-ANGLE_STEP, true);
                }
                KeyCode::Left => {
                    self.camera.track(-TRACK_STEP, 0.0);
                }
                KeyCode::Right => {
                    self.camera.track(TRACK_STEP, 0.0);
                }
                KeyCode::Up => {
                    self.camera.track(0.0, TRACK_STEP);
                }
                KeyCode::Down => {
                    self.camera.track(0.0, -TRACK_STEP);
                }
                KeyCode::Char('m') => {
                    self.dolly(TRACK_STEP);
                }
                KeyCode::Char('n') => {
                    self.dolly(-TRACK_STEP);
                }
                KeyCode::Char('f') => {
                    self.camera.look_at(Point3::origin());
                }
                KeyCode::Char('r') => {
                    self.reset_view();
                }
                KeyCode::Char('x') => {
                    self.export_svg()?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Step along the view direction; negative steps back away.
    fn dolly(&mut self, distance: f64) {
        let step = self.camera.view_direction() * distance;
        self.camera.move_by(step.x, step.y, step.z);
    }

    fn reset_view(&mut self) {
        self.camera.reset();
        self.camera
            .set_extents(self.home_extents.w, self.home_extents.h);
        self.camera.move_by(0.0, 0.0, HOME_DISTANCE);
        self.status.clear();
    }

    fn export_svg(&mut self) -> io::Result<()> {
        let rendered = self.scene.render(&self.camera);
        let markup = vw3d_svg::document(&rendered, self.camera.extents(), 800.0, 800.0);
        let path_count = rendered.paths.len();
        fs::write("view.svg", markup)?;
        self.status = format!("saved view.svg ({} paths)", path_count);
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let rendered = self.scene.render(&self.camera);

        self.rasterizer.clear();
        self.rasterizer.draw_paths(&rendered, self.camera.extents());

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.rasterizer.draw(&mut stdout)?;

        // Draw UI overlay
        let status = if self.status.is_empty() {
            String::new()
        } else {
            format!(" | {}", self.status)
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "VW3D Preview | FPS: {:.1} | A/D=Pan W/S=Tilt Q/E=Roll Arrows=Track M/N=Dolly F=Focus X=SVG R=Reset Esc=Quit{}",
                self.fps, status
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
