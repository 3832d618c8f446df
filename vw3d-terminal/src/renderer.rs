//! Character-grid rasterizer for projected cubic paths
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;
use vw3d_core::{Extents, Rendered};

/// Stroke characters from farthest to nearest.
const DEPTH_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Samples per cubic segment when flattening to line strokes.
const FLATTEN_STEPS: usize = 16;

/// Strokes picture-plane cubic paths into a character grid.
pub struct AsciiRasterizer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn clear(&mut self) {
        for c in &mut self.char_buffer {
            *c = ' ';
        }
    }

    /// Stroke every rendered sub-path into the grid.
    ///
    /// Paths arrive farthest first, so nearer strokes overwrite farther
    /// ones cell by cell. The stroke character encodes the depth band.
    pub fn draw_paths(&mut self, rendered: &Rendered<'_>, extents: Extents) {
        let (min_depth, max_depth) = depth_range(rendered);
        for path in &rendered.paths {
            let character = DEPTH_RAMP[depth_band(path.depth, min_depth, max_depth)];
            self.stroke_path(&path.points, extents, character);
        }
    }

    fn stroke_path(&mut self, points: &[Point2<f64>], extents: Extents, character: char) {
        for segment in points.chunks_exact(4) {
            let mut previous = self.to_cell(segment[0], extents);
            for step in 1..=FLATTEN_STEPS {
                let t = step as f64 / FLATTEN_STEPS as f64;
                let next = self.to_cell(cubic_point(segment, t), extents);
                self.stroke_line(previous, next, character);
                previous = next;
            }
        }
    }

    /// Map a picture-plane point to fractional cell coordinates, with the
    /// window centered and y flipped.
    fn to_cell(&self, p: Point2<f64>, extents: Extents) -> (f64, f64) {
        let nx = (p.x + extents.w / 2.0) / extents.w;
        let ny = (p.y + extents.h / 2.0) / extents.h;
        (
            nx * self.width as f64,
            (1.0 - ny) * self.height as f64,
        )
    }

    /// DDA stroke between two cell positions.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), character: char) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        let count = steps as usize;
        for i in 0..=count {
            let t = i as f64 / steps;
            self.plot(from.0 + dx * t, from.1 + dy * t, character);
        }
    }

    fn plot(&mut self, x: f64, y: f64, character: char) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (column, row) = (x as usize, y as usize);
        if column >= self.width || row >= self.height {
            return;
        }
        self.char_buffer[row * self.width + column] = character;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Evaluate a cubic Bezier segment at parameter `t`.
fn cubic_point(segment: &[Point2<f64>], t: f64) -> Point2<f64> {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point2::new(
        b0 * segment[0].x + b1 * segment[1].x + b2 * segment[2].x + b3 * segment[3].x,
        b0 * segment[0].y + b1 * segment[1].y + b2 * segment[2].y + b3 * segment[3].y,
    )
}

fn depth_range(rendered: &Rendered<'_>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for path in &rendered.paths {
        min = min.min(path.depth);
        max = max.max(path.depth);
    }
    (min, max)
}

/// Index into [`DEPTH_RAMP`]: near paths get the bright end.
fn depth_band(depth: f64, min: f64, max: f64) -> usize {
    if !(max > min) {
        return DEPTH_RAMP.len() - 1;
    }
    let nearness = 1.0 - (depth - min) / (max - min);
    ((nearness * (DEPTH_RAMP.len() - 1) as f64).round() as usize).min(DEPTH_RAMP.len() - 1)
}
