use std::io::{self, BufWriter, Stdout, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::constants::{GLOW_TEXTURE_SIZE, WORLD_HEIGHT};
use crate::simulation::Viewport;
use crate::types::{Rgb, Rgba, Vector2D};

/// Receives draw submissions in draw order; later submissions paint over earlier ones.
pub trait DrawSink {
    fn draw_circle(&mut self, center: Vector2D, radius: f64, color: Rgba);
    /// A soft glow the size of the light texture scaled by `scale`.
    fn draw_glow(&mut self, center: Vector2D, scale: f64, color: Rgba);
}

// --- ScreenBuffer for headless debug runs ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    cursor_x: u16,
    cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn print_to_log(&self, frame: u64) {
        info!("--- Frame {} ---", frame);
        for y in 0..self.height {
            info!("{}", self.row(y));
        }
    }
}

// --- OutputTarget: the real terminal or the in-memory screen buffer ---
pub enum OutputTarget {
    Stdout(BufWriter<Stdout>),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn stdout() -> Self {
        OutputTarget::Stdout(BufWriter::with_capacity(1024 * 64, io::stdout()))
    }

    pub fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, MoveTo(x, y)),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(x, y);
                Ok(())
            }
        }
    }

    /// Queues a terminal command; the screen buffer has no use for styling and drops it.
    pub fn queue_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }

    pub fn execute_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- Canvas: half-block pixels, two per terminal cell ---
pub struct Canvas {
    pixels: Vec<Rgb>,
    width: usize,
    height: usize,
    scale: f64, // World units per pixel
}

impl Canvas {
    pub fn new(columns: u16, rows: u16) -> Self {
        let width = columns.max(1) as usize;
        let height = rows.max(1) as usize * 2;
        Canvas {
            pixels: vec![Rgb::BLACK; width * height],
            width,
            height,
            scale: WORLD_HEIGHT / height as f64,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport { width: self.width as f64 * self.scale, height: self.height as f64 * self.scale }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgb::BLACK);
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_black()).count()
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb, opacity: f64) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = self.pixels[idx].interpolated(color, opacity);
    }

    /// Visits every pixel whose center lies within `radius` pixels of `(cx, cy)`.
    fn for_each_in_disk(&mut self, cx: f64, cy: f64, radius: f64, mut paint: impl FnMut(&mut Self, i64, i64, f64)) {
        let min_x = (cx - radius).floor() as i64;
        let max_x = (cx + radius).ceil() as i64;
        let min_y = (cy - radius).floor() as i64;
        let max_y = (cy + radius).ceil() as i64;
        for y in min_y.max(0)..=max_y.min(self.height as i64 - 1) {
            for x in min_x.max(0)..=max_x.min(self.width as i64 - 1) {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance <= radius {
                    paint(self, x, y, distance);
                }
            }
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        let mut current: Option<(Option<Rgb>, Option<Rgb>)> = None;
        for row in 0..self.height / 2 {
            stdout.move_to(0, row as u16)?;
            for x in 0..self.width {
                let top = self.pixels[2 * row * self.width + x];
                let bottom = self.pixels[(2 * row + 1) * self.width + x];
                let (glyph, fg, bg) = match (top.is_black(), bottom.is_black()) {
                    (true, true) => (' ', None, None),
                    (false, true) => ('▀', Some(top), None),
                    (true, false) => ('▄', Some(bottom), None),
                    (false, false) => ('▀', Some(top), Some(bottom)),
                };
                // Spaces only show the background, so skip foreground changes for them
                let wanted = if glyph == ' ' { (current.and_then(|c| c.0), bg) } else { (fg, bg) };
                if current != Some(wanted) {
                    stdout.queue_command(SetForegroundColor(terminal_color(wanted.0)))?;
                    stdout.queue_command(SetBackgroundColor(terminal_color(wanted.1)))?;
                    current = Some(wanted);
                }
                write!(stdout, "{}", glyph)?;
            }
        }
        stdout.queue_command(ResetColor)?;
        Ok(())
    }
}

fn terminal_color(color: Option<Rgb>) -> Color {
    match color {
        Some(c) => Color::Rgb { r: c.r, g: c.g, b: c.b },
        None => Color::Reset,
    }
}

impl DrawSink for Canvas {
    fn draw_circle(&mut self, center: Vector2D, radius: f64, color: Rgba) {
        let cx = center.x / self.scale;
        let cy = center.y / self.scale;
        let r = radius / self.scale;
        let rgb = color.rgb();
        let opacity = color.opacity();
        if r < 0.75 {
            self.blend(cx.floor() as i64, cy.floor() as i64, rgb, opacity);
            return;
        }
        self.for_each_in_disk(cx, cy, r, |canvas, x, y, _| canvas.blend(x, y, rgb, opacity));
    }

    fn draw_glow(&mut self, center: Vector2D, scale: f64, color: Rgba) {
        let r = GLOW_TEXTURE_SIZE * scale / 2.0 / self.scale;
        if r <= 0.0 || color.a == 0 {
            return;
        }
        let rgb = color.rgb();
        let opacity = color.opacity();
        self.for_each_in_disk(center.x / self.scale, center.y / self.scale, r, |canvas, x, y, distance| {
            let falloff = 1.0 - distance / r;
            canvas.blend(x, y, rgb, opacity * falloff * falloff);
        });
    }
}

#[cfg(test)]
pub mod test_support {
    use super::DrawSink;
    use crate::types::{Rgba, Vector2D};

    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawCall {
        Circle { center: Vector2D, radius: f64, color: Rgba },
        Glow { center: Vector2D, scale: f64, color: Rgba },
    }

    /// Records submissions so tests can assert on draw order.
    #[derive(Default)]
    pub struct RecordingSink {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSink {
        pub fn circles(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, DrawCall::Circle { .. })).count()
        }

        pub fn glows(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, DrawCall::Glow { .. })).count()
        }
    }

    impl DrawSink for RecordingSink {
        fn draw_circle(&mut self, center: Vector2D, radius: f64, color: Rgba) {
            self.calls.push(DrawCall::Circle { center, radius, color });
        }

        fn draw_glow(&mut self, center: Vector2D, scale: f64, color: Rgba) {
            self.calls.push(DrawCall::Glow { center, scale, color });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_follows_terminal_aspect() {
        let canvas = Canvas::new(80, 24);
        let viewport = canvas.viewport();
        assert!((viewport.height - WORLD_HEIGHT).abs() < 1e-9);
        assert!((viewport.width - 80.0 * WORLD_HEIGHT / 48.0).abs() < 1e-9);
    }

    #[test]
    fn small_circle_lights_one_pixel() {
        let mut canvas = Canvas::new(10, 5);
        let scale = WORLD_HEIGHT / 10.0;
        canvas.draw_circle(Vector2D::new(3.5 * scale, 2.5 * scale), 1.0, Rgb::WHITE.with_alpha(255));
        assert_eq!(canvas.lit_pixels(), 1);
        assert_eq!(canvas.pixel(3, 2), Some(Rgb::WHITE));
    }

    #[test]
    fn large_circle_fills_a_disk() {
        let mut canvas = Canvas::new(20, 10);
        let scale = WORLD_HEIGHT / 20.0;
        canvas.draw_circle(Vector2D::new(10.0 * scale, 10.0 * scale), 3.0 * scale, Rgb::new(255, 0, 0).with_alpha(255));
        assert!(canvas.lit_pixels() > 20);
        assert_eq!(canvas.pixel(10, 10), Some(Rgb::new(255, 0, 0)));
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn offscreen_draws_are_ignored() {
        let mut canvas = Canvas::new(10, 5);
        canvas.draw_circle(Vector2D::new(-500.0, -500.0), 2.0, Rgb::WHITE.with_alpha(255));
        canvas.draw_circle(Vector2D::new(1.0e6, 1.0e6), 50.0, Rgb::WHITE.with_alpha(255));
        assert_eq!(canvas.lit_pixels(), 0);
    }

    #[test]
    fn glow_fades_with_distance() {
        let mut canvas = Canvas::new(80, 24);
        let scale = WORLD_HEIGHT / 48.0;
        canvas.draw_glow(Vector2D::new(40.5 * scale, 24.5 * scale), 1.1, Rgb::WHITE.with_alpha(100));
        let center = canvas.pixel(40, 24).unwrap_or(Rgb::BLACK);
        let edge = canvas.pixel(50, 24).unwrap_or(Rgb::BLACK);
        assert!(center.r > edge.r);
        assert!(center.r <= 100);
    }

    #[test]
    fn transparent_glow_draws_nothing() {
        let mut canvas = Canvas::new(10, 5);
        canvas.draw_glow(Vector2D::new(100.0, 100.0), 1.1, Rgb::WHITE.with_alpha(0));
        assert_eq!(canvas.lit_pixels(), 0);
    }

    #[test]
    fn renders_half_blocks_into_screen_buffer() {
        let mut canvas = Canvas::new(4, 2);
        let scale = WORLD_HEIGHT / 4.0;
        // Top pixel of cell (1, 0) and bottom pixel of cell (2, 1)
        canvas.draw_circle(Vector2D::new(1.5 * scale, 0.5 * scale), 1.0, Rgb::WHITE.with_alpha(255));
        canvas.draw_circle(Vector2D::new(2.5 * scale, 3.5 * scale), 1.0, Rgb::WHITE.with_alpha(255));
        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(4, 2));
        canvas.render(&mut target).unwrap();
        match target {
            OutputTarget::ScreenBuffer(sb) => {
                assert_eq!(sb.row(0), " ▀  ");
                assert_eq!(sb.row(1), "  ▄ ");
            }
            OutputTarget::Stdout(_) => panic!("expected a screen buffer"),
        }
    }
}
