//! Demo state: rotation, loop control and frame timing
//!
//! Kept free of windowing calls so the per-frame logic can be tested
//! without a display.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, PI};

use crate::config::DemoConfig;
use crate::rasterizer::{Color, Rasterizer, Vec2, Vertex};

/// Whether the main loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Tracks frame times and reports an FPS figure about once per second
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    elapsed: f32,
    frames: u32,
    last_fps: Option<u32>,
}

impl FrameTimer {
    /// Record a frame; returns the frames per second when a report is due
    pub fn tick(&mut self, dt: f32) -> Option<u32> {
        if dt <= 0.0 || !dt.is_finite() {
            return None;
        }

        self.elapsed += dt;
        self.frames += 1;

        if self.elapsed < 1.0 {
            return None;
        }

        let fps = (self.frames as f32 / self.elapsed).round() as u32;
        self.elapsed = 0.0;
        self.frames = 0;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// Most recent report, if a full second has passed
    pub fn fps(&self) -> Option<u32> {
        self.last_fps
    }
}

/// Spinning triangle state
pub struct DemoState {
    /// Current rotation in radians
    pub rotation: f32,
    pub paused: bool,
    pub wireframe: bool,
    pub control: LoopControl,
    pub timer: FrameTimer,
    /// Screenshots saved so far (used to number files)
    pub screenshots: u32,

    center: Vec2,
    radius: f32,
    rotation_speed: f32,
    colors: [Color; 3],
    clear_color: Color,
}

impl DemoState {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            rotation: 0.0,
            paused: false,
            wireframe: config.wireframe,
            control: LoopControl::Continue,
            timer: FrameTimer::default(),
            screenshots: 0,
            center: Vec2::new(config.width as f32 / 2.0, config.height as f32 / 2.0),
            radius: config.radius,
            rotation_speed: config.rotation_speed,
            colors: config.vertex_colors,
            clear_color: config.clear_color,
        }
    }

    pub fn is_running(&self) -> bool {
        self.control == LoopControl::Continue
    }

    pub fn quit(&mut self) {
        self.control = LoopControl::Quit;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
    }

    /// Advance the animation by `dt` seconds
    ///
    /// Returns an FPS figure when one is due for reporting. Frames with no
    /// elapsed time leave the rotation untouched.
    pub fn advance(&mut self, dt: f32) -> Option<u32> {
        let report = self.timer.tick(dt);
        if dt > 0.0 && dt.is_finite() && !self.paused {
            self.rotation = (self.rotation + self.rotation_speed * dt) % (2.0 * PI);
        }
        report
    }

    /// The three vertices for the current rotation
    pub fn triangle(&self) -> [Vertex; 3] {
        let r = self.rotation;
        let angles = [r - FRAC_PI_6, r + FRAC_PI_2, r + PI + FRAC_PI_6];

        let mut vertices = [Vertex::default(); 3];
        for ((vertex, angle), color) in vertices.iter_mut().zip(angles).zip(self.colors) {
            let pos = self.center + Vec2::from_angle(angle) * self.radius;
            *vertex = Vertex::new(pos.x, pos.y, color);
        }
        vertices
    }

    /// Draw one frame: clear, fill, and optionally outline
    pub fn render(&self, rast: &mut Rasterizer<'_>) {
        rast.set_clear_color(self.clear_color);
        rast.clear();

        let [v1, v2, v3] = self.triangle();
        rast.draw_triangle(v1, v2, v3);

        if self.wireframe {
            let outline = |v: Vertex| Vertex { color: Color::WHITE, ..v };
            rast.draw_line(outline(v1), outline(v2));
            rast.draw_line(outline(v2), outline(v3));
            rast.draw_line(outline(v3), outline(v1));
        }
    }
}
