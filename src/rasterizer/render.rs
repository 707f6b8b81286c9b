//! Pixel writing: points, lines and Gouraud-shaded triangles
//!
//! The rasterizer never owns pixels. Callers bind a borrowed `&mut [u32]`
//! each frame with `set_frame_buffer`, draw, and drop the rasterizer (or
//! call `release_frame_buffer`) before presenting. Every write is clipped
//! against width/height and against the slice itself, so out-of-range
//! coordinates and short buffers are silently ignored.

use log::{debug, warn};

use super::scanline::{spans_between_edges, triangle_spans_in, Edge, Span};
use super::types::{Color, PixelFormat, Vertex};

/// Coordinate types accepted by [`Rasterizer::set_pixel`]
pub trait PixelCoord: Copy {
    /// Whole pixel coordinate, or None if the value addresses no pixel
    fn to_pixel(self) -> Option<i64>;
}

impl PixelCoord for u32 {
    fn to_pixel(self) -> Option<i64> {
        Some(i64::from(self))
    }
}

impl PixelCoord for i32 {
    fn to_pixel(self) -> Option<i64> {
        Some(i64::from(self))
    }
}

impl PixelCoord for usize {
    fn to_pixel(self) -> Option<i64> {
        i64::try_from(self).ok()
    }
}

/// Floats are floored: pixel (x, y) covers [x, x+1) x [y, y+1).
impl PixelCoord for f32 {
    fn to_pixel(self) -> Option<i64> {
        if self.is_finite() {
            Some(self.floor() as i64)
        } else {
            None
        }
    }
}

/// Scanline rasterizer over a borrowed frame buffer
pub struct Rasterizer<'a> {
    frame_buffer: Option<&'a mut [u32]>,
    width: usize,
    height: usize,
    format: PixelFormat,
    clear_color: Color,
}

impl<'a> Rasterizer<'a> {
    /// Unbound rasterizer; every draw is a no-op until a buffer is set
    pub fn new() -> Self {
        Self {
            frame_buffer: None,
            width: 0,
            height: 0,
            format: PixelFormat::default(),
            clear_color: Color::TRANSPARENT,
        }
    }

    pub fn with_buffer(frame_buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let mut rast = Self::new();
        rast.set_frame_buffer(frame_buffer, width, height);
        rast
    }

    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Bind a row-major buffer of `width * height` pixels (stride == width)
    pub fn set_frame_buffer(&mut self, frame_buffer: &'a mut [u32], width: usize, height: usize) {
        match width.checked_mul(height) {
            Some(needed) if frame_buffer.len() >= needed => {}
            _ => warn!(
                "frame buffer has {} pixels but {}x{} was requested; writes past the end are dropped",
                frame_buffer.len(),
                width,
                height
            ),
        }

        self.frame_buffer = Some(frame_buffer);
        self.width = width;
        self.height = height;
    }

    /// Unbind and hand the buffer back
    pub fn release_frame_buffer(&mut self) -> Option<&'a mut [u32]> {
        self.width = 0;
        self.height = 0;
        self.frame_buffer.take()
    }

    pub fn is_bound(&self) -> bool {
        self.frame_buffer.is_some()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Packed pixel at (x, y), if bound and in range
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y.checked_mul(self.width)?.checked_add(x)?;
        self.frame_buffer.as_deref().and_then(|fb| fb.get(index)).copied()
    }

    /// Write one pixel; coordinates outside the buffer are ignored
    pub fn set_pixel<C: PixelCoord>(&mut self, x: C, y: C, color: Color) {
        let (Some(x), Some(y)) = (x.to_pixel(), y.to_pixel()) else {
            return;
        };
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }

        let Some(index) = (y as usize)
            .checked_mul(self.width)
            .and_then(|i| i.checked_add(x as usize))
        else {
            return;
        };
        let value = color.pack(self.format);
        if let Some(pixel) = self.frame_buffer.as_deref_mut().and_then(|fb| fb.get_mut(index)) {
            *pixel = value;
        }
    }

    /// Fill the whole buffer with the clear color (transparent black by default)
    pub fn clear(&mut self) {
        self.clear_to(self.clear_color);
    }

    pub fn clear_to(&mut self, color: Color) {
        let value = color.pack(self.format);
        let count = self.width.saturating_mul(self.height);
        match self.frame_buffer.as_deref_mut() {
            Some(fb) => {
                let count = count.min(fb.len());
                fb[..count].fill(value);
            }
            None => debug!("clear: no frame buffer bound"),
        }
    }

    /// Draw a line with color interpolated from v1 to v2
    ///
    /// Steps one pixel at a time along the major axis (the larger of |dx|
    /// and |dy|), so lines have no gaps at any slope and both endpoints are
    /// drawn.
    pub fn draw_line(&mut self, v1: Vertex, v2: Vertex) {
        if !self.is_bound() {
            debug!("draw_line: no frame buffer bound");
            return;
        }
        if !v1.is_finite() || !v2.is_finite() {
            return;
        }

        let xdiff = v2.pos.x - v1.pos.x;
        let ydiff = v2.pos.y - v1.pos.y;

        if xdiff == 0.0 && ydiff == 0.0 {
            self.set_pixel(v1.pos.x, v1.pos.y, v1.color);
            return;
        }

        if xdiff.abs() > ydiff.abs() {
            let (min, max) = if v1.pos.x < v2.pos.x {
                (v1.pos.x, v2.pos.x)
            } else {
                (v2.pos.x, v1.pos.x)
            };

            let slope = ydiff / xdiff;
            for x in axis_positions(min, max, self.width) {
                let y = v1.pos.y + (x - v1.pos.x) * slope;
                let t = (x - v1.pos.x) / xdiff;
                self.set_pixel(x, y, v1.color.lerp(v2.color, t));
            }
        } else {
            let (min, max) = if v1.pos.y < v2.pos.y {
                (v1.pos.y, v2.pos.y)
            } else {
                (v2.pos.y, v1.pos.y)
            };

            let slope = xdiff / ydiff;
            for y in axis_positions(min, max, self.height) {
                let x = v1.pos.x + (y - v1.pos.y) * slope;
                let t = (y - v1.pos.y) / ydiff;
                self.set_pixel(x, y, v1.color.lerp(v2.color, t));
            }
        }
    }

    /// Fill a triangle, interpolating vertex colors across it
    ///
    /// Vertices are snapped to the nearest pixel. Degenerate triangles are
    /// drawn as a line or a single pixel.
    pub fn draw_triangle(&mut self, v1: Vertex, v2: Vertex, v3: Vertex) {
        if !self.is_bound() {
            debug!("draw_triangle: no frame buffer bound");
            return;
        }
        if !v1.is_finite() || !v2.is_finite() || !v3.is_finite() {
            return;
        }

        let rows = 0..clamp_to_i32(self.height);
        triangle_spans_in(&v1, &v2, &v3, rows, |y, span| self.draw_span(&span, y));
    }

    /// Fill the rows shared by an ordered long edge and an ordered short edge
    pub fn draw_spans_between_edges(&mut self, long: &Edge, short: &Edge) {
        let rows = 0..clamp_to_i32(self.height);
        spans_between_edges(long, short, &rows, &mut |y: i32, span: Span| self.draw_span(&span, y));
    }

    /// Write every pixel of a span on row y, endpoints inclusive
    pub fn draw_span(&mut self, span: &Span, y: i32) {
        if y < 0 || y as i64 >= self.height as i64 {
            return;
        }

        let span = span.ordered();
        let first = span.x1.max(0);
        let last = span.x2.min(clamp_to_i32(self.width) - 1);

        for x in first..=last {
            self.set_pixel(x, y, span.color_at(x));
        }
    }
}

impl Default for Rasterizer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_to_i32(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Positions `min, min + 1, ..` up to `max` that can land inside `0..extent`
fn axis_positions(min: f32, max: f32, extent: usize) -> impl Iterator<Item = f32> {
    let min = f64::from(min);
    let max = f64::from(max);
    let first = (-min).ceil().max(0.0) as i64;
    let last = ((max - min).floor() as i64).min((extent as f64 - min).ceil() as i64);
    (first..=last).map(move |step| (min + step as f64) as f32)
}
