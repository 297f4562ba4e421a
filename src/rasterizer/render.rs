//! Framebuffer and 2D drawing primitives
//!
//! Every primitive clips per pixel: anything that falls outside the surface is
//! dropped silently. Nothing here can fail once the buffer exists.

use super::types::Color;
use crate::error::DonutError;

/// Read-only snapshot of a finished frame, handed to a display sink
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub pixels: &'a [u32],
    pub width: usize,
    pub height: usize,
}

impl FrameView<'_> {
    /// Expand packed `0xRRGGBBAA` pixels into RGBA8 bytes, reusing `out`
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for &p in self.pixels {
            out.extend_from_slice(&p.to_be_bytes());
        }
    }
}

/// Framebuffer for software rendering
pub struct Framebuffer {
    pixels: Vec<u32>, // RGBA8888, one u32 per pixel, row-major
    width: usize,
    height: usize,
}

impl Framebuffer {
    /// Allocate a zeroed `width` x `height` surface.
    ///
    /// There is no fallback renderer, so the host should treat an error here
    /// as fatal.
    pub fn new(width: usize, height: usize) -> Result<Self, DonutError> {
        if width == 0 || height == 0 {
            return Err(DonutError::InvalidDimensions { width, height });
        }
        // Coordinates are i32 on the drawing API
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(DonutError::Allocation { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(DonutError::Allocation { width, height })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| DonutError::Allocation { width, height })?;
        pixels.resize(len, 0);

        log::debug!("allocated {}x{} framebuffer", width, height);
        Ok(Self { pixels, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            pixels: &self.pixels,
            width: self.width,
            height: self.height,
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    /// Release the pixel storage. Consumes the buffer, so no drawing can
    /// follow; dropping it on any other exit path releases it as well.
    pub fn cleanup(self) {
        log::debug!("released {}x{} framebuffer", self.width, self.height);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn put_point(&mut self, x: i32, y: i32, color: Color) {
        self.plot(x as i64, y as i64, color);
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.to_u32();
        }
    }

    /// Fill an axis-aligned block, clipped to the surface
    pub fn put_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        // i64 so x + w cannot overflow
        self.fill_span(x as i64, y as i64, x as i64 + w as i64, y as i64 + h as i64, color);
    }

    /// Fill [x0, x1) x [y0, y1) after clamping it to the surface
    fn fill_span(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let x0 = x0.max(0) as usize;
        let y0 = y0.max(0) as usize;
        let x1 = x1.clamp(0, self.width as i64) as usize;
        let y1 = y1.clamp(0, self.height as i64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let packed = color.to_u32();
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(packed);
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.put_rect(0, 0, self.width as i32, self.height as i32, color);
    }

    /// Draw a line from (x1, y1) to (x2, y2) using Bresenham's algorithm,
    /// stamping a `2*size` square pen centered on every step.
    ///
    /// Returns the number of steps walked, always `max(|dx|, |dy|) + 1`.
    /// Steps whose pen cannot reach the surface are skipped over rather than
    /// walked one by one, so endpoints far off screen cost nothing extra.
    pub fn put_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, size: i32, color: Color) -> usize {
        // Deltas between two i32 endpoints need 33 bits
        let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
        let size = size as i64;
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let steps = dx.max(-dy) as usize + 1;

        let (first, last) = match self.pen_window(x1, y1, sx, sy, dx, -dy, size) {
            Some(window) => window,
            None => return steps,
        };

        // Jump straight to step `first`. After u x-steps and v y-steps the
        // error term is always dx * (1 + v) + dy * (1 + u).
        let (u, v) = if dx >= -dy {
            let v = if dx == 0 { 0 } else { div_round(-dy, first, dx) };
            (first, v)
        } else {
            (div_round(dx, first, -dy), first)
        };
        let mut x = x1 + sx * u;
        let mut y = y1 + sy * v;
        let mut err = (dx as i128 * (1 + v) as i128 + dy as i128 * (1 + u) as i128) as i64;
        let mut k = first;

        loop {
            self.stamp(x, y, size, color);

            if k == last || (x == x2 && y == y2) {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            k += 1;
        }

        steps
    }

    /// Range of step indices along the major axis whose pen can overlap the
    /// surface, or `None` when no step draws anything.
    #[allow(clippy::too_many_arguments)]
    fn pen_window(&self, x1: i64, y1: i64, sx: i64, sy: i64, adx: i64, ady: i64, size: i64) -> Option<(i64, i64)> {
        if size <= 0 {
            return None;
        }
        let (start, dir, extent, major) = if adx >= ady {
            (x1, sx, self.width as i64, adx)
        } else {
            (y1, sy, self.height as i64, ady)
        };

        // The pen at c touches [0, extent) iff c lies in (-size, extent + size)
        let (lo, hi) = (1 - size, extent + size - 1);
        let (first, last) = if dir > 0 { (lo - start, hi - start) } else { (start - hi, start - lo) };
        let (first, last) = (first.max(0), last.min(major));
        (first <= last).then_some((first, last))
    }

    /// Square pen covering [x - size, x + size) x [y - size, y + size)
    fn stamp(&mut self, x: i64, y: i64, size: i64, color: Color) {
        self.fill_span(x - size, y - size, x + size, y + size, color);
    }

    /// Draw a circle outline centered at (cx, cy) with the midpoint algorithm
    pub fn put_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        if cx + r < 0 || cy + r < 0 || cx - r >= self.width as i64 || cy - r >= self.height as i64 {
            return;
        }

        let mut x = r;
        let mut y = 0;
        let mut err = 1 - r;

        while x >= y {
            // 8-way symmetry
            self.plot(cx + x, cy + y, color);
            self.plot(cx + y, cy + x, color);
            self.plot(cx - y, cy + x, color);
            self.plot(cx - x, cy + y, color);
            self.plot(cx - x, cy - y, color);
            self.plot(cx - y, cy - x, color);
            self.plot(cx + y, cy - x, color);
            self.plot(cx + x, cy - y, color);

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }
}

/// Minor-axis offset after `k` major steps: floor((2 * minor * k + major) / (2 * major))
fn div_round(minor: i64, k: i64, major: i64) -> i64 {
    ((2 * minor as i128 * k as i128 + major as i128) / (2 * major as i128)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fb: &Framebuffer, color: Color) -> usize {
        fb.pixels().iter().filter(|&&p| p == color.to_u32()).count()
    }

    #[test]
    fn test_new_is_zeroed() {
        let fb = Framebuffer::new(8, 4).unwrap();
        assert_eq!(fb.pixels().len(), 32);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Framebuffer::new(0, 10),
            Err(DonutError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(matches!(Framebuffer::new(10, 0), Err(DonutError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_new_rejects_overflowing_size() {
        assert!(matches!(
            Framebuffer::new(i32::MAX as usize, i32::MAX as usize),
            Err(DonutError::Allocation { .. })
        ));
    }

    #[test]
    fn test_put_point_in_bounds() {
        let mut fb = Framebuffer::new(4, 3).unwrap();
        fb.put_point(3, 2, Color::RED);
        assert_eq!(fb.pixels()[2 * 4 + 3], Color::RED.to_u32());
        assert_eq!(fb.get_pixel(3, 2), Some(Color::RED.to_u32()));
        assert_eq!(count(&fb, Color::RED), 1);
    }

    #[test]
    fn test_put_point_out_of_bounds_is_noop() {
        let mut fb = Framebuffer::new(5, 4).unwrap();
        fb.fill(Color::WHITE);
        let before = fb.pixels().to_vec();
        for &(x, y) in &[
            (-1, 0), (0, -1), (5, 0), (0, 4), (5, 4), (-1, -1),
            (i32::MIN, 0), (0, i32::MAX), (i32::MAX, i32::MIN),
        ] {
            fb.put_point(x, y, Color::RED);
        }
        for y in -3..8 {
            for x in -3..9 {
                if !(0..5).contains(&x) || !(0..4).contains(&y) {
                    fb.put_point(x, y, Color::RED);
                }
            }
        }
        assert_eq!(fb.pixels(), &before[..]);
        assert_eq!(fb.get_pixel(5, 0), None);
    }

    #[test]
    fn test_fill_covers_everything() {
        let mut fb = Framebuffer::new(7, 5).unwrap();
        fb.put_point(1, 1, Color::RED);
        fb.fill(Color::WHITE);
        assert_eq!(count(&fb, Color::WHITE), 35);
    }

    #[test]
    fn test_put_rect_clips() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.put_rect(-2, -2, 4, 4, Color::RED);
        assert_eq!(count(&fb, Color::RED), 4);
        assert_eq!(fb.get_pixel(1, 1), Some(Color::RED.to_u32()));
        assert_eq!(fb.get_pixel(2, 2), Some(0));

        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.put_rect(3, 3, 10, 10, Color::RED);
        assert_eq!(count(&fb, Color::RED), 1);

        fb.put_rect(i32::MAX - 1, i32::MAX - 1, i32::MAX, i32::MAX, Color::WHITE);
        fb.put_rect(10, 0, 2, 2, Color::WHITE);
        fb.put_rect(0, 0, -3, 2, Color::WHITE);
        fb.put_rect(0, 0, 2, 0, Color::WHITE);
        assert_eq!(count(&fb, Color::WHITE), 0);
    }

    #[test]
    fn test_horizontal_line_size_one() {
        let w = 10;
        let mut fb = Framebuffer::new(w, 5).unwrap();
        let steps = fb.put_line(0, 0, w as i32 - 1, 0, 1, Color::RED);
        assert_eq!(steps, w);

        // Pen covers rows -1..1, row -1 is clipped away
        for x in 0..w as i32 {
            assert_eq!(fb.get_pixel(x, 0), Some(Color::RED.to_u32()));
        }
        assert_eq!(count(&fb, Color::RED), w);
    }

    #[test]
    fn test_line_step_bound() {
        let mut fb = Framebuffer::new(32, 32).unwrap();
        for &(x1, y1, x2, y2) in &[(0, 0, 31, 7), (5, 30, 2, 1), (-10, 4, 40, 4), (3, 3, 3, 3), (20, 0, 0, 20)] {
            let steps = fb.put_line(x1, y1, x2, y2, 1, Color::RED);
            let expected = (x2 - x1).abs().max((y2 - y1).abs()) as usize + 1;
            assert_eq!(steps, expected);
        }
    }

    #[test]
    fn test_line_reaches_endpoint_pixels() {
        let mut fb = Framebuffer::new(16, 16).unwrap();
        fb.put_line(2, 3, 12, 9, 1, Color::RED);
        // Pen of size 1 always covers the step pixel itself
        assert_eq!(fb.get_pixel(2, 3), Some(Color::RED.to_u32()));
        assert_eq!(fb.get_pixel(12, 9), Some(Color::RED.to_u32()));
    }

    #[test]
    fn test_line_thickness() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.put_line(10, 10, 10, 10, 2, Color::RED);
        // Single step, 4x4 pen
        assert_eq!(count(&fb, Color::RED), 16);
        assert_eq!(fb.get_pixel(8, 8), Some(Color::RED.to_u32()));
        assert_eq!(fb.get_pixel(11, 11), Some(Color::RED.to_u32()));
        assert_eq!(fb.get_pixel(12, 12), Some(0));

        let mut fb = Framebuffer::new(20, 20).unwrap();
        assert_eq!(fb.put_line(0, 0, 5, 5, 0, Color::RED), 6);
        assert_eq!(count(&fb, Color::RED), 0);
    }

    #[test]
    fn test_line_extreme_coordinates() {
        let mut fb = Framebuffer::new(8, 4).unwrap();

        // Endpoints 4e9 apart, only the on-screen stretch is drawn
        let steps = fb.put_line(-2_000_000_000, 0, 2_000_000_000, 0, 1, Color::RED);
        assert_eq!(steps, 4_000_000_001);
        for x in 0..8 {
            assert_eq!(fb.get_pixel(x, 0), Some(Color::RED.to_u32()));
        }
        assert_eq!(count(&fb, Color::RED), 8);

        // Full-range diagonal crosses the origin
        let mut fb = Framebuffer::new(8, 4).unwrap();
        fb.put_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, 1, Color::RED);
        for i in 0..4 {
            assert_eq!(fb.get_pixel(i, i), Some(Color::RED.to_u32()));
        }

        // Pen at the edge of the coordinate range, and nonsense sizes
        let mut fb = Framebuffer::new(8, 4).unwrap();
        assert_eq!(fb.put_line(i32::MAX, 0, i32::MAX, 0, 2, Color::RED), 1);
        assert_eq!(fb.put_line(i32::MAX - 3, i32::MAX, i32::MAX, i32::MAX - 3, 3, Color::RED), 4);
        assert_eq!(fb.put_line(0, 0, 1, 0, i32::MIN, Color::RED), 2);
        assert_eq!(fb.put_line(i32::MIN, 2, i32::MIN + 5, 2, -7, Color::RED), 6);
        assert_eq!(count(&fb, Color::RED), 0);

        // A pen wider than the surface covers all of it
        fb.put_line(3, 1, 3, 1, i32::MAX, Color::RED);
        assert_eq!(count(&fb, Color::RED), 32);
    }

    #[test]
    fn test_line_skip_matches_full_walk() {
        // Same line, once mostly off a small surface and once fully on a
        // large one shifted by (100, 100)
        let mut skipped = Framebuffer::new(12, 12).unwrap();
        skipped.put_line(-40, -13, 30, 10, 2, Color::RED);
        let mut walked = Framebuffer::new(200, 200).unwrap();
        walked.put_line(60, 87, 130, 110, 2, Color::RED);
        for y in 0..12 {
            for x in 0..12 {
                assert_eq!(skipped.get_pixel(x, y), walked.get_pixel(x + 100, y + 100));
            }
        }
    }

    #[test]
    fn test_circle_outline() {
        let mut fb = Framebuffer::new(21, 21).unwrap();
        fb.put_circle(10, 10, 5, Color::RED);
        for &(x, y) in &[(15, 10), (5, 10), (10, 15), (10, 5)] {
            assert_eq!(fb.get_pixel(x, y), Some(Color::RED.to_u32()));
        }
        // Outline only, center stays untouched
        assert_eq!(fb.get_pixel(10, 10), Some(0));

        // Mirror symmetric around both axes
        for y in 0..21 {
            for x in 0..21 {
                let p = fb.get_pixel(x, y);
                assert_eq!(p, fb.get_pixel(20 - x, y));
                assert_eq!(p, fb.get_pixel(x, 20 - y));
            }
        }
    }

    #[test]
    fn test_circle_degenerate_and_clipped() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.put_circle(4, 4, -1, Color::RED);
        assert_eq!(count(&fb, Color::RED), 0);

        fb.put_circle(4, 4, 0, Color::RED);
        assert_eq!(count(&fb, Color::RED), 1);

        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.put_circle(0, 0, 3, Color::RED);
        assert_eq!(fb.get_pixel(3, 0), Some(Color::RED.to_u32()));
        assert_eq!(fb.get_pixel(0, 3), Some(Color::RED.to_u32()));
    }

    #[test]
    fn test_circle_extreme_coordinates() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.put_circle(i32::MAX, 0, 3, Color::RED);
        fb.put_circle(0, i32::MIN, 3, Color::RED);
        fb.put_circle(i32::MIN, i32::MIN, i32::MAX, Color::RED);
        assert_eq!(count(&fb, Color::RED), 0);

        // Huge circle whose rightmost point lands on screen
        fb.put_circle(-1_000, 4, 1_004, Color::RED);
        assert_eq!(fb.get_pixel(4, 4), Some(Color::RED.to_u32()));
        assert_eq!(fb.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_view_rgba8_bytes() {
        let mut fb = Framebuffer::new(2, 1).unwrap();
        fb.put_point(0, 0, Color::with_alpha(1, 2, 3, 4));
        fb.put_point(1, 0, Color::WHITE);
        let mut bytes = vec![9; 3];
        fb.view().write_rgba8(&mut bytes);
        assert_eq!(bytes, vec![1, 2, 3, 4, 255, 255, 255, 255]);
    }
}
