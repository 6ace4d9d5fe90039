//! The fixed 500x500 RGBA canvas curves are plotted into.
//!
//! Created fully transparent black; the only mutation is plotting single
//! pixels. Once a render finishes, the raw bytes are handed to an external
//! encoder; the bitmap itself has no opinion on file format or delivery.

use glam::DVec2;

/// Canvas width in pixels
pub const WIDTH: u32 = 500;
/// Canvas height in pixels
pub const HEIGHT: u32 = 500;

/// Plotted curve points are opaque blue.
pub const CURVE_COLOR: [u8; 4] = [0, 0, 255, 255];

/// A WIDTH x HEIGHT grid of RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; (WIDTH * HEIGHT * 4) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        WIDTH
    }

    pub fn height(&self) -> u32 {
        HEIGHT
    }

    /// Raw RGBA8 bytes, row-major, for the encoding collaborator.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel; `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let idx = ((y * WIDTH + x) * 4) as usize;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(rgba)
    }

    /// Truncate both coordinates toward zero and set that pixel. Points
    /// outside the canvas are silently discarded: no error, no clamping, no
    /// wraparound. Non-finite coordinates can never land on the canvas and
    /// are discarded before the cast (a saturating NaN cast would otherwise
    /// alias them onto pixel 0).
    pub fn plot(&mut self, p: DVec2, color: [u8; 4]) {
        if !p.x.is_finite() || !p.y.is_finite() {
            return;
        }
        let x = p.x.trunc() as i64;
        let y = p.y.trunc() as i64;
        if x < 0 || y < 0 || x >= i64::from(WIDTH) || y >= i64::from(HEIGHT) {
            return;
        }
        let idx = ((y as u32 * WIDTH + x as u32) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// Coordinates of every plotted (non-zero-alpha) pixel, scan order.
    /// Diagnostic helper; the hot path never calls this.
    pub fn plotted(&self) -> Vec<(u32, u32)> {
        let mut points = Vec::new();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let idx = ((y * WIDTH + x) * 4 + 3) as usize;
                if self.pixels[idx] != 0 {
                    points.push((x, y));
                }
            }
        }
        points
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new()
    }
}
