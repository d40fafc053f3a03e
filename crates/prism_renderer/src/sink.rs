//! Render output.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::Color;

/// Destination for rendered pixels.
///
/// Workers call `write_pixel` concurrently, each for a distinct pixel.
pub trait PixelSink: Send + Sync {
    /// Image width and height in pixels.
    fn resolution(&self) -> (u32, u32);

    /// Store the color of pixel `(col, row)`. Row 0 is the top row.
    fn write_pixel(&self, col: u32, row: u32, color: Color);
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 255].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = color.x.clamp(0.0, 255.0) as u8;
    let g = color.y.clamp(0.0, 255.0) as u8;
    let b = color.z.clamp(0.0, 255.0) as u8;
    [r, g, b, 255]
}

/// In-memory image that accepts concurrent pixel writes.
///
/// Channels are stored as `f64` bits so writers need no locking.
#[derive(Debug)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[AtomicU64; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: (0..len)
                .map(|_| [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)])
                .collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, col: u32, row: u32) -> Option<usize> {
        (col < self.width && row < self.height)
            .then(|| row as usize * self.width as usize + col as usize)
    }

    /// Color at `(col, row)`, or `None` outside the image.
    pub fn get(&self, col: u32, row: u32) -> Option<Color> {
        let [r, g, b] = &self.pixels[self.index(col, row)?];
        Some(Color::new(
            f64::from_bits(r.load(Ordering::Relaxed)),
            f64::from_bits(g.load(Ordering::Relaxed)),
            f64::from_bits(b.load(Ordering::Relaxed)),
        ))
    }

    /// Convert to RGBA bytes, row by row from the top.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for row in 0..self.height {
            for col in 0..self.width {
                let color = self.get(col, row).unwrap_or_default();
                bytes.extend_from_slice(&color_to_rgba(color));
            }
        }
        bytes
    }
}

impl PixelSink for ImageBuffer {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn write_pixel(&self, col: u32, row: u32, color: Color) {
        // Out-of-range writes are dropped
        let Some(index) = self.index(col, row) else {
            return;
        };
        let [r, g, b] = &self.pixels[index];
        r.store(color.x.to_bits(), Ordering::Relaxed);
        g.store(color.y.to_bits(), Ordering::Relaxed);
        b.store(color.z.to_bits(), Ordering::Relaxed);
    }
}
