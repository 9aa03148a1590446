//! Pixel surfaces - RGBA8 storage and compositing

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::ColorValue;

/// An RGBA8 raster addressed by integer grid coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order
    pixels: Vec<ColorValue>,
}

impl PixelSurface {
    /// Create a new surface with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![ColorValue::TRANSPARENT; pixel_count(width, height)],
        }
    }

    /// Reallocate the backing storage, discarding all content
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(
            "PixelSurface::resize {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        self.pixels = vec![ColorValue::TRANSPARENT; pixel_count(width, height)];
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: ColorValue) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<ColorValue> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Set a pixel at the given coordinates
    /// Out-of-bounds writes are clipped (strokes may leave the grid)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: ColorValue) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    /// Raw RGBA8 bytes, row-major, as expected by canvas `ImageData`
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[ColorValue] {
        &self.pixels
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize)
}

/// Copy `source` onto `destination` at the origin
///
/// Copies the overlapping region row by row; surfaces of equal size are
/// overwritten completely.
pub fn blit(source: &PixelSurface, destination: &mut PixelSurface) {
    let width = source.width.min(destination.width) as usize;
    let height = source.height.min(destination.height) as usize;
    if width == 0 || height == 0 {
        return;
    }

    if source.width == destination.width && source.height == destination.height {
        destination.pixels.copy_from_slice(&source.pixels);
        return;
    }

    let src_stride = source.width as usize;
    let dst_stride = destination.width as usize;
    for row in 0..height {
        let src = &source.pixels[row * src_stride..row * src_stride + width];
        destination.pixels[row * dst_stride..row * dst_stride + width].copy_from_slice(src);
    }
}

/// How stroke writes reach the visible surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresentMode {
    /// Write to the scratch surface, blit to visible on present
    #[default]
    Buffered,
    /// Write straight to the visible surface
    Direct,
}

/// The visible surface plus its off-screen scratch surface
#[derive(Debug, Clone)]
pub struct SurfacePair {
    visible: PixelSurface,
    scratch: PixelSurface,
    mode: PresentMode,
}

impl SurfacePair {
    /// Allocate both surfaces at the grid size
    pub fn new(width: u32, height: u32, mode: PresentMode) -> Self {
        let mut pair = Self {
            visible: PixelSurface::new(0, 0),
            scratch: PixelSurface::new(0, 0),
            mode,
        };
        pair.resize(width, height);
        pair
    }

    pub fn mode(&self) -> PresentMode {
        self.mode
    }

    /// Surface that stroke writes go to
    pub fn active_mut(&mut self) -> &mut PixelSurface {
        match self.mode {
            PresentMode::Buffered => &mut self.scratch,
            PresentMode::Direct => &mut self.visible,
        }
    }

    /// Commit staged writes to the visible surface
    pub fn present(&mut self) {
        if self.mode == PresentMode::Buffered {
            blit(&self.scratch, &mut self.visible);
        }
    }

    /// Resize both surfaces, discarding their content
    pub fn resize(&mut self, width: u32, height: u32) {
        self.visible.resize(width, height);
        self.scratch.resize(width, height);
    }

    pub fn visible(&self) -> &PixelSurface {
        &self.visible
    }

    pub fn scratch(&self) -> &PixelSurface {
        &self.scratch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: ColorValue = ColorValue::rgb(255, 0, 0);

    #[test]
    fn test_new_surface() {
        let surface = PixelSurface::new(16, 8);
        assert_eq!(surface.width, 16);
        assert_eq!(surface.height, 8);
        assert_eq!(surface.pixel_count(), 128);
        assert_eq!(surface.get_pixel(0, 0), Some(ColorValue::TRANSPARENT));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut surface = PixelSurface::new(10, 10);
        surface.set_pixel(5, 5, RED);
        assert_eq!(surface.get_pixel(5, 5), Some(RED));

        // Out of bounds should return None
        assert_eq!(surface.get_pixel(10, 0), None);
        assert_eq!(surface.get_pixel(0, -1), None);
    }

    #[test]
    fn test_set_pixel_clips() {
        let mut surface = PixelSurface::new(4, 4);
        surface.clear(ColorValue::WHITE);
        let before = surface.clone();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX), (100, 100)] {
            surface.set_pixel(x, y, RED);
        }

        assert_eq!(surface, before);
    }

    #[test]
    fn test_resize_discards_content() {
        let mut surface = PixelSurface::new(4, 4);
        surface.clear(RED);
        surface.resize(16, 16);
        assert_eq!(surface.pixel_count(), 256);
        assert!(surface.pixels().iter().all(|p| *p == ColorValue::TRANSPARENT));
    }

    #[test]
    fn test_as_bytes() {
        let mut surface = PixelSurface::new(2, 2);
        surface.set_pixel(1, 0, ColorValue::rgba(1, 2, 3, 4));
        let bytes = surface.as_bytes();
        // 4 pixels * 4 channels
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_blit_same_size_overwrites() {
        let mut source = PixelSurface::new(3, 3);
        source.set_pixel(1, 1, RED);
        let mut destination = PixelSurface::new(3, 3);
        destination.clear(ColorValue::WHITE);

        blit(&source, &mut destination);

        assert_eq!(destination, source);
    }

    #[test]
    fn test_blit_overlapping_region() {
        let mut source = PixelSurface::new(2, 2);
        source.clear(RED);
        let mut destination = PixelSurface::new(3, 3);

        blit(&source, &mut destination);

        assert_eq!(destination.get_pixel(1, 1), Some(RED));
        assert_eq!(destination.get_pixel(2, 0), Some(ColorValue::TRANSPARENT));
        assert_eq!(destination.get_pixel(0, 2), Some(ColorValue::TRANSPARENT));
    }

    #[test]
    fn test_buffered_pair_presents_on_demand() {
        let mut pair = SurfacePair::new(4, 4, PresentMode::Buffered);
        pair.active_mut().set_pixel(2, 2, RED);

        assert_eq!(pair.visible().get_pixel(2, 2), Some(ColorValue::TRANSPARENT));
        assert_eq!(pair.scratch().get_pixel(2, 2), Some(RED));

        pair.present();
        assert_eq!(pair.visible().get_pixel(2, 2), Some(RED));
    }

    #[test]
    fn test_direct_pair_writes_visible() {
        let mut pair = SurfacePair::new(4, 4, PresentMode::Direct);
        pair.active_mut().set_pixel(0, 3, RED);
        assert_eq!(pair.visible().get_pixel(0, 3), Some(RED));
        assert_eq!(pair.scratch().get_pixel(0, 3), Some(ColorValue::TRANSPARENT));
    }

    #[test]
    fn test_pair_resize() {
        let mut pair = SurfacePair::new(16, 16, PresentMode::Buffered);
        pair.resize(32, 32);
        assert_eq!(pair.visible().pixel_count(), 1024);
        assert_eq!(pair.scratch().pixel_count(), 1024);
    }
}
