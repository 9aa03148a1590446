//! Camera placement and screen <-> grid coordinate conversion
//!
//! The camera maps grid space to screen space as
//! `screen = grid * CELL_SIZE * scale + offset`. The host renders the
//! visible surface into the [`Placement`] rectangle derived from it, and
//! pointer positions are mapped back through the same rectangle.

use glam::{DVec2, IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::constants::CELL_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    #[error("Degenerate scale factor {0} (must be finite and > 0)")]
    DegenerateScale(f32),
}

/// Offset and scale of the grid on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Screen position of the grid origin, whole units only
    pub offset: IVec2,
    /// Always > 0
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: IVec2::ZERO,
            scale: 1.0,
        }
    }
}

/// On-screen rectangle of the visible surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub left: i32,
    pub top: i32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    pub fn right(&self) -> f32 {
        self.left as f32 + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top as f32 + self.height
    }
}

/// Owns the camera for one fixed-size grid
#[derive(Debug, Clone)]
pub struct ViewportTransform {
    camera: Camera,
    grid: UVec2,
    min_scale: f32,
    max_scale: f32,
}

impl ViewportTransform {
    /// Camera at the origin, scale 1.0, clamped to `[min_scale, max_scale]`
    pub fn new(grid_width: u32, grid_height: u32, min_scale: f32, max_scale: f32) -> Self {
        Self {
            camera: Camera::default(),
            grid: UVec2::new(grid_width, grid_height),
            min_scale,
            max_scale,
        }
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn scale(&self) -> f32 {
        self.camera.scale
    }

    pub fn offset(&self) -> IVec2 {
        self.camera.offset
    }

    pub fn grid(&self) -> UVec2 {
        self.grid
    }

    /// Current on-screen rectangle of the surface
    pub fn placement(&self) -> Placement {
        let size = self.grid.as_vec2() * CELL_SIZE * self.camera.scale;
        Placement {
            left: self.camera.offset.x,
            top: self.camera.offset.y,
            width: size.x,
            height: size.y,
        }
    }

    /// Move the camera to `(x, y)`, or by `(x, y)` when `relative`
    ///
    /// Coordinates are floored; sub-pixel camera positions are not kept.
    pub fn set_position(&mut self, x: f32, y: f32, relative: bool) {
        let delta = IVec2::new(x.floor() as i32, y.floor() as i32);
        self.camera.offset = if relative {
            self.camera.offset + delta
        } else {
            delta
        };
    }

    /// Zoom by `factor` keeping the grid point under `anchor` in place
    ///
    /// The resulting scale is clamped to the configured range; returns the
    /// factor actually applied.
    pub fn set_scale(&mut self, factor: f32, anchor: Vec2) -> Result<f32, ViewportError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ViewportError::DegenerateScale(factor));
        }

        let target = (self.camera.scale * factor).clamp(self.min_scale, self.max_scale);
        let applied = target / self.camera.scale;

        let placement = self.placement();
        let top_left = Vec2::new(placement.left as f32, placement.top as f32);
        let bottom_right = Vec2::new(placement.right(), placement.bottom());

        let top_left = (top_left - anchor) * applied + anchor;
        let bottom_right = (bottom_right - anchor) * applied + anchor;

        self.set_position(top_left.x, top_left.y, false);
        self.camera.scale = target;

        debug!(
            "set_scale: factor={:.3} applied={:.3} anchor=({:.1}, {:.1}) -> offset={:?} size={:.1}x{:.1}",
            factor,
            applied,
            anchor.x,
            anchor.y,
            self.camera.offset,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y
        );

        Ok(applied)
    }

    /// Screen units covered by one grid cell at the current scale
    fn cell_extent(&self) -> f64 {
        f64::from(CELL_SIZE) * f64::from(self.camera.scale)
    }

    /// Grid cell under a screen position (floored; outside positions give
    /// out-of-range cells, negative to the left/top)
    ///
    /// Positions within one f32 ulp of a cell edge snap onto the edge, so
    /// every point produced by [`Self::canvas_pixel_to_screen`] maps back
    /// to its own cell.
    pub fn screen_to_canvas_pixel(&self, screen: Vec2) -> IVec2 {
        let extent = self.cell_extent();
        let offset = self.camera.offset.as_dvec2();
        let cell = DVec2::new(
            snap_to_edge((f64::from(screen.x) - offset.x) / extent, screen.x, extent),
            snap_to_edge((f64::from(screen.y) - offset.y) / extent, screen.y, extent),
        )
        .floor();
        IVec2::new(cell.x as i32, cell.y as i32)
    }

    /// Screen position of a cell's top-left corner
    pub fn canvas_pixel_to_screen(&self, cell: IVec2) -> Vec2 {
        (self.camera.offset.as_dvec2() + cell.as_dvec2() * self.cell_extent()).as_vec2()
    }

    /// Screen position of a cell's center
    pub fn canvas_pixel_center(&self, cell: IVec2) -> Vec2 {
        (self.camera.offset.as_dvec2() + (cell.as_dvec2() + 0.5) * self.cell_extent()).as_vec2()
    }

    /// Half-open hit test against the placement rectangle
    pub fn is_inside_canvas(&self, screen: Vec2) -> bool {
        let placement = self.placement();
        placement.left as f32 <= screen.x
            && screen.x < placement.right()
            && placement.top as f32 <= screen.y
            && screen.y < placement.bottom()
    }
}

/// Round `cells` to the nearest edge when the distance is below the
/// precision of the f32 screen coordinate it came from
fn snap_to_edge(cells: f64, screen: f32, extent: f64) -> f64 {
    let tolerance = (f64::from(screen.abs()) * f64::from(f32::EPSILON) / extent).max(1e-6);
    let edge = cells.round();
    if (cells - edge).abs() <= tolerance {
        edge
    } else {
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 16x16 grid at scale 10 with its origin at (100, 100)
    fn scenario_viewport() -> ViewportTransform {
        let mut viewport = ViewportTransform::new(16, 16, 0.25, 256.0);
        viewport.set_position(100.0, 100.0, false);
        viewport.set_scale(10.0, Vec2::new(100.0, 100.0)).unwrap();
        viewport
    }

    #[test]
    fn test_placement() {
        let viewport = scenario_viewport();
        let placement = viewport.placement();
        assert_eq!((placement.left, placement.top), (100, 100));
        assert_eq!((placement.width, placement.height), (160.0, 160.0));
    }

    #[test]
    fn test_set_position_floors() {
        let mut viewport = ViewportTransform::new(16, 16, 0.25, 256.0);
        viewport.set_position(10.7, -3.2, false);
        assert_eq!(viewport.offset(), IVec2::new(10, -4));

        viewport.set_position(5.9, 5.0, true);
        assert_eq!(viewport.offset(), IVec2::new(15, 1));
    }

    #[test]
    fn test_screen_to_canvas_pixel() {
        let viewport = scenario_viewport();
        assert_eq!(viewport.screen_to_canvas_pixel(Vec2::new(105.0, 105.0)), IVec2::new(0, 0));
        assert_eq!(viewport.screen_to_canvas_pixel(Vec2::new(155.0, 155.0)), IVec2::new(5, 5));
        assert_eq!(viewport.screen_to_canvas_pixel(Vec2::new(259.9, 100.0)), IVec2::new(15, 0));
        // Left of the canvas floors to a negative cell rather than folding onto column 0
        assert_eq!(viewport.screen_to_canvas_pixel(Vec2::new(95.0, 100.0)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_round_trip() {
        for (offset, scale) in [((100, 100), 10.0), ((-37, 12), 3.0), ((0, 0), 1.0), ((5, -8), 7.3)] {
            let mut viewport = ViewportTransform::new(16, 16, 0.25, 256.0);
            viewport.set_position(offset.0 as f32, offset.1 as f32, false);
            viewport.set_scale(scale, viewport.offset().as_vec2()).unwrap();
            assert_eq!(viewport.offset(), IVec2::new(offset.0, offset.1));

            for gy in 0..16 {
                for gx in 0..16 {
                    let cell = IVec2::new(gx, gy);
                    let screen = viewport.canvas_pixel_center(cell);
                    assert_eq!(viewport.screen_to_canvas_pixel(screen), cell);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_cell_corners() {
        for scale in [7.3, 12.1, 1.7, 3.3, 0.37] {
            for offset in [(0, 0), (5, -8), (-37, 12), (-4000, 3000)] {
                let mut viewport = ViewportTransform::new(32, 32, 0.25, 256.0);
                viewport.set_position(offset.0 as f32, offset.1 as f32, false);
                viewport.set_scale(scale, viewport.offset().as_vec2()).unwrap();

                for gy in 0..32 {
                    for gx in 0..32 {
                        let cell = IVec2::new(gx, gy);
                        let corner = viewport.canvas_pixel_to_screen(cell);
                        assert_eq!(
                            viewport.screen_to_canvas_pixel(corner),
                            cell,
                            "scale {scale} offset {offset:?} corner {corner:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_repeated_key_zoom_keeps_corners() {
        // Two 1.1x steps from 10 give 12.1, which f32 cannot represent
        let mut viewport = ViewportTransform::new(32, 32, 0.25, 256.0);
        viewport.set_position(320.0, 220.0, false);
        viewport.set_scale(10.0, Vec2::new(320.0, 220.0)).unwrap();
        viewport.set_scale(1.1, Vec2::new(320.0, 220.0)).unwrap();
        viewport.set_scale(1.1, Vec2::new(320.0, 220.0)).unwrap();

        let cell = IVec2::new(5, 0);
        let corner = viewport.canvas_pixel_to_screen(cell);
        assert_eq!(viewport.screen_to_canvas_pixel(corner), cell);
        // Just left of the corner still belongs to the previous cell
        let before = Vec2::new(corner.x - 0.5, corner.y + 0.5);
        assert_eq!(viewport.screen_to_canvas_pixel(before), IVec2::new(4, 0));
    }

    #[test]
    fn test_canvas_pixel_to_screen() {
        let viewport = scenario_viewport();
        assert_eq!(viewport.canvas_pixel_to_screen(IVec2::new(0, 0)), Vec2::new(100.0, 100.0));
        assert_eq!(viewport.canvas_pixel_to_screen(IVec2::new(3, 1)), Vec2::new(130.0, 110.0));
        assert_eq!(viewport.canvas_pixel_center(IVec2::new(3, 1)), Vec2::new(135.0, 115.0));
    }

    #[test]
    fn test_zoom_anchor_invariance() {
        for anchor in [Vec2::new(137.0, 212.5), Vec2::new(100.0, 100.0), Vec2::new(400.0, 30.0)] {
            for factor in [1.1, 0.9, 2.0, 0.5] {
                let mut viewport = scenario_viewport();
                let before = viewport.screen_to_canvas_pixel(anchor);
                viewport.set_scale(factor, anchor).unwrap();
                let after = viewport.screen_to_canvas_pixel(anchor);
                let drift = (after - before).abs();
                assert!(drift.x <= 1 && drift.y <= 1, "anchor {anchor:?} factor {factor}");
            }
        }
    }

    #[test]
    fn test_zoom_resizes_around_anchor() {
        let mut viewport = scenario_viewport();
        // Zooming in 2x around the canvas center keeps the center fixed
        viewport.set_scale(2.0, Vec2::new(180.0, 180.0)).unwrap();
        let placement = viewport.placement();
        assert_eq!((placement.left, placement.top), (20, 20));
        assert_eq!(placement.width, 320.0);
    }

    #[test]
    fn test_degenerate_scale_rejected() {
        let mut viewport = scenario_viewport();
        let before = viewport.camera();
        for factor in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(viewport.set_scale(factor, Vec2::ZERO).is_err());
        }
        assert_eq!(viewport.camera(), before);
    }

    #[test]
    fn test_scale_clamped() {
        let mut viewport = ViewportTransform::new(16, 16, 0.5, 20.0);
        let applied = viewport.set_scale(100.0, Vec2::ZERO).unwrap();
        assert_eq!(viewport.scale(), 20.0);
        assert_eq!(applied, 20.0);

        for _ in 0..100 {
            viewport.set_scale(0.5, Vec2::new(3.0, 3.0)).unwrap();
        }
        assert_eq!(viewport.scale(), 0.5);
        assert!(viewport.placement().width > 0.0);
    }

    #[test]
    fn test_is_inside_canvas_half_open() {
        let viewport = scenario_viewport();
        assert!(viewport.is_inside_canvas(Vec2::new(100.0, 100.0)));
        assert!(viewport.is_inside_canvas(Vec2::new(259.9, 259.9)));
        assert!(!viewport.is_inside_canvas(Vec2::new(260.0, 150.0)));
        assert!(!viewport.is_inside_canvas(Vec2::new(150.0, 260.0)));
        assert!(!viewport.is_inside_canvas(Vec2::new(99.9, 150.0)));
    }
}
