//! Line rasterization for gap-free strokes
//!
//! Pointer-move samples arrive sparsely when the pointer moves fast, so each
//! pair of consecutive samples is joined with the 8-connected cell path
//! produced by Bresenham's error-accumulator algorithm. Integer-only; no
//! shared state.

use std::iter::FusedIterator;

use glam::IVec2;

/// Iterator over the grid cells of a segment, both endpoints included
#[derive(Debug, Clone)]
pub struct LinePoints {
    current: IVec2,
    end: IVec2,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    /// Stepping from the lexicographically greater endpoint flips the
    /// tie-breaks so both directions visit the same cells.
    mirrored: bool,
    done: bool,
}

impl LinePoints {
    pub fn new(from: IVec2, to: IVec2) -> Self {
        let dx = (i64::from(to.x) - i64::from(from.x)).abs();
        let dy = (i64::from(to.y) - i64::from(from.y)).abs();
        Self {
            current: from,
            end: to,
            dx,
            dy,
            sx: (i64::from(to.x) - i64::from(from.x)).signum() as i32,
            sy: (i64::from(to.y) - i64::from(from.y)).signum() as i32,
            err: dx - dy,
            mirrored: (to.x, to.y) < (from.x, from.y),
            done: false,
        }
    }

    /// Number of cells left to yield
    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let rx = (i64::from(self.end.x) - i64::from(self.current.x)).unsigned_abs();
        let ry = (i64::from(self.end.y) - i64::from(self.current.y)).unsigned_abs();
        usize::try_from(rx.max(ry)).map_or(usize::MAX, |n| n.saturating_add(1))
    }
}

impl Iterator for LinePoints {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.done {
            return None;
        }

        let point = self.current;
        if point == self.end {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        let (step_x, step_y) = if self.mirrored {
            (e2 >= -self.dy, e2 <= self.dx)
        } else {
            (e2 > -self.dy, e2 < self.dx)
        };
        if step_x {
            self.err -= self.dy;
            self.current.x += self.sx;
        }
        if step_y {
            self.err += self.dx;
            self.current.y += self.sy;
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinePoints {}

impl FusedIterator for LinePoints {}

/// Cells on the segment `from -> to`, in order from `from`
pub fn line_points(from: IVec2, to: IVec2) -> LinePoints {
    LinePoints::new(from, to)
}
