//! Grid dimensions, bounds checks, and cell-to-world mapping.
//!
//! [`GridModel`] is the shared coordinate frame for layout generation and
//! placement planning. Cells are addressed row-major (`index = y * width + x`)
//! and mapped to world space by uniform scaling with `cell_size`.
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest accepted grid dimension; smaller requests are clamped up.
pub const MIN_DIMENSION: i32 = 10;
/// Largest accepted grid dimension; larger requests are clamped down.
pub const MAX_DIMENSION: i32 = 256;

/// Grid dimensions and world mapping for one generation run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridModel {
    width: i32,
    height: i32,
    cell_size: f32,
}

impl GridModel {
    /// Creates a grid model, failing fast on non-positive input and clamping
    /// dimensions into `[MIN_DIMENSION, MAX_DIMENSION]`.
    pub fn new(width: i32, height: i32, cell_size: f32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must be > 0, got {width}x{height}"
            )));
        }
        if cell_size <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "cell_size must be > 0, got {cell_size}"
            )));
        }

        Ok(Self {
            width: width.clamp(MIN_DIMENSION, MAX_DIMENSION),
            height: height.clamp(MIN_DIMENSION, MAX_DIMENSION),
            cell_size,
        })
    }

    /// Number of cells along the X axis.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of cells along the Y axis.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Edge length of one cell in world units.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total cell count of the grid.
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Row-major index of `(x, y)`. Callers check bounds first.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(x, y));
        (y * self.width + x) as usize
    }

    /// Whether `(x, y)` addresses a cell of this grid.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// World position of the cell origin at `(x, y)`.
    pub fn cell_to_world(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 * self.cell_size, y as f32 * self.cell_size)
    }
}
