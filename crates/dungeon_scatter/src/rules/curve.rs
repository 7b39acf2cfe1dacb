//! Sampled response curves for probability reweighting.
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A piecewise-linear curve over ordered `(input, value)` control points.
///
/// Points are sorted by input at construction; evaluation clamps to the
/// first/last value outside the covered range. Monotonicity of the values is
/// by convention, not enforced.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    points: Vec<(f32, f32)>,
}

impl Curve {
    /// Creates a curve from control points. At least one point is required.
    pub fn new(mut points: Vec<(f32, f32)>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InvalidConfig(
                "curve requires at least one control point".into(),
            ));
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { points })
    }

    /// A curve that returns `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self {
            points: vec![(0.0, value)],
        }
    }

    /// A straight line through `(x0, y0)` and `(x1, y1)`.
    pub fn linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let mut points = vec![(x0, y0), (x1, y1)];
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { points }
    }

    /// Samples the curve at `t` with linear interpolation between neighbors.
    pub fn evaluate(&self, t: f32) -> f32 {
        let first = self.points[0];
        if t <= first.0 {
            return first.1;
        }
        let last = self.points[self.points.len() - 1];
        if t >= last.0 {
            return last.1;
        }

        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if t <= x1 {
                if x1 == x0 {
                    return y1;
                }
                let alpha = (t - x0) / (x1 - x0);
                return y0 + (y1 - y0) * alpha;
            }
        }

        last.1
    }
}
