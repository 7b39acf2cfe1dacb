//! Adjacency rule: spacing constraints between placement categories.
use crate::placement::Category;
use crate::rules::{PlacementContext, PlacementRule};

/// Minimum cell distance required between two categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjacencyConstraint {
    pub category_a: Category,
    pub category_b: Category,
    pub min_distance: i32,
}

/// Forbids two categories of object from spawning within a minimum distance
/// of each other.
///
/// Placeholder: `evaluate` accepts unconditionally. The constraint data is
/// preserved, and decisions already emitted in the current planning run are
/// visible through [`PlacementContext::prior`]; a full implementation checks
/// the candidate against prior decisions of the constrained categories.
pub struct AdjacencyRule {
    pub enabled: bool,
    pub priority: f32,
    constraints: Vec<AdjacencyConstraint>,
}

impl AdjacencyRule {
    pub fn new(constraints: Vec<AdjacencyConstraint>) -> Self {
        Self {
            enabled: true,
            priority: 0.5,
            constraints,
        }
    }

    pub fn constraints(&self) -> &[AdjacencyConstraint] {
        &self.constraints
    }
}

impl PlacementRule for AdjacencyRule {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn priority(&self) -> f32 {
        self.priority
    }

    fn evaluate(&self, _context: &PlacementContext<'_>) -> bool {
        // TODO: check context.prior against self.constraints once the
        // spacing metric (Euclidean vs Chebyshev cells) is settled.
        true
    }
}
