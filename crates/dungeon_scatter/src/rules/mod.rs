//! Placement rules: per-cell gating and probability reweighting.
//!
//! A [`RuleSet`] holds an ordered sequence of [`PlacementRule`] trait objects.
//! For each candidate cell the planner builds a transient [`PlacementContext`]
//! and asks the rule set whether placement is allowed
//! ([`RuleSet::validate_placement`], a short-circuiting AND over enabled
//! rules) and at what probability ([`RuleSet::final_probability`], a left
//! fold of each rule's reweighting, clamped to `[0, 1]`).
use crate::grid::GridModel;
use crate::layout::{CellType, Layout};
use crate::placement::{Category, PlacementDecision};

pub mod adjacency;
pub mod curve;
pub mod density;

pub use adjacency::{AdjacencyConstraint, AdjacencyRule};
pub use curve::Curve;
pub use density::DensityRule;

/// Read-only view of one candidate cell, built fresh per rule evaluation and
/// never stored.
#[derive(Clone, Copy)]
pub struct PlacementContext<'a> {
    /// Candidate cell X coordinate.
    pub x: i32,
    /// Candidate cell Y coordinate.
    pub y: i32,
    /// Cell type at the candidate position.
    pub cell_type: CellType,
    /// Category being placed.
    pub category: Category,
    /// The layout under evaluation.
    pub layout: &'a Layout,
    /// The grid the layout was generated on.
    pub grid: &'a GridModel,
    /// Decisions already emitted earlier in this planning run, in emission
    /// order. Extension seam for rules that constrain against prior
    /// placements (see [`AdjacencyRule`]).
    pub prior: &'a [PlacementDecision],
}

impl PlacementContext<'_> {
    /// Cell type at an offset from the candidate; out of bounds reads as
    /// `Blocked`.
    pub fn cell_at(&self, offset_x: i32, offset_y: i32) -> CellType {
        let tx = self.x + offset_x;
        let ty = self.y + offset_y;
        if !self.grid.in_bounds(tx, ty) {
            return CellType::Blocked;
        }
        self.layout.cell(tx, ty)
    }

    /// Euclidean distance from the candidate to the nearest room center, or
    /// `f32::MAX` when the layout has no rooms.
    pub fn distance_to_nearest_room_center(&self) -> f32 {
        let here = glam::Vec2::new(self.x as f32, self.y as f32);
        self.layout
            .rooms()
            .iter()
            .map(|room| room.center().as_vec2().distance(here))
            .fold(f32::MAX, f32::min)
    }
}

/// A placement rule: gates candidate cells and/or reweights spawn
/// probability.
///
/// `evaluate` defaults to unconstrained acceptance and `modify_probability`
/// to identity, so purely probabilistic rules implement only the latter and
/// purely gating rules only the former. `priority` is informational in the
/// current design and preserved as data.
pub trait PlacementRule: Send + Sync {
    /// Whether the rule participates in evaluation.
    fn enabled(&self) -> bool {
        true
    }

    /// Informational ordering weight in `[0, 1]`; not yet used to order
    /// evaluation.
    fn priority(&self) -> f32 {
        0.5
    }

    /// Whether placement is allowed at the context's cell.
    fn evaluate(&self, _context: &PlacementContext<'_>) -> bool {
        true
    }

    /// Reweights the spawn probability for the context's cell.
    fn modify_probability(&self, _context: &PlacementContext<'_>, base: f32) -> f32 {
        base
    }
}

/// Ordered sequence of placement rules. Order matters for probability
/// composition: each rule sees the previous rule's output as its base.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn PlacementRule>>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule, preserving evaluation order.
    pub fn with_rule<R: PlacementRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends a boxed rule, preserving evaluation order.
    pub fn push(&mut self, rule: Box<dyn PlacementRule>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Short-circuiting AND over `evaluate` of every enabled rule in list
    /// order.
    pub fn validate_placement(&self, context: &PlacementContext<'_>) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.enabled())
            .all(|rule| rule.evaluate(context))
    }

    /// Folds `modify_probability` over every enabled rule in list order,
    /// then clamps into `[0, 1]`.
    pub fn final_probability(&self, context: &PlacementContext<'_>, base: f32) -> f32 {
        self.rules
            .iter()
            .filter(|rule| rule.enabled())
            .fold(base, |probability, rule| {
                rule.modify_probability(context, probability)
            })
            .clamp(0.0, 1.0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::grid::GridModel;
    use crate::layout::{Layout, Room};

    pub(crate) struct Fixture {
        pub grid: GridModel,
        pub layout: Layout,
    }

    impl Fixture {
        pub(crate) fn with_room() -> Self {
            let grid = GridModel::new(16, 16, 1.0).unwrap();
            let mut layout = Layout::new(&grid);
            layout.add_room(Room::new(4, 4, 5, 5));
            Self { grid, layout }
        }

        pub(crate) fn context(&self, x: i32, y: i32, category: Category) -> PlacementContext<'_> {
            let cell_type = if self.layout.in_bounds(x, y) {
                self.layout.cell(x, y)
            } else {
                CellType::Blocked
            };
            PlacementContext {
                x,
                y,
                cell_type,
                category,
                layout: &self.layout,
                grid: &self.grid,
                prior: &[],
            }
        }
    }

    struct Gate {
        allow: bool,
    }

    impl PlacementRule for Gate {
        fn evaluate(&self, _context: &PlacementContext<'_>) -> bool {
            self.allow
        }
    }

    struct Scale {
        factor: f32,
        enabled: bool,
    }

    impl PlacementRule for Scale {
        fn enabled(&self) -> bool {
            self.enabled
        }

        fn modify_probability(&self, _context: &PlacementContext<'_>, base: f32) -> f32 {
            base * self.factor
        }
    }

    #[test]
    fn cell_at_reports_blocked_out_of_bounds() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(0, 0, Category::Floor);
        assert_eq!(ctx.cell_at(-1, 0), CellType::Blocked);
        assert_eq!(ctx.cell_at(0, -1), CellType::Blocked);
        assert_eq!(ctx.cell_at(4, 4), CellType::Room);
        assert_eq!(ctx.cell_at(1, 0), CellType::Empty);
    }

    #[test]
    fn distance_to_nearest_room_center_is_euclidean() {
        let fixture = Fixture::with_room();
        // Room center is (6, 6).
        let ctx = fixture.context(6, 6, Category::Prop);
        assert_eq!(ctx.distance_to_nearest_room_center(), 0.0);

        let ctx = fixture.context(9, 10, Category::Prop);
        assert_eq!(ctx.distance_to_nearest_room_center(), 5.0);
    }

    #[test]
    fn distance_is_max_without_rooms() {
        let grid = GridModel::new(16, 16, 1.0).unwrap();
        let layout = Layout::new(&grid);
        let ctx = PlacementContext {
            x: 3,
            y: 3,
            cell_type: CellType::Empty,
            category: Category::Prop,
            layout: &layout,
            grid: &grid,
            prior: &[],
        };
        assert_eq!(ctx.distance_to_nearest_room_center(), f32::MAX);
    }

    #[test]
    fn any_failing_gate_rejects_placement() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Floor);

        let rules = RuleSet::new()
            .with_rule(Gate { allow: true })
            .with_rule(Gate { allow: false });
        assert!(!rules.validate_placement(&ctx));

        let rules = RuleSet::new().with_rule(Gate { allow: true });
        assert!(rules.validate_placement(&ctx));
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Floor);

        let rules = RuleSet::new()
            .with_rule(Scale {
                factor: 0.0,
                enabled: false,
            })
            .with_rule(Scale {
                factor: 0.5,
                enabled: true,
            });
        assert_eq!(rules.final_probability(&ctx, 1.0), 0.5);
    }

    #[test]
    fn probabilities_compose_in_list_order_and_clamp() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Floor);

        let rules = RuleSet::new()
            .with_rule(Scale {
                factor: 0.5,
                enabled: true,
            })
            .with_rule(Scale {
                factor: 0.5,
                enabled: true,
            });
        assert_eq!(rules.final_probability(&ctx, 1.0), 0.25);

        let rules = RuleSet::new().with_rule(Scale {
            factor: 3.0,
            enabled: true,
        });
        assert_eq!(rules.final_probability(&ctx, 1.0), 1.0);

        let rules = RuleSet::new().with_rule(Scale {
            factor: -1.0,
            enabled: true,
        });
        assert_eq!(rules.final_probability(&ctx, 1.0), 0.0);
    }

    #[test]
    fn empty_rule_set_accepts_and_passes_base_through() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Floor);
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        assert!(rules.validate_placement(&ctx));
        assert_eq!(rules.final_probability(&ctx, 0.7), 0.7);
    }
}
