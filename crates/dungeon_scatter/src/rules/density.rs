//! Density rule: distance-based probability falloff around room centers.
use crate::placement::Category;
use crate::rules::{Curve, PlacementContext, PlacementRule};

/// Reweights spawn probability by distance to the nearest room center.
///
/// The distance is mapped through a sampled [`Curve`] and multiplied into
/// the incoming probability. The rule never gates: contexts outside its
/// category allow-list, or on non-room cells when `rooms_only` is set, pass
/// the base probability through unchanged.
pub struct DensityRule {
    pub enabled: bool,
    pub priority: f32,
    curve: Curve,
    categories: Vec<Category>,
    rooms_only: bool,
}

impl DensityRule {
    /// Creates a density rule with the given falloff curve, applying to
    /// `Prop` placements on room cells only.
    pub fn new(curve: Curve) -> Self {
        Self {
            enabled: true,
            priority: 0.5,
            curve,
            categories: vec![Category::Prop],
            rooms_only: true,
        }
    }

    /// Default falloff: full probability at a room center, tapering to 0.1
    /// at distance 10.
    pub fn with_default_falloff() -> Self {
        Self::new(Curve::linear(0.0, 1.0, 10.0, 0.1))
    }

    /// Sets the categories this rule applies to.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Sets whether the rule only applies on `Room` cells.
    pub fn with_rooms_only(mut self, rooms_only: bool) -> Self {
        self.rooms_only = rooms_only;
        self
    }

    /// Sets the informational priority.
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = priority.clamp(0.0, 1.0);
        self
    }
}

impl PlacementRule for DensityRule {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn priority(&self) -> f32 {
        self.priority
    }

    fn modify_probability(&self, context: &PlacementContext<'_>, base: f32) -> f32 {
        if !self.categories.contains(&context.category) {
            return base;
        }
        if self.rooms_only && context.cell_type != crate::layout::CellType::Room {
            return base;
        }

        let distance = context.distance_to_nearest_room_center();
        base * self.curve.evaluate(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::Fixture;
    use crate::rules::RuleSet;

    #[test]
    fn constant_half_curve_halves_probability() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Prop);

        let rules = RuleSet::new().with_rule(DensityRule::new(Curve::constant(0.5)));
        assert_eq!(rules.final_probability(&ctx, 1.0), 0.5);
    }

    #[test]
    fn two_density_rules_compose_multiplicatively() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Prop);

        let rules = RuleSet::new()
            .with_rule(DensityRule::new(Curve::constant(0.5)))
            .with_rule(DensityRule::new(Curve::constant(0.5)));
        assert_eq!(rules.final_probability(&ctx, 1.0), 0.25);
    }

    #[test]
    fn never_gates_placement() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Prop);
        let rule = DensityRule::new(Curve::constant(0.0));
        assert!(rule.evaluate(&ctx));
    }

    #[test]
    fn category_outside_allow_list_passes_through() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Floor);
        let rule = DensityRule::new(Curve::constant(0.5));
        assert_eq!(rule.modify_probability(&ctx, 0.8), 0.8);
    }

    #[test]
    fn rooms_only_passes_through_on_corridor_cells() {
        let fixture = Fixture::with_room();
        // (1, 1) is Empty in the fixture; treat as the non-room case.
        let ctx = fixture.context(1, 1, Category::Prop);
        let rule = DensityRule::new(Curve::constant(0.5));
        assert_eq!(rule.modify_probability(&ctx, 0.8), 0.8);

        let anywhere = DensityRule::new(Curve::constant(0.5)).with_rooms_only(false);
        assert_eq!(anywhere.modify_probability(&ctx, 0.8), 0.4);
    }

    #[test]
    fn falloff_follows_distance_from_room_center() {
        let fixture = Fixture::with_room();
        let rule = DensityRule::new(Curve::linear(0.0, 1.0, 10.0, 0.0));

        // Room center is (6, 6).
        let at_center = fixture.context(6, 6, Category::Prop);
        assert_eq!(rule.modify_probability(&at_center, 1.0), 1.0);

        let at_edge = fixture.context(6, 8, Category::Prop);
        assert!((rule.modify_probability(&at_edge, 1.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn disabled_rule_is_skipped_by_rule_set() {
        let fixture = Fixture::with_room();
        let ctx = fixture.context(5, 5, Category::Prop);

        let mut rule = DensityRule::new(Curve::constant(0.0));
        rule.enabled = false;
        let rules = RuleSet::new().with_rule(rule);
        assert_eq!(rules.final_probability(&ctx, 1.0), 1.0);
    }
}
