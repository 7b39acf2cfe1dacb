use dungeon_scatter::prelude::*;
use dungeon_scatter_examples::{init_tracing, render_plan_to_png, RenderConfig};

/// Full pipeline: generate a layout, plan placements with a density falloff
/// on floors, and render the result to a PNG.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let grid = GridModel::new(64, 48, 1.0)?;
    let mut rng = seeded_rng(Some(42));

    let generation = generate(
        &grid,
        &GenerationParams::default().with_room_attempts(120),
        &mut rng,
    )?;

    let table = WeightedPrefabTable::new()
        .with_entry(Category::Floor, "floor_stone", 0.8)
        .with_entry(Category::Floor, "floor_cracked", 0.2)
        .with_entry(Category::Wall, "wall_brick", 1.0);

    // Floors thin out with distance from the nearest room center; walls are
    // untouched by the rule.
    let rules = RuleSet::new().with_rule(
        DensityRule::new(Curve::linear(0.0, 1.0, 12.0, 0.15))
            .with_categories(vec![Category::Floor])
            .with_rooms_only(false),
    );

    let result = plan(
        &grid,
        &generation.layout,
        &table,
        Some(&rules),
        &PlanConfig::default(),
        &mut rng,
    )?;

    println!(
        "decisions: {} | evaluated: {} | rejected: {}",
        result.decisions.len(),
        result.cells_evaluated,
        result.cells_rejected
    );

    let out = "placement-density-falloff.png";
    render_plan_to_png(
        &generation.layout,
        &result,
        &RenderConfig::new(12),
        out,
    )?;
    println!("wrote {out}");

    Ok(())
}
