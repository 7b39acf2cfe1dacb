//! The placement planning pass: walks a generated layout and emits ordered
//! placement decisions for floors and walls.
//!
//! The planner instantiates nothing. For each eligible cell it builds a
//! transient [`PlacementContext`], consults the optional [`RuleSet`]
//! (gate, then probability), and on acceptance draws a prefab key from the
//! [`WeightedPrefabTable`]. Decision order is fixed: the floor pass emits in
//! loop order (outer x, inner y), then the wall pass does the same, so runs
//! are reproducible for a fixed seed.
use rand::RngCore;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::GridModel;
use crate::layout::{CellType, Layout};
use crate::placement::{Category, PlacementDecision, WeightedPrefabTable};
use crate::rng::rand01;
use crate::rules::{PlacementContext, RuleSet};

/// Neighbor probe order for the wall pass.
const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Configuration for one planning run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanConfig {
    /// Whether the wall pass runs.
    pub spawn_walls: bool,
    /// Base spawn probability handed to the rule set for reweighting.
    pub base_probability: f32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            spawn_walls: true,
            base_probability: 1.0,
        }
    }
}

impl PlanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the wall pass runs.
    pub fn with_spawn_walls(mut self, spawn_walls: bool) -> Self {
        self.spawn_walls = spawn_walls;
        self
    }

    /// Sets the base spawn probability.
    pub fn with_base_probability(mut self, base_probability: f32) -> Self {
        self.base_probability = base_probability;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.base_probability) {
            return Err(Error::InvalidConfig(format!(
                "base_probability must be in [0, 1], got {}",
                self.base_probability
            )));
        }

        Ok(())
    }
}

/// Result of a planning run.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct PlanResult {
    /// Placement decisions in emission order: floors first, then walls.
    pub decisions: Vec<PlacementDecision>,
    /// Candidate cells evaluated across both passes.
    pub cells_evaluated: usize,
    /// Candidate cells rejected by rule gating or the probability roll.
    pub cells_rejected: usize,
}

/// Plans placements for `layout`, deterministic for a fixed RNG seed.
pub fn plan<R: RngCore>(
    grid: &GridModel,
    layout: &Layout,
    prefabs: &WeightedPrefabTable,
    rules: Option<&RuleSet>,
    config: &PlanConfig,
    rng: &mut R,
) -> Result<PlanResult> {
    config.validate()?;
    if layout.width() != grid.width() || layout.height() != grid.height() {
        return Err(Error::InvalidConfig(format!(
            "layout is {}x{} but grid is {}x{}",
            layout.width(),
            layout.height(),
            grid.width(),
            grid.height()
        )));
    }

    let mut decisions: Vec<PlacementDecision> = Vec::new();
    let mut evaluated = 0usize;
    let mut rejected = 0usize;

    // Floor pass: every room or corridor cell.
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let cell = layout.cell(x, y);
            if !cell.is_walkable() {
                continue;
            }
            evaluated += 1;

            if !cell_accepted(
                grid,
                layout,
                rules,
                config,
                &decisions,
                x,
                y,
                cell,
                Category::Floor,
                rng,
            ) {
                rejected += 1;
                continue;
            }

            match prefabs.sample(rng, Category::Floor) {
                Some(key) => decisions.push(PlacementDecision {
                    x,
                    y,
                    category: Category::Floor,
                    key: key.to_owned(),
                    world_position: grid.cell_to_world(x, y),
                }),
                None => debug!(x, y, "no eligible floor prefab; skipping cell"),
            }
        }
    }

    let floors = decisions.len();

    // Wall pass: empty cells bordering a room or corridor cell. The visited
    // mask is set when a candidate is first considered, so each position gets
    // at most one rule evaluation, one roll, and one decision.
    if config.spawn_walls {
        let mut visited = vec![false; grid.cell_count()];

        for x in 0..grid.width() {
            for y in 0..grid.height() {
                if !layout.cell(x, y).is_walkable() {
                    continue;
                }

                for (dx, dy) in NEIGHBORS {
                    let (wx, wy) = (x + dx, y + dy);
                    if !grid.in_bounds(wx, wy) {
                        continue;
                    }
                    let idx = grid.index(wx, wy);
                    if visited[idx] || layout.cell(wx, wy) != CellType::Empty {
                        continue;
                    }
                    visited[idx] = true;
                    evaluated += 1;

                    if !cell_accepted(
                        grid,
                        layout,
                        rules,
                        config,
                        &decisions,
                        wx,
                        wy,
                        CellType::Empty,
                        Category::Wall,
                        rng,
                    ) {
                        rejected += 1;
                        continue;
                    }

                    match prefabs.sample(rng, Category::Wall) {
                        Some(key) => decisions.push(PlacementDecision {
                            x: wx,
                            y: wy,
                            category: Category::Wall,
                            key: key.to_owned(),
                            world_position: grid.cell_to_world(wx, wy),
                        }),
                        None => debug!(x = wx, y = wy, "no eligible wall prefab; skipping cell"),
                    }
                }
            }
        }
    }

    info!(
        floors,
        walls = decisions.len() - floors,
        evaluated,
        rejected,
        "placement plan complete"
    );

    Ok(PlanResult {
        decisions,
        cells_evaluated: evaluated,
        cells_rejected: rejected,
    })
}

/// Gate-then-probability acceptance for one candidate cell.
///
/// Without a rule set every candidate is accepted outright and no RNG is
/// consumed; with one, rejection by any enabled gate skips the cell, and an
/// accepted cell must still win a roll against the folded probability.
#[allow(clippy::too_many_arguments)]
fn cell_accepted<R: RngCore>(
    grid: &GridModel,
    layout: &Layout,
    rules: Option<&RuleSet>,
    config: &PlanConfig,
    prior: &[PlacementDecision],
    x: i32,
    y: i32,
    cell_type: CellType,
    category: Category,
    rng: &mut R,
) -> bool {
    let Some(rules) = rules else {
        return true;
    };

    let context = PlacementContext {
        x,
        y,
        cell_type,
        category,
        layout,
        grid,
        prior,
    };

    if !rules.validate_placement(&context) {
        return false;
    }

    let probability = rules.final_probability(&context, config.base_probability);
    rand01(rng) < probability
}
