#![forbid(unsafe_code)]
//! dungeon_scatter: procedural dungeon layout generation with rule-based placement planning.
//!
//! Modules:
//! - grid: grid dimensions, bounds checks, cell-to-world mapping
//! - layout: cell/room data model and the layout generator (rooms, connectivity, corridors)
//! - rules: per-cell placement gating and probability reweighting
//! - placement: weighted prefab selection and the planning pass emitting placement decisions
//!
//! Generation and planning are deterministic for a fixed (grid, seed, params)
//! triple; every entry point threads a caller-owned RNG. The crate produces
//! data only: rendering and instantiation belong to the consumer.
pub mod error;
pub mod grid;
pub mod layout;
pub mod placement;
pub mod rules;

mod rng;

pub use rng::seeded_rng;

/// Convenient re-exports for common types. Import with `use dungeon_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::GridModel;
    pub use crate::layout::{generate, CellType, Generation, GenerationParams, Layout, Room};
    pub use crate::placement::{
        plan, Category, PlacementDecision, PlanConfig, PlanResult, PrefabEntry, PrefabKey,
        WeightedPrefabTable,
    };
    pub use crate::rng::seeded_rng;
    pub use crate::rules::{
        AdjacencyConstraint, AdjacencyRule, Curve, DensityRule, PlacementContext, PlacementRule,
        RuleSet,
    };
}
