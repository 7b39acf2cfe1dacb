//! Placement planning: categories, weighted prefab selection, and the
//! per-cell planning pass that turns a layout into placement decisions.
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod planner;
pub mod prefabs;

pub use planner::{plan, PlanConfig, PlanResult};
pub use prefabs::{PrefabEntry, WeightedPrefabTable};

pub type PrefabKey = String;

/// Category of object a placement decision refers to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Floor,
    Wall,
    Prop,
}

/// One planned placement: the only artifact crossing the core/renderer
/// boundary. The consumer maps `key` to an asset and spawns it at
/// `world_position`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementDecision {
    /// Cell X coordinate.
    pub x: i32,
    /// Cell Y coordinate.
    pub y: i32,
    /// Category the decision was planned for.
    pub category: Category,
    /// Prefab key selected from the weighted table.
    pub key: PrefabKey,
    /// World position of the cell, from [`crate::grid::GridModel::cell_to_world`].
    pub world_position: Vec2,
}
