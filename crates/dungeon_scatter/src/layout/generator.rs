//! Layout generation: room placement, connectivity, and corridor carving.
//!
//! [`generate`] places non-overlapping rooms by rejection sampling, connects
//! them into a spanning structure with a nearest-neighbor pass, adds a few
//! redundant loop edges, and carves L-shaped corridors. The whole pass is
//! deterministic for a fixed (grid, seed, params) triple.
use glam::IVec2;
use rand::RngCore;
use tracing::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::GridModel;
use crate::layout::{CellType, Layout, Room};
use crate::rng::{rand01, rand_index, rand_range};

/// Cells kept free between any room and the grid edge.
const BORDER_MARGIN: i32 = 2;
/// Padding under which two rooms count as overlapping.
const ROOM_PADDING: i32 = 2;

/// Parameters for one layout generation run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationParams {
    /// Number of room placement attempts (greedy rejection sampling).
    pub room_attempts: u32,
    /// Minimum room width in cells.
    pub min_w: i32,
    /// Maximum room width in cells.
    pub max_w: i32,
    /// Minimum room height in cells.
    pub min_h: i32,
    /// Maximum room height in cells.
    pub max_h: i32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            room_attempts: 80,
            min_w: 5,
            max_w: 12,
            min_h: 5,
            max_h: 10,
        }
    }
}

impl GenerationParams {
    /// Creates the default parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of room placement attempts.
    pub fn with_room_attempts(mut self, room_attempts: u32) -> Self {
        self.room_attempts = room_attempts;
        self
    }

    /// Sets the room width range in cells.
    pub fn with_width_range(mut self, min_w: i32, max_w: i32) -> Self {
        self.min_w = min_w;
        self.max_w = max_w;
        self
    }

    /// Sets the room height range in cells.
    pub fn with_height_range(mut self, min_h: i32, max_h: i32) -> Self {
        self.min_h = min_h;
        self.max_h = max_h;
        self
    }

    /// Validates the parameters, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.room_attempts == 0 {
            return Err(Error::InvalidConfig("room_attempts must be > 0".into()));
        }
        if self.min_w <= 0 || self.min_h <= 0 {
            return Err(Error::InvalidConfig(
                "room size minima must be > 0".into(),
            ));
        }
        if self.max_w < self.min_w || self.max_h < self.min_h {
            return Err(Error::InvalidConfig(
                "room size maxima must be >= minima".into(),
            ));
        }

        Ok(())
    }
}

/// Result of a layout generation run.
///
/// The counters surface degenerate-but-valid outcomes so the caller can
/// decide to retry with different parameters.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Generation {
    /// The generated layout.
    pub layout: Layout,
    /// Rooms accepted during placement.
    pub rooms_placed: usize,
    /// Placement attempts rejected for overlap or lack of space.
    pub attempts_rejected: usize,
    /// Cells carved to `Corridor`.
    pub corridor_cells: usize,
}

/// Generates a layout on `grid`, deterministic for a fixed RNG seed.
pub fn generate<R: RngCore>(
    grid: &GridModel,
    params: &GenerationParams,
    rng: &mut R,
) -> Result<Generation> {
    params.validate()?;

    let mut layout = Layout::new(grid);
    let mut rejected = 0usize;

    for _ in 0..params.room_attempts {
        let rw = rand_range(rng, params.min_w, params.max_w + 1);
        let rh = rand_range(rng, params.min_h, params.max_h + 1);

        let max_x = grid.width() - rw - BORDER_MARGIN;
        let max_y = grid.height() - rh - BORDER_MARGIN;
        if max_x <= BORDER_MARGIN || max_y <= BORDER_MARGIN {
            // Sampled size leaves no valid position on this grid.
            rejected += 1;
            continue;
        }

        let rx = rand_range(rng, BORDER_MARGIN, max_x);
        let ry = rand_range(rng, BORDER_MARGIN, max_y);
        let room = Room::new(rx, ry, rw, rh);

        if layout
            .rooms()
            .iter()
            .any(|r| r.intersects(&room, ROOM_PADDING))
        {
            rejected += 1;
            continue;
        }

        layout.add_room(room);
    }

    if layout.rooms().len() < 2 {
        warn!(
            rooms = layout.rooms().len(),
            "fewer than 2 rooms generated; increase room_attempts or grid size"
        );
    }

    connect_rooms(&mut layout, rng);

    let corridor_cells = layout
        .cells()
        .iter()
        .filter(|c| **c == CellType::Corridor)
        .count();
    info!(
        rooms = layout.rooms().len(),
        corridor_cells, rejected, "layout generated"
    );

    Ok(Generation {
        rooms_placed: layout.rooms().len(),
        attempts_rejected: rejected,
        corridor_cells,
        layout,
    })
}

/// Connects all rooms into one component, then adds redundant loop edges.
fn connect_rooms<R: RngCore>(layout: &mut Layout, rng: &mut R) {
    let count = layout.rooms().len();
    if count == 0 {
        return;
    }

    // Nearest-neighbor spanning pass. Iteration is in ascending room index
    // on both sides with a strict `<` comparison, so ties resolve to the
    // first minimal pair in index order and runs stay seed-reproducible.
    let mut connected = vec![false; count];
    connected[0] = true;
    let mut remaining = count - 1;

    while remaining > 0 {
        let mut best: Option<(usize, usize)> = None;
        let mut best_dist = f32::MAX;

        for a in 0..count {
            if !connected[a] {
                continue;
            }
            for b in 0..count {
                if connected[b] {
                    continue;
                }
                let dist = center_distance(layout.rooms()[a], layout.rooms()[b]);
                if dist < best_dist {
                    best_dist = dist;
                    best = Some((a, b));
                }
            }
        }

        match best {
            Some((a, b)) => {
                let from = layout.rooms()[a].center();
                let to = layout.rooms()[b].center();
                carve_corridor(layout, from, to, rng);
                connected[b] = true;
                remaining -= 1;
            }
            None => {
                // Unreachable while the connected/unconnected split holds.
                warn!("connectivity pass found no pair to connect; aborting");
                break;
            }
        }
    }

    // Extra loop edges for redundant paths. Both indices are drawn even when
    // they collide, keeping RNG consumption fixed per iteration.
    let extra = usize::max(1, count / 5);
    for _ in 0..extra {
        let a = rand_index(rng, count);
        let b = rand_index(rng, count);
        if a != b {
            let from = layout.rooms()[a].center();
            let to = layout.rooms()[b].center();
            carve_corridor(layout, from, to, rng);
        }
    }
}

fn center_distance(a: Room, b: Room) -> f32 {
    a.center().as_vec2().distance(b.center().as_vec2())
}

/// Carves an L-shaped corridor between two grid points, axis order randomized.
fn carve_corridor<R: RngCore>(layout: &mut Layout, from: IVec2, to: IVec2, rng: &mut R) {
    let horizontal_first = rand01(rng) < 0.5;

    if horizontal_first {
        carve_line_x(layout, from.x, to.x, from.y);
        carve_line_y(layout, from.y, to.y, to.x);
    } else {
        carve_line_y(layout, from.y, to.y, from.x);
        carve_line_x(layout, from.x, to.x, to.y);
    }
}

fn carve_line_x(layout: &mut Layout, x0: i32, x1: i32, y: i32) {
    let step = if x0 <= x1 { 1 } else { -1 };
    let mut x = x0;
    loop {
        layout.carve_cell(x, y);
        if x == x1 {
            break;
        }
        x += step;
    }
}

fn carve_line_y(layout: &mut Layout, y0: i32, y1: i32, x: i32) {
    let step = if y0 <= y1 { 1 } else { -1 };
    let mut y = y0;
    loop {
        layout.carve_cell(x, y);
        if y == y1 {
            break;
        }
        y += step;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn grid_40x30() -> GridModel {
        GridModel::new(40, 30, 1.0).unwrap()
    }

    fn generate_seeded(seed: u64) -> Generation {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(&grid_40x30(), &GenerationParams::default(), &mut rng).unwrap()
    }

    #[test]
    fn rejects_invalid_params() {
        let params = GenerationParams::default().with_room_attempts(0);
        assert!(params.validate().is_err());

        let params = GenerationParams::default().with_width_range(8, 5);
        assert!(params.validate().is_err());

        let params = GenerationParams::default().with_height_range(0, 4);
        assert!(params.validate().is_err());
    }

    #[test]
    fn same_seed_yields_identical_layouts() {
        let a = generate_seeded(1337);
        let b = generate_seeded(1337);

        assert_eq!(a.rooms_placed, b.rooms_placed);
        assert_eq!(a.corridor_cells, b.corridor_cells);
        assert_eq!(a.layout.rooms(), b.layout.rooms());
        assert_eq!(a.layout.cells(), b.layout.cells());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = generate_seeded(1337);
        let b = generate_seeded(7331);
        assert_ne!(a.layout.cells(), b.layout.cells());
    }

    #[test]
    fn accepted_rooms_never_overlap_under_padding() {
        let result = generate_seeded(42);
        let rooms = result.layout.rooms();
        for (i, a) in rooms.iter().enumerate() {
            for b in rooms.iter().skip(i + 1) {
                assert!(!a.intersects(b, 2), "rooms {a:?} and {b:?} overlap");
            }
        }
    }

    #[test]
    fn room_cells_are_stamped_and_never_carved() {
        let result = generate_seeded(42);
        let layout = &result.layout;
        for room in layout.rooms() {
            for x in room.x..room.x + room.w {
                for y in room.y..room.y + room.h {
                    assert_eq!(layout.cell(x, y), CellType::Room);
                }
            }
        }
    }

    #[test]
    fn rooms_respect_border_margin() {
        let result = generate_seeded(42);
        let layout = &result.layout;
        for room in layout.rooms() {
            assert!(room.x >= 2 && room.y >= 2);
            assert!(room.x + room.w <= layout.width() - 2);
            assert!(room.y + room.h <= layout.height() - 2);
        }
    }

    #[test]
    fn all_rooms_connected_through_walkable_cells() {
        for seed in [1, 42, 1337, 9000] {
            let result = generate_seeded(seed);
            let layout = &result.layout;
            if layout.rooms().len() < 2 {
                continue;
            }

            // Flood fill over walkable cells from the first room center.
            let start = layout.rooms()[0].center();
            let mut seen = vec![false; (layout.width() * layout.height()) as usize];
            let mut queue = VecDeque::new();
            seen[(start.y * layout.width() + start.x) as usize] = true;
            queue.push_back(start);
            while let Some(p) = queue.pop_front() {
                for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                    let (nx, ny) = (p.x + dx, p.y + dy);
                    if !layout.in_bounds(nx, ny) || !layout.cell(nx, ny).is_walkable() {
                        continue;
                    }
                    let idx = (ny * layout.width() + nx) as usize;
                    if !seen[idx] {
                        seen[idx] = true;
                        queue.push_back(IVec2::new(nx, ny));
                    }
                }
            }

            for room in layout.rooms() {
                let c = room.center();
                assert!(
                    seen[(c.y * layout.width() + c.x) as usize],
                    "room at {c:?} unreachable with seed {seed}"
                );
            }
        }
    }

    #[test]
    fn no_blocked_cells_are_produced() {
        let result = generate_seeded(1337);
        assert!(result
            .layout
            .cells()
            .iter()
            .all(|c| *c != CellType::Blocked));
    }

    #[test]
    fn oversized_rooms_degrade_to_rejections_not_errors() {
        let grid = GridModel::new(10, 10, 1.0).unwrap();
        let params = GenerationParams::default()
            .with_width_range(12, 14)
            .with_height_range(12, 14);
        let mut rng = StdRng::seed_from_u64(5);
        let result = generate(&grid, &params, &mut rng).unwrap();
        assert_eq!(result.rooms_placed, 0);
        assert_eq!(result.attempts_rejected, 80);
        assert_eq!(result.corridor_cells, 0);
    }

    #[test]
    fn single_room_yields_no_corridors() {
        // One attempt on a small grid: at most one room, no pair to connect.
        let grid = GridModel::new(12, 12, 1.0).unwrap();
        let params = GenerationParams::default()
            .with_room_attempts(1)
            .with_width_range(5, 5)
            .with_height_range(5, 5);
        let mut rng = StdRng::seed_from_u64(3);
        let result = generate(&grid, &params, &mut rng).unwrap();
        assert!(result.rooms_placed <= 1);
        assert_eq!(result.corridor_cells, 0);
    }

    #[test]
    fn carve_lines_clamp_to_bounds() {
        let grid = GridModel::new(10, 10, 1.0).unwrap();
        let mut layout = Layout::new(&grid);
        carve_line_x(&mut layout, -3, 12, 4);
        carve_line_y(&mut layout, -3, 12, 4);
        // Every in-bounds cell along the runs is carved, nothing panics.
        for x in 0..10 {
            assert_eq!(layout.cell(x, 4), CellType::Corridor);
        }
        for y in 0..10 {
            assert_eq!(layout.cell(4, y), CellType::Corridor);
        }
    }
}
