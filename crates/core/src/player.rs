//! Player module - position, facing and inventory, plus the movement rules.
//!
//! Movement is validated against a [`TileGrid`] but never mutates it; the
//! [`World`](crate::World) applies the result and records dirty cells.

use arrayvec::ArrayVec;

use crate::grid::TileGrid;
use crate::types::{Direction, Tile, TILE_COUNT};

/// Per-tile tally of mined tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inventory {
    counts: [u32; TILE_COUNT],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tile: Tile) {
        self.counts[tile.index()] = self.counts[tile.index()].saturating_add(1);
    }

    pub fn count(&self, tile: Tile) -> u32 {
        self.counts[tile.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero entries in tile order.
    ///
    /// This is stack-only and does not allocate.
    pub fn entries(&self) -> ArrayVec<(Tile, u32), TILE_COUNT> {
        Tile::ALL
            .into_iter()
            .filter_map(|t| {
                let n = self.count(t);
                (n > 0).then_some((t, n))
            })
            .collect()
    }
}

/// The player entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub x: i32,
    pub y: i32,
    pub last_direction: Direction,
    pub inventory: Inventory,
}

impl PlayerState {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            last_direction: Direction::None,
            inventory: Inventory::new(),
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// The cell mining would hit, or `None` before the first movement intent.
    pub fn facing_cell(&self) -> Option<(i32, i32)> {
        match self.last_direction {
            Direction::None => None,
            dir => {
                let (dx, dy) = dir.offset();
                Some((self.x + dx, self.y + dy))
            }
        }
    }
}

/// Where a step in `dir` from (x, y) lands, or `None` if the player stays.
///
/// - Up only targets the cell above when it is Empty.
/// - Left/Right climb one row when the destination is Ground and the cell
///   above it is inside and not Ground.
/// - The final target must be inside the grid and walkable.
pub fn move_target(grid: &TileGrid, x: i32, y: i32, dir: Direction) -> Option<(i32, i32)> {
    let target = match dir {
        Direction::None => return None,
        Direction::Up => {
            if grid.is(x, y - 1, Tile::Empty) {
                (x, y - 1)
            } else {
                return None;
            }
        }
        Direction::Down => (x, y + 1),
        Direction::Left | Direction::Right => {
            let (dx, _) = dir.offset();
            let nx = x + dx;
            if grid.is(nx, y, Tile::Ground)
                && grid.is_inside(nx, y - 1)
                && !grid.is(nx, y - 1, Tile::Ground)
            {
                (nx, y - 1)
            } else {
                (nx, y)
            }
        }
    };

    grid.is_walkable(target.0, target.1).then_some(target)
}
