//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (world generation, simulation, terminal rendering).
//!
//! # World Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `WORLD_WIDTH` | 120 | Columns per section |
//! | `WORLD_HEIGHT` | 28 | Rows per section |
//! | `SKY_HEIGHT` | 13 | First ground row (rows above are sky) |
//! | `GROUND_START` | 16 | First row of the cave/ore layer |
//! | `SECTION_COUNT` | 5 | Sections generated at startup |
//!
//! # Timing
//!
//! - `TICK_MS`: 100ms fixed tick. One intent and one gravity step per tick.
//!
//! # Tiles
//!
//! Every tile kind is classified by a single table (see [`Tile::props`]):
//!
//! | Tile | Glyph | Walkable | Destructible |
//! |------|-------|----------|--------------|
//! | Empty | ` ` | yes | no |
//! | Ground | `#` | no | yes |
//! | Cloud | `~` | yes | no |
//! | TreeTrunk | `\|` | no | yes |
//! | TreeFoliage | `^` | no | yes |
//! | OreCommon | `*` | yes | yes |
//! | OreUncommon | `%` | yes | yes |
//! | OreRare | `♦` | yes | yes |
//!
//! # Examples
//!
//! ```
//! use tui_sandbox_types::{Direction, Intent, Tile};
//!
//! assert!(Tile::Cloud.is_walkable());
//! assert!(!Tile::Ground.is_walkable());
//! assert!(Tile::TreeTrunk.is_destructible());
//! assert_eq!(Tile::Ground.glyph(), '#');
//!
//! assert_eq!(Intent::Left.direction(), Some(Direction::Left));
//! assert_eq!(Intent::Mine.direction(), None);
//! ```

/// Section width in cells.
pub const WORLD_WIDTH: u16 = 120;

/// Section height in cells.
pub const WORLD_HEIGHT: u16 = 28;

/// First ground row. Rows above it are sky.
pub const SKY_HEIGHT: u16 = WORLD_HEIGHT - 15;

/// First row of the underground layer (caves, ore, ground-rooted trees).
pub const GROUND_START: u16 = SKY_HEIGHT + 3;

/// Number of pre-generated world sections.
pub const SECTION_COUNT: usize = 5;

/// Index of the section the player starts in.
pub const START_SECTION: usize = 0;

/// Fixed tick interval in milliseconds.
pub const TICK_MS: u32 = 100;

/// Capacity of the intent queue between the input thread and the tick loop.
pub const INTENT_QUEUE_CAPACITY: usize = 4;

/// Glyph used for the player.
pub const PLAYER_GLYPH: char = '☺';

/// Number of tile kinds.
pub const TILE_COUNT: usize = 8;

/// A terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Tile {
    #[default]
    Empty,
    Ground,
    Cloud,
    TreeTrunk,
    TreeFoliage,
    OreCommon,
    OreUncommon,
    OreRare,
}

/// Classification of a tile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProps {
    pub glyph: char,
    pub walkable: bool,
    pub destructible: bool,
}

/// Indexed by `Tile as usize`.
const TILE_PROPS: [TileProps; TILE_COUNT] = [
    TileProps { glyph: ' ', walkable: true, destructible: false },
    TileProps { glyph: '#', walkable: false, destructible: true },
    TileProps { glyph: '~', walkable: true, destructible: false },
    TileProps { glyph: '|', walkable: false, destructible: true },
    TileProps { glyph: '^', walkable: false, destructible: true },
    TileProps { glyph: '*', walkable: true, destructible: true },
    TileProps { glyph: '%', walkable: true, destructible: true },
    TileProps { glyph: '♦', walkable: true, destructible: true },
];

impl Tile {
    /// All tile kinds in declaration order.
    pub const ALL: [Tile; TILE_COUNT] = [
        Tile::Empty,
        Tile::Ground,
        Tile::Cloud,
        Tile::TreeTrunk,
        Tile::TreeFoliage,
        Tile::OreCommon,
        Tile::OreUncommon,
        Tile::OreRare,
    ];

    /// Classification row for this tile.
    #[inline]
    pub fn props(self) -> TileProps {
        TILE_PROPS[self.index()]
    }

    /// Stable index into per-tile tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the player may occupy this tile.
    #[inline]
    pub fn is_walkable(self) -> bool {
        self.props().walkable
    }

    /// Whether the player may mine this tile.
    #[inline]
    pub fn is_destructible(self) -> bool {
        self.props().destructible
    }

    pub fn glyph(self) -> char {
        self.props().glyph
    }

    pub fn is_ore(self) -> bool {
        matches!(self, Tile::OreCommon | Tile::OreUncommon | Tile::OreRare)
    }

    /// Lowercase name, for logs and debugging.
    pub fn as_str(self) -> &'static str {
        match self {
            Tile::Empty => "empty",
            Tile::Ground => "ground",
            Tile::Cloud => "cloud",
            Tile::TreeTrunk => "tree_trunk",
            Tile::TreeFoliage => "tree_foliage",
            Tile::OreCommon => "ore_common",
            Tile::OreUncommon => "ore_uncommon",
            Tile::OreRare => "ore_rare",
        }
    }
}

/// Last movement direction of the player.
///
/// `None` until the first directional intent; afterwards it only changes when
/// another directional intent arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset `(dx, dy)`; `(0, 0)` for `None`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A discrete, already-debounced player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Step up one row (only into an Empty cell)
    Up,
    /// Step down one row
    Down,
    /// Step one column left, climbing one-cell ledges
    Left,
    /// Step one column right, climbing one-cell ledges
    Right,
    /// Destroy the tile adjacent in the last movement direction
    Mine,
}

impl Intent {
    /// The direction this intent records, if it is a movement.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Intent::Up => Some(Direction::Up),
            Intent::Down => Some(Direction::Down),
            Intent::Left => Some(Direction::Left),
            Intent::Right => Some(Direction::Right),
            Intent::Mine => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Up => "up",
            Intent::Down => "down",
            Intent::Left => "left",
            Intent::Right => "right",
            Intent::Mine => "mine",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table_matches_tile_order() {
        for (i, tile) in Tile::ALL.iter().enumerate() {
            assert_eq!(tile.index(), i);
        }
    }

    #[test]
    fn walkable_set() {
        let walkable: Vec<Tile> = Tile::ALL.into_iter().filter(|t| t.is_walkable()).collect();
        assert_eq!(
            walkable,
            vec![
                Tile::Empty,
                Tile::Cloud,
                Tile::OreCommon,
                Tile::OreUncommon,
                Tile::OreRare
            ]
        );
    }

    #[test]
    fn destructible_set() {
        assert!(!Tile::Empty.is_destructible());
        assert!(!Tile::Cloud.is_destructible());
        for t in [
            Tile::Ground,
            Tile::TreeTrunk,
            Tile::TreeFoliage,
            Tile::OreCommon,
            Tile::OreUncommon,
            Tile::OreRare,
        ] {
            assert!(t.is_destructible(), "{} should be destructible", t.as_str());
        }
    }

    #[test]
    fn default_layout_constants() {
        assert_eq!(SKY_HEIGHT, 13);
        assert_eq!(GROUND_START, 16);
        assert!(GROUND_START < WORLD_HEIGHT);
    }

    #[test]
    fn intent_backlog_stays_under_half_a_second() {
        assert!(INTENT_QUEUE_CAPACITY >= 1);
        assert!(INTENT_QUEUE_CAPACITY as u32 * TICK_MS <= 400);
    }

    #[test]
    fn direction_offsets() {
        assert_eq!(Direction::None.offset(), (0, 0));
        assert_eq!(Direction::Up.offset(), (0, -1));
        assert_eq!(Direction::Right.offset(), (1, 0));
    }
}
