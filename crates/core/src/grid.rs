//! Grid module - the tile array of one world section
//!
//! A section is a `width x height` grid where each cell holds one [`Tile`].
//! Uses a flat array, row-major (`y * width + x`).
//! Coordinates: (x, y) with x growing to the right and y growing downwards;
//! row 0 is the top of the sky.
//!
//! Every accessor validates coordinates through [`TileGrid::is_inside`]; writes
//! outside the grid are skipped rather than treated as errors.

use crate::types::Tile;

/// A mutable grid of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with [`Tile::Empty`].
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Tile::Empty)
    }

    pub fn filled(width: u16, height: u16, tile: Tile) -> Self {
        Self {
            width,
            height,
            cells: vec![tile; (width as usize) * (height as usize)],
        }
    }

    /// Build a grid from text rows, one glyph per cell.
    ///
    /// Unknown glyphs become Empty; short rows are padded with Empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let tile = Tile::ALL
                    .into_iter()
                    .find(|t| t.glyph() == ch)
                    .unwrap_or(Tile::Empty);
                grid.set(x as i32, y as i32, tile);
            }
        }
        grid
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.is_inside(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The bounds predicate used by every other operation.
    #[inline]
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Get tile at position (x, y)
    /// Returns None if out of bounds
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set tile at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = tile;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is inside and equal to `tile`.
    pub fn is(&self, x: i32, y: i32, tile: Tile) -> bool {
        self.get(x, y) == Some(tile)
    }

    /// Whether (x, y) is inside and the player may stand there.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Tile::is_walkable)
    }

    /// Whether (x, y) is inside and can be mined.
    pub fn is_destructible(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Tile::is_destructible)
    }

    /// Replace a destructible tile with Empty.
    ///
    /// Returns the removed kind, or `None` (and leaves the grid untouched) when
    /// the cell is outside or not destructible.
    pub fn destroy(&mut self, x: i32, y: i32) -> Option<Tile> {
        let idx = self.index(x, y)?;
        let tile = self.cells[idx];
        if !tile.is_destructible() {
            return None;
        }
        self.cells[idx] = Tile::Empty;
        Some(tile)
    }

    /// One gravity step for an entity at (x, y).
    ///
    /// Moves down exactly one row when the cell below is inside and walkable,
    /// otherwise stays put. Falling further is the next tick's job.
    pub fn gravity_step(&self, x: i32, y: i32) -> (i32, i32) {
        if self.is_walkable(x, y + 1) {
            (x, y + 1)
        } else {
            (x, y)
        }
    }

    /// Find where the player appears.
    ///
    /// Scans columns from `width / 2` rightward and rows top to bottom; the
    /// first Ground cell with an Empty cell directly above it wins, and the
    /// spawn is that Empty cell.
    pub fn find_spawn(&self) -> Option<(i32, i32)> {
        let w = self.width as i32;
        let h = self.height as i32;
        for x in w / 2..w {
            for y in 1..h {
                if self.is(x, y, Tile::Ground) && self.is(x, y - 1, Tile::Empty) {
                    return Some((x, y - 1));
                }
            }
        }
        None
    }

    /// Fill every cell of row `y` with `tile`.
    pub fn fill_row(&mut self, y: i32, tile: Tile) {
        for x in 0..self.width as i32 {
            self.set(x, y, tile);
        }
    }

    /// Count cells equal to `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Iterate one row left to right.
    pub fn row(&self, y: i32) -> impl Iterator<Item = Tile> + '_ {
        let w = self.width as usize;
        let start = if self.is_inside(0, y) { y as usize * w } else { 0 };
        let len = if self.is_inside(0, y) { w } else { 0 };
        self.cells[start..start + len].iter().copied()
    }

    /// Render the grid as glyph rows, for debugging and tests.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as i32)
            .map(|y| self.row(y).map(Tile::glyph).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = TileGrid::new(10, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_set_out_of_bounds_is_skipped() {
        let mut grid = TileGrid::new(4, 4);
        assert!(!grid.set(-1, 0, Tile::Ground));
        assert!(!grid.set(0, 4, Tile::Ground));
        assert_eq!(grid.count(Tile::Ground), 0);
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = ["  ~ ", " ^  ", " |# ", "####"];
        let grid = TileGrid::from_rows(&rows);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.get(2, 0), Some(Tile::Cloud));
        assert_eq!(grid.get(1, 1), Some(Tile::TreeFoliage));
        assert_eq!(grid.get(1, 2), Some(Tile::TreeTrunk));
        assert_eq!(grid.to_rows(), rows.iter().map(|r| r.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn test_destroy_only_destructible() {
        let mut grid = TileGrid::from_rows(&[" ~#*"]);
        assert_eq!(grid.destroy(0, 0), None);
        assert_eq!(grid.destroy(1, 0), None);
        assert_eq!(grid.destroy(2, 0), Some(Tile::Ground));
        assert_eq!(grid.destroy(3, 0), Some(Tile::OreCommon));
        assert_eq!(grid.destroy(4, 0), None);
        assert_eq!(grid.get(2, 0), Some(Tile::Empty));
        assert_eq!(grid.get(1, 0), Some(Tile::Cloud));
    }

    #[test]
    fn test_gravity_single_step() {
        let grid = TileGrid::from_rows(&["  ", "  ", " #", "##"]);
        assert_eq!(grid.gravity_step(0, 0), (0, 1));
        assert_eq!(grid.gravity_step(0, 1), (0, 2));
        assert_eq!(grid.gravity_step(0, 2), (0, 2));
        assert_eq!(grid.gravity_step(1, 1), (1, 1));
        // Bottom row never falls out of the grid.
        assert_eq!(grid.gravity_step(0, 3), (0, 3));
    }

    #[test]
    fn test_spawn_scans_right_half_top_down() {
        let grid = TileGrid::from_rows(&[
            "      ", //
            "#    #", //
            "##  ##", //
            "######",
        ]);
        // Column 3 (= width / 2) reaches ground at row 3 first.
        assert_eq!(grid.find_spawn(), Some((3, 2)));
    }

    #[test]
    fn test_spawn_ignores_left_half() {
        let grid = TileGrid::from_rows(&[" ##", "###"]);
        // Columns 1..3 have no Empty above their Ground.
        assert_eq!(grid.find_spawn(), None);
    }

    #[test]
    fn test_spawn_requires_empty_not_cloud() {
        let grid = TileGrid::from_rows(&["  ~~", "####"]);
        assert_eq!(grid.find_spawn(), None);
    }

    #[test]
    fn test_row_out_of_bounds_is_empty() {
        let grid = TileGrid::new(3, 2);
        assert_eq!(grid.row(5).count(), 0);
        assert_eq!(grid.row(1).count(), 3);
    }
}
