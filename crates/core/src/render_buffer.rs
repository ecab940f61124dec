//! Render buffer - which cells are stale on screen
//!
//! Every mutation records the coordinates it touched together with what the
//! cell should now show. A flush hands the recorded cells to the display in
//! row-major order and empties the buffer, so every recorded cell is written
//! exactly once per frame. A full redraw request supersedes individual cells.

use std::collections::BTreeMap;

use crate::types::{Tile, PLAYER_GLYPH};

/// What a cell should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellContent {
    Tile(Tile),
    Player,
}

impl CellContent {
    pub fn glyph(self) -> char {
        match self {
            CellContent::Tile(t) => t.glyph(),
            CellContent::Player => PLAYER_GLYPH,
        }
    }
}

/// A stale cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirtyCell {
    pub x: u16,
    pub y: u16,
    pub content: CellContent,
}

/// Result of draining the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flush {
    /// Nothing changed since the last flush.
    Clean,
    /// Redraw the whole grid from the authoritative state.
    Full,
    /// Redraw exactly these cells.
    Cells(Vec<DirtyCell>),
}

#[derive(Debug, Clone, Default)]
pub struct RenderBuffer {
    /// Keyed by (y, x) so iteration is row-major.
    cells: BTreeMap<(u16, u16), CellContent>,
    full: bool,
}

impl RenderBuffer {
    /// A buffer that starts with a full redraw pending, for the first frame.
    pub fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
            full: true,
        }
    }

    /// Record that (x, y) should now show `content`. Later marks win.
    ///
    /// Negative coordinates are ignored; bounds against the grid are the
    /// caller's job.
    pub fn mark(&mut self, x: i32, y: i32, content: CellContent) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        self.cells.insert((y, x), content);
    }

    pub fn request_full(&mut self) {
        self.full = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.full || !self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Take everything recorded since the last flush and clear the buffer.
    pub fn flush(&mut self) -> Flush {
        let cells = std::mem::take(&mut self.cells);
        if std::mem::take(&mut self.full) {
            return Flush::Full;
        }
        if cells.is_empty() {
            return Flush::Clean;
        }
        Flush::Cells(
            cells
                .into_iter()
                .map(|((y, x), content)| DirtyCell { x, y, content })
                .collect(),
        )
    }
}
