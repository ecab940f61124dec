//! WorldView: maps a `core::World` into a terminal framebuffer.
//!
//! This module is pure (no I/O). Styling is a function of the row band and
//! the cell content only, so a full repaint and a dirty-cell patch always
//! agree on what a cell looks like.

use crate::core::{CellContent, DirtyCell, Inventory, World};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::Tile;

const SKY_BG: Rgb = Rgb::new(40, 90, 200);
const GROUND_BG: Rgb = Rgb::new(20, 70, 20);
const STATUS_FG: Rgb = Rgb::new(220, 220, 220);
const STATUS_BG: Rgb = Rgb::new(0, 0, 0);

fn tile_fg(tile: Tile) -> Rgb {
    match tile {
        Tile::Empty => Rgb::new(220, 220, 220),
        Tile::Ground => Rgb::new(90, 90, 90),
        Tile::Cloud => Rgb::new(255, 255, 255),
        Tile::TreeFoliage => Rgb::new(60, 200, 60),
        Tile::TreeTrunk => Rgb::new(20, 110, 20),
        Tile::OreCommon => Rgb::new(230, 200, 40),
        Tile::OreUncommon => Rgb::new(210, 40, 40),
        Tile::OreRare => Rgb::new(60, 120, 255),
    }
}

/// Lays the world out at one terminal cell per tile, with the inventory on
/// the row below the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldView {
    sky_height: u16,
}

impl WorldView {
    pub fn new(sky_height: u16) -> Self {
        Self { sky_height }
    }

    pub fn for_world(world: &World) -> Self {
        Self::new(world.config().sky_height)
    }

    /// Rows above `sky_height` get the sky background, the rest the ground
    /// background.
    pub fn style_for(&self, y: u16, content: CellContent) -> CellStyle {
        let bg = if y < self.sky_height { SKY_BG } else { GROUND_BG };
        match content {
            CellContent::Player => CellStyle::new(Rgb::new(255, 230, 0), bg).bold(),
            CellContent::Tile(tile) => CellStyle::new(tile_fg(tile), bg),
        }
    }

    pub fn cell_for(&self, y: u16, content: CellContent) -> Cell {
        Cell {
            ch: content.glyph(),
            style: self.style_for(y, content),
        }
    }

    /// Framebuffer size needed for `world`: the grid plus one status row.
    pub fn frame_size(world: &World) -> (u16, u16) {
        let grid = world.grid();
        (grid.width(), grid.height().saturating_add(1))
    }

    /// Repaint every cell from the authoritative world state.
    pub fn render_into(&self, world: &World, fb: &mut FrameBuffer) {
        let (w, h) = Self::frame_size(world);
        fb.resize(w, h);
        fb.clear(Cell::default());

        let grid = world.grid();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if let Some(content) = world.cell_content(x as i32, y as i32) {
                    fb.set(x, y, self.cell_for(y, content));
                }
            }
        }
        self.render_status(world.player().inventory, grid.height(), fb);
    }

    /// Apply dirty cells and refresh the status row.
    ///
    /// Returns the status row index so the renderer can resend it.
    pub fn patch_into(&self, world: &World, cells: &[DirtyCell], fb: &mut FrameBuffer) -> u16 {
        for cell in cells {
            fb.set(cell.x, cell.y, self.cell_for(cell.y, cell.content));
        }
        let status_row = world.grid().height();
        self.render_status(world.player().inventory, status_row, fb);
        status_row
    }

    fn render_status(&self, inventory: Inventory, row: u16, fb: &mut FrameBuffer) {
        let style = CellStyle::new(STATUS_FG, STATUS_BG);
        for x in 0..fb.width() {
            fb.put_char(x, row, ' ', style);
        }
        fb.put_str(0, row, &status_line(&inventory), style);
    }
}

/// "Inventory:" followed by `glyph:count` for every tile held, in tile order.
pub fn status_line(inventory: &Inventory) -> String {
    let mut line = String::from("Inventory:");
    for (tile, count) in inventory.entries() {
        line.push(' ');
        line.push(tile.glyph());
        line.push(':');
        line.push_str(&count.to_string());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileGrid;
    use crate::types::{Intent, PLAYER_GLYPH};

    fn small_world() -> World {
        let grid = TileGrid::from_rows(&["      ", "  ~   ", "   #  ", "######"]);
        World::from_grid(grid, (2, 2))
    }

    #[test]
    fn style_depends_on_row_band() {
        let view = WorldView::new(2);
        let sky = view.style_for(1, CellContent::Tile(Tile::Empty));
        let ground = view.style_for(2, CellContent::Tile(Tile::Empty));
        assert_eq!(sky.bg, SKY_BG);
        assert_eq!(ground.bg, GROUND_BG);
        assert_eq!(
            view.style_for(0, CellContent::Tile(Tile::OreRare)).fg,
            tile_fg(Tile::OreRare)
        );
    }

    #[test]
    fn full_render_draws_grid_player_and_status() {
        let world = small_world();
        let view = WorldView::new(2);
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&world, &mut fb);

        assert_eq!((fb.width(), fb.height()), (6, 5));
        assert_eq!(fb.row_text(1), "  ~   ");
        assert_eq!(fb.get(2, 2).map(|c| c.ch), Some(PLAYER_GLYPH));
        assert_eq!(fb.row_text(3), "######");
        assert_eq!(fb.row_text(4), "Invent");
    }

    #[test]
    fn patch_updates_cells_and_status() {
        let mut world = small_world();
        let view = WorldView::new(2);
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&world, &mut fb);
        let _ = world.flush();

        world.apply_intent(Intent::Down);
        world.apply_intent(Intent::Mine);
        let crate::core::Flush::Cells(cells) = world.flush() else {
            panic!("expected dirty cells");
        };
        let row = view.patch_into(&world, &cells, &mut fb);

        assert_eq!(row, 4);
        assert_eq!(fb.get(2, 3).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn status_line_lists_held_tiles() {
        let mut inv = Inventory::new();
        assert_eq!(status_line(&inv), "Inventory:");
        inv.add(Tile::Ground);
        inv.add(Tile::Ground);
        inv.add(Tile::Ground);
        inv.add(Tile::OreRare);
        assert_eq!(status_line(&inv), "Inventory: #:3 ♦:1");
    }
}
