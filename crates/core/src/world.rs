//! World module - the aggregate every mutation goes through
//!
//! A [`World`] owns the section store, the live grid checked out from it, the
//! player, and the render buffer. It is the single writer: intents, gravity and
//! section switches all go through `&mut World`, and each of them records the
//! cells it touched so the display never drifts from the grid.
//!
//! # Example
//!
//! ```
//! use tui_sandbox_core::{World, WorldConfig};
//! use tui_sandbox_types::Intent;
//!
//! let mut world = World::new(WorldConfig::default(), 42).unwrap();
//! let (x, y) = world.player().position();
//! assert!(world.grid().is_walkable(x, y));
//!
//! world.step(Some(Intent::Right));
//! world.step(None);
//! let (x, y) = world.player().position();
//! assert!(world.grid().is_walkable(x, y));
//! ```

use tracing::{debug, error, info, trace};

use crate::config::{RenderMode, WorldConfig};
use crate::error::{GenerationError, GenerationResult};
use crate::grid::TileGrid;
use crate::player::{move_target, PlayerState};
use crate::render_buffer::{CellContent, Flush, RenderBuffer};
use crate::store::WorldStore;
use crate::terrain::TerrainGenerator;
use crate::types::{Direction, Intent, Tile};

/// Live world state.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    seed: u64,
    store: WorldStore,
    section: usize,
    grid: TileGrid,
    player: PlayerState,
    render: RenderBuffer,
}

impl World {
    /// Generate every section and place the player in the start section.
    ///
    /// Fails when the grid is too small to hold sky and ground, or when any
    /// section has no spawn point (section switches rely on that fallback).
    pub fn new(config: WorldConfig, seed: u64) -> GenerationResult<Self> {
        if config.width == 0 || config.height < 2 {
            return Err(GenerationError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        let generator = TerrainGenerator::from_config(&config);
        let mut store = WorldStore::from_config(&config);
        store.generate_all(&generator, seed);

        for index in 0..store.len() {
            if store.section(index)?.find_spawn().is_none() {
                error!(section = index, seed, "section has no spawn point");
                return Err(GenerationError::NoSpawnPoint {
                    section: index,
                    from_x: config.width / 2,
                    width: config.width,
                });
            }
        }

        let section = config.start_section.min(store.len() - 1);
        let grid = store.get(section)?;
        let (x, y) = grid.find_spawn().ok_or(GenerationError::NoSpawnPoint {
            section,
            from_x: config.width / 2,
            width: config.width,
        })?;
        info!(seed, section, x, y, "world ready");

        Ok(Self {
            config,
            seed,
            store,
            section,
            grid,
            player: PlayerState::new(x, y),
            render: RenderBuffer::new(),
        })
    }

    /// A single-section world around a hand-built grid.
    ///
    /// The player is placed at `pos` as given; callers are responsible for
    /// choosing a walkable cell.
    pub fn from_grid(grid: TileGrid, pos: (i32, i32)) -> Self {
        Self::from_store(WorldStore::from_sections(vec![grid]), 0, pos)
    }

    /// A world over prebuilt sections, starting in `section` at `pos`.
    pub fn from_store(store: WorldStore, section: usize, pos: (i32, i32)) -> Self {
        let section = section.min(store.len() - 1);
        let grid = store.get(section).unwrap_or_else(|_| TileGrid::new(0, 0));
        let config = WorldConfig::with_size(store.width(), store.height())
            .with_section_count(store.len());
        Self {
            config,
            seed: 0,
            store,
            section,
            grid,
            player: PlayerState::new(pos.0, pos.1),
            render: RenderBuffer::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    pub fn section_index(&self) -> usize {
        self.section
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn render_mode(&self) -> RenderMode {
        self.config.render_mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.config.render_mode = mode;
    }

    /// What (x, y) displays: the player glyph overrides the tile.
    pub fn cell_content(&self, x: i32, y: i32) -> Option<CellContent> {
        let tile = self.grid.get(x, y)?;
        if (x, y) == self.player.position() {
            Some(CellContent::Player)
        } else {
            Some(CellContent::Tile(tile))
        }
    }

    /// One fixed tick: apply at most one intent, then one gravity step.
    ///
    /// Returns whether anything needs to be drawn.
    pub fn step(&mut self, intent: Option<Intent>) -> bool {
        if let Some(intent) = intent {
            self.apply_intent(intent);
        }
        self.apply_gravity();
        self.render.is_dirty()
    }

    /// Apply one player intent. Returns whether the world changed.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        trace!(intent = intent.as_str(), "intent");
        match intent.direction() {
            Some(dir) => self.move_player(dir),
            None => self.mine(),
        }
    }

    /// Move the player one row down if the cell below is walkable.
    pub fn apply_gravity(&mut self) -> bool {
        let (x, y) = self.player.position();
        let (nx, ny) = self.grid.gravity_step(x, y);
        if (nx, ny) == (x, y) {
            return false;
        }
        self.relocate(nx, ny);
        true
    }

    /// Drain the render buffer according to the render mode.
    pub fn flush(&mut self) -> Flush {
        match (self.config.render_mode, self.render.flush()) {
            (_, Flush::Clean) => Flush::Clean,
            (RenderMode::Full, _) => Flush::Full,
            (RenderMode::Dirty, flush) => flush,
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.render.is_dirty()
    }

    /// Force the next flush to be a full redraw (e.g. after a terminal resize).
    pub fn invalidate(&mut self) {
        self.render.request_full();
    }

    fn move_player(&mut self, dir: Direction) -> bool {
        // Facing updates even when the move is rejected.
        self.player.last_direction = dir;

        let (x, y) = self.player.position();
        let Some((nx, ny)) = move_target(&self.grid, x, y, dir) else {
            return false;
        };
        self.relocate(nx, ny);

        let last_col = self.grid.width() as i32 - 1;
        let horizontal = matches!(dir, Direction::Left | Direction::Right);
        if horizontal && (nx == 0 || nx == last_col) {
            self.switch_section(self.store.advance(self.section));
        }
        true
    }

    fn mine(&mut self) -> bool {
        let Some((tx, ty)) = self.player.facing_cell() else {
            return false;
        };
        let Some(tile) = self.grid.destroy(tx, ty) else {
            return false;
        };
        self.player.inventory.add(tile);
        self.render.mark(tx, ty, CellContent::Tile(Tile::Empty));
        debug!(x = tx, y = ty, tile = tile.as_str(), "mined");
        true
    }

    fn relocate(&mut self, nx: i32, ny: i32) {
        let (x, y) = self.player.position();
        if let Some(tile) = self.grid.get(x, y) {
            self.render.mark(x, y, CellContent::Tile(tile));
        }
        self.player.x = nx;
        self.player.y = ny;
        self.render.mark(nx, ny, CellContent::Player);
    }

    /// Check out section `index` as the live grid.
    ///
    /// The player keeps its coordinates; when that cell is not walkable in the
    /// new section it moves to the new section's spawn point instead.
    fn switch_section(&mut self, index: usize) {
        if index == self.section {
            return;
        }
        let Ok(grid) = self.store.get(index) else {
            return;
        };

        let (x, y) = self.player.position();
        let pos = if grid.is_walkable(x, y) {
            Some((x, y))
        } else {
            grid.find_spawn()
        };
        let Some((px, py)) = pos else {
            error!(section = index, "cannot enter section without a walkable cell");
            return;
        };

        info!(from = self.section, to = index, x = px, y = py, "section switch");
        self.section = index;
        self.grid = grid;
        self.player.x = px;
        self.player.y = py;
        self.render.request_full();
    }
}
