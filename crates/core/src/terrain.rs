//! Terrain module - procedural generation of one world section
//!
//! A section is filled by five passes that always run in the same order; each
//! pass may overwrite cells written by the previous ones:
//!
//! 1. **Base fill**: sky above `sky_height`, Ground below, cloud clusters in
//!    the upper sky band.
//! 2. **Mountains**: triangular Ground profiles rising from `sky_height`.
//! 3. **Trees**: trunks with a foliage cap, on mountain peaks and on the
//!    ground layer.
//! 4. **Caves**: random walks that carve 3x3 holes below `ground_start`.
//! 5. **Ores**: Empty underground cells become ore with banded probabilities.
//!
//! Generation never fails. Every write goes through [`TileGrid::set`], which
//! skips cells outside the grid.

use tracing::debug;

use crate::config::{TerrainParams, WorldConfig};
use crate::grid::TileGrid;
use crate::rng::WorldRng;
use crate::types::Tile;

/// Per-pass cell counts, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerrainStats {
    pub clouds: usize,
    pub trees: usize,
    pub cave_steps: usize,
    pub ores: usize,
}

/// Fills sections with terrain.
#[derive(Debug, Clone, Copy)]
pub struct TerrainGenerator {
    sky_height: i32,
    ground_start: i32,
    params: TerrainParams,
}

impl TerrainGenerator {
    pub fn new(sky_height: u16, ground_start: u16, params: TerrainParams) -> Self {
        Self {
            sky_height: sky_height as i32,
            ground_start: ground_start as i32,
            params,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.sky_height, config.ground_start, config.terrain)
    }

    /// Fill `grid` in place. Deterministic for a given seed and grid size.
    pub fn generate(&self, grid: &mut TileGrid, seed: u64) -> TerrainStats {
        let mut rng = WorldRng::new(seed);
        let mut stats = TerrainStats::default();

        stats.clouds = self.base_fill(grid, &mut rng);
        self.raise_mountains(grid, &mut rng);
        stats.trees = self.plant_trees(grid, &mut rng);
        stats.cave_steps = self.carve_caves(grid, &mut rng);
        stats.ores = self.seed_ores(grid, &mut rng);

        debug!(
            seed,
            clouds = stats.clouds,
            trees = stats.trees,
            cave_steps = stats.cave_steps,
            ores = stats.ores,
            "section generated"
        );
        stats
    }

    /// Pass 1: sky, ground and clouds. Returns the number of cloud cells.
    pub fn base_fill(&self, grid: &mut TileGrid, rng: &mut WorldRng) -> usize {
        let w = grid.width() as i32;
        let h = grid.height() as i32;

        for y in 0..h {
            let tile = if y < self.sky_height {
                Tile::Empty
            } else {
                Tile::Ground
            };
            grid.fill_row(y, tile);
        }

        // Clouds stay well clear of the ground so mountains rarely reach them.
        let cloud_floor = (self.sky_height - self.params.cloud_clearance as i32).min(h);
        let max_size = self.params.cloud_cluster_max.max(1) as i32;
        for y in 0..cloud_floor {
            for x in 0..w {
                if !rng.chance(self.params.cloud_seed_percent) {
                    continue;
                }
                let size = rng.range(1, max_size + 1);
                for cy in y..(y + size).min(cloud_floor) {
                    for cx in x..(x + size).min(w) {
                        if rng.chance(self.params.cloud_cell_percent) {
                            grid.set(cx, cy, Tile::Cloud);
                        }
                    }
                }
            }
        }

        grid.count(Tile::Cloud)
    }

    /// Pass 2: triangular mountains standing on `sky_height`.
    pub fn raise_mountains(&self, grid: &mut TileGrid, rng: &mut WorldRng) {
        let w = grid.width() as i32;
        for _ in 0..self.params.mountain_count {
            let peak_x = rng.range(0, w);
            let height = rng.range(
                self.params.mountain_min_height,
                self.params.mountain_max_height,
            );
            self.raise_mountain(grid, peak_x, height);
        }
    }

    /// Stamp one mountain: rows `sky_height - height .. sky_height`, each row
    /// `2 * (height - distance_to_base)` wide around `peak_x`.
    pub fn raise_mountain(&self, grid: &mut TileGrid, peak_x: i32, height: i32) {
        for y in self.sky_height - height..self.sky_height {
            let half = height - (self.sky_height - y);
            for x in peak_x - half..=peak_x + half {
                grid.set(x, y, Tile::Ground);
            }
        }
    }

    /// Pass 3: trees on mountain peaks and on the ground layer.
    /// Returns the number of trees planted.
    pub fn plant_trees(&self, grid: &mut TileGrid, rng: &mut WorldRng) -> usize {
        let w = grid.width() as i32;
        let h = grid.height() as i32;
        let mut planted = 0;

        for x in 0..w {
            if rng.chance(self.params.tree_percent) {
                // First Ground cell in this column with two open cells above.
                for y in 2..h - 2 {
                    if grid.is(x, y, Tile::Ground)
                        && grid.is(x, y - 1, Tile::Empty)
                        && grid.is(x, y - 2, Tile::Empty)
                    {
                        let trunk = self.tree_height(rng);
                        Self::grow_tree(grid, x, y, trunk);
                        planted += 1;
                        break;
                    }
                }
            }

            if grid.is(x, self.ground_start, Tile::Ground) && rng.chance(self.params.tree_percent)
            {
                let trunk = self.tree_height(rng);
                // Rooted trees may replace ground, but the cap needs open air.
                if grid.is(x, self.ground_start - trunk - 1, Tile::Empty) {
                    Self::grow_tree(grid, x, self.ground_start, trunk);
                    planted += 1;
                }
            }
        }

        planted
    }

    fn tree_height(&self, rng: &mut WorldRng) -> i32 {
        rng.range(self.params.tree_min_height, self.params.tree_max_height)
    }

    /// Trunk in rows `base_y - trunk .. base_y`, foliage one row above it.
    fn grow_tree(grid: &mut TileGrid, x: i32, base_y: i32, trunk: i32) {
        for ty in base_y - trunk..base_y {
            grid.set(x, ty, Tile::TreeTrunk);
        }
        let cap_y = base_y - trunk - 1;
        for fx in x - 1..=x + 1 {
            grid.set(fx, cap_y, Tile::TreeFoliage);
        }
    }

    /// Pass 4: drunkard's-walk caves. Returns the total number of carve steps.
    pub fn carve_caves(&self, grid: &mut TileGrid, rng: &mut WorldRng) -> usize {
        let w = grid.width() as i32;
        let margin = self.params.cave_margin;
        let (lo, hi) = if w - margin > margin {
            (margin, w - margin)
        } else {
            (1, w - 1)
        };
        if hi <= lo {
            debug!(width = w, "grid too narrow for caves");
            return 0;
        }

        let mut steps = 0;
        for _ in 0..self.params.cave_count {
            let x = rng.range(lo, hi);
            let y = self.ground_start + self.params.cave_start_depth;
            steps += self.carve_cave(grid, rng, x, y);
        }
        steps
    }

    /// Walk from (x, y) for at most `cave_steps` steps, carving as it goes.
    /// Stops as soon as the walker leaves the carvable region.
    pub fn carve_cave(&self, grid: &mut TileGrid, rng: &mut WorldRng, mut x: i32, mut y: i32) -> usize {
        let w = grid.width() as i32;
        let h = grid.height() as i32;
        let mut carved = 0;

        for _ in 0..self.params.cave_steps {
            if x < 1 || x >= w - 1 || y < self.ground_start || y >= h - 1 {
                break;
            }
            for dy in -1..=1 {
                for dx in -1..=1 {
                    grid.set(x + dx, y + dy, Tile::Empty);
                }
            }
            carved += 1;
            x += rng.step();
            y += rng.step();
        }

        carved
    }

    /// Pass 5: ore in open underground cells. Returns the number of ore cells.
    pub fn seed_ores(&self, grid: &mut TileGrid, rng: &mut WorldRng) -> usize {
        let w = grid.width() as i32;
        let h = grid.height() as i32;
        let rare = self.params.ore_rare_percent;
        let uncommon = rare + self.params.ore_uncommon_percent;
        let common = uncommon + self.params.ore_common_percent;
        let mut placed = 0;

        for y in self.ground_start.max(0)..h {
            for x in 0..w {
                if !grid.is(x, y, Tile::Empty) {
                    continue;
                }
                let roll = rng.percent();
                let ore = if roll < rare {
                    Tile::OreRare
                } else if roll < uncommon {
                    Tile::OreUncommon
                } else if roll < common {
                    Tile::OreCommon
                } else {
                    continue;
                };
                grid.set(x, y, ore);
                placed += 1;
            }
        }

        placed
    }
}
