//! World configuration.
//!
//! Defaults come from the compile-time constants in `tui-sandbox-types`; tests
//! build smaller worlds by overriding fields.

use crate::types::{GROUND_START, SECTION_COUNT, SKY_HEIGHT, START_SECTION, WORLD_HEIGHT, WORLD_WIDTH};

/// How the render buffer is flushed after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Redraw the whole grid on every changed tick.
    Full,
    /// Redraw only the cells recorded since the last flush.
    #[default]
    Dirty,
}

/// Probabilities and counts for the terrain passes.
///
/// Percentages are in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainParams {
    /// Rows reserved above the ground for clouds: clouds only appear at
    /// `y < sky_height - cloud_clearance`.
    pub cloud_clearance: u16,
    pub cloud_seed_percent: u32,
    pub cloud_cell_percent: u32,
    /// Largest cloud cluster edge length.
    pub cloud_cluster_max: u16,

    pub mountain_count: u32,
    pub mountain_min_height: i32,
    /// Exclusive.
    pub mountain_max_height: i32,

    pub tree_percent: u32,
    pub tree_min_height: i32,
    /// Exclusive.
    pub tree_max_height: i32,

    pub cave_count: u32,
    pub cave_steps: u32,
    /// Horizontal distance from the grid edge for cave starting columns.
    pub cave_margin: i32,
    /// Rows below `ground_start` where a cave walker starts.
    pub cave_start_depth: i32,

    pub ore_rare_percent: u32,
    pub ore_uncommon_percent: u32,
    pub ore_common_percent: u32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            cloud_clearance: 5,
            cloud_seed_percent: 10,
            cloud_cell_percent: 50,
            cloud_cluster_max: 2,
            mountain_count: 10,
            mountain_min_height: 5,
            mountain_max_height: 10,
            tree_percent: 10,
            tree_min_height: 2,
            tree_max_height: 5,
            cave_count: 20,
            cave_steps: 50,
            cave_margin: 10,
            cave_start_depth: 2,
            ore_rare_percent: 2,
            ore_uncommon_percent: 2,
            ore_common_percent: 4,
        }
    }
}

/// Everything needed to build a [`World`](crate::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    /// First ground row; rows above are sky.
    pub sky_height: u16,
    /// First row of the underground layer.
    pub ground_start: u16,
    pub section_count: usize,
    pub start_section: usize,
    pub render_mode: RenderMode,
    pub terrain: TerrainParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            sky_height: SKY_HEIGHT,
            ground_start: GROUND_START,
            section_count: SECTION_COUNT,
            start_section: START_SECTION,
            render_mode: RenderMode::default(),
            terrain: TerrainParams::default(),
        }
    }
}

impl WorldConfig {
    /// Config for a `width x height` grid with the default band layout scaled
    /// to fit.
    pub fn with_size(width: u16, height: u16) -> Self {
        let sky_height = height / 2;
        let ground_start = (sky_height + 2).min(height.saturating_sub(1));
        Self {
            width,
            height,
            sky_height,
            ground_start,
            ..Self::default()
        }
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    pub fn with_section_count(mut self, section_count: usize) -> Self {
        self.section_count = section_count.max(1);
        self.start_section = self.start_section.min(self.section_count - 1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let cfg = WorldConfig::default();
        assert_eq!(cfg.width, 120);
        assert_eq!(cfg.height, 28);
        assert_eq!(cfg.sky_height, 13);
        assert_eq!(cfg.ground_start, 16);
        assert_eq!(cfg.section_count, 5);
        assert_eq!(cfg.render_mode, RenderMode::Dirty);
    }

    #[test]
    fn ore_bands_sum_to_eight_percent() {
        let p = TerrainParams::default();
        assert_eq!(
            p.ore_rare_percent + p.ore_uncommon_percent + p.ore_common_percent,
            8
        );
    }

    #[test]
    fn with_size_keeps_bands_inside_grid() {
        let cfg = WorldConfig::with_size(10, 10);
        assert_eq!(cfg.sky_height, 5);
        assert_eq!(cfg.ground_start, 7);
        assert!(cfg.ground_start < cfg.height);
    }

    #[test]
    fn section_count_never_zero() {
        let cfg = WorldConfig::default().with_section_count(0);
        assert_eq!(cfg.section_count, 1);
        assert_eq!(cfg.start_section, 0);
    }
}
