//! Terrain tests - generation passes and section store through the facade

use tui_sandbox::core::{TerrainGenerator, TerrainParams, TileGrid, WorldConfig, WorldRng, WorldStore};
use tui_sandbox::types::{Tile, WORLD_HEIGHT, WORLD_WIDTH};

#[test]
fn test_base_fill_ten_by_ten() {
    let gen = TerrainGenerator::new(5, 7, TerrainParams::default());
    let mut grid = TileGrid::new(10, 10);
    gen.base_fill(&mut grid, &mut WorldRng::new(2024));

    for y in 0..5 {
        for tile in grid.row(y) {
            assert!(
                matches!(tile, Tile::Empty | Tile::Cloud),
                "row {y} has {tile:?}"
            );
        }
    }
    for y in 5..10 {
        assert!(grid.row(y).all(|t| t == Tile::Ground), "row {y} not ground");
    }
}

#[test]
fn test_generation_is_deterministic() {
    let config = WorldConfig::default();
    let gen = TerrainGenerator::from_config(&config);

    let mut a = TileGrid::new(config.width, config.height);
    let mut b = TileGrid::new(config.width, config.height);
    let stats_a = gen.generate(&mut a, 77);
    let stats_b = gen.generate(&mut b, 77);
    assert_eq!(a, b);
    assert_eq!(stats_a, stats_b);

    let mut c = TileGrid::new(config.width, config.height);
    gen.generate(&mut c, 78);
    assert_ne!(a, c);
}

#[test]
fn test_generated_section_shape() {
    let config = WorldConfig::default();
    let gen = TerrainGenerator::from_config(&config);
    let mut grid = TileGrid::new(WORLD_WIDTH, WORLD_HEIGHT);
    gen.generate(&mut grid, 3);

    assert_eq!(grid.cells().len(), WORLD_WIDTH as usize * WORLD_HEIGHT as usize);
    // Clouds stay in the upper sky band.
    let cloud_floor = (config.sky_height - config.terrain.cloud_clearance) as i32;
    for y in cloud_floor..WORLD_HEIGHT as i32 {
        assert!(!grid.row(y).any(|t| t == Tile::Cloud), "cloud at row {y}");
    }
    // Ores only appear from ground_start down.
    for y in 0..config.ground_start as i32 {
        assert!(!grid.row(y).any(Tile::is_ore), "ore at row {y}");
    }
}

#[test]
fn test_ores_fill_only_empty_underground_cells() {
    let mut params = TerrainParams::default();
    params.ore_rare_percent = 0;
    params.ore_uncommon_percent = 0;
    params.ore_common_percent = 100;
    let gen = TerrainGenerator::new(2, 3, params);

    let mut grid = TileGrid::from_rows(&["    ", "    ", "    ", "# # ", "####"]);
    let placed = gen.seed_ores(&mut grid, &mut WorldRng::new(1));
    assert_eq!(placed, 2);
    assert_eq!(grid.to_rows()[3], "#*#*");
    assert_eq!(grid.to_rows()[2], "    ");
}

#[test]
fn test_store_sections_are_distinct_and_copied_out() {
    let config = WorldConfig::default();
    let mut store = WorldStore::from_config(&config);
    store.generate_all(&TerrainGenerator::from_config(&config), 10);

    assert_eq!(store.len(), config.section_count);
    assert_ne!(store.section(0).unwrap(), store.section(1).unwrap());

    let mut live = store.get(2).unwrap();
    let before = store.section(2).unwrap().clone();
    for x in 0..live.width() as i32 {
        live.set(x, 0, Tile::Ground);
    }
    assert_eq!(store.section(2).unwrap(), &before);
}

#[test]
fn test_tiny_grids_never_panic() {
    let gen = TerrainGenerator::new(1, 1, TerrainParams::default());
    for (w, h) in [(1, 1), (1, 2), (2, 2), (3, 5), (12, 3)] {
        let mut grid = TileGrid::new(w, h);
        gen.generate(&mut grid, 9);
        assert_eq!(grid.cells().len(), w as usize * h as usize);
    }
}
