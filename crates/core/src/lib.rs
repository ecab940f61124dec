//! Core world logic - terrain generation, movement rules, and dirty tracking
//!
//! Everything here is pure and deterministic: no terminal, no threads, no
//! clock. A [`World`] built from the same [`WorldConfig`] and seed always
//! produces the same sections and reacts to the same intents the same way.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size tile grid with bounds-checked access
//! - [`terrain`]: the five generation passes (base, mountains, trees, caves, ores)
//! - [`store`]: every generated section, handed out as by-value copies
//! - [`player`]: position, facing, inventory and the movement rules
//! - [`render_buffer`]: cells changed since the last frame
//! - [`world`]: the aggregate that applies intents and gravity
//! - [`rng`]: seeded ChaCha randomness used by generation
//!
//! # Example
//!
//! ```
//! use tui_sandbox_core::{Flush, World, WorldConfig};
//! use tui_sandbox_types::Intent;
//!
//! let mut world = World::new(WorldConfig::default(), 7).unwrap();
//!
//! // First frame is always a full redraw.
//! assert_eq!(world.flush(), Flush::Full);
//!
//! world.step(Some(Intent::Left));
//! world.step(Some(Intent::Mine));
//! let _ = world.flush();
//! ```
//!
//! # Timing
//!
//! The binary calls [`World::step`] once per fixed tick
//! ([`TICK_MS`](types::TICK_MS)): at most one intent, then one gravity step.

pub mod config;
pub mod error;
pub mod grid;
pub mod player;
pub mod render_buffer;
pub mod rng;
pub mod store;
pub mod terrain;
pub mod world;

pub use tui_sandbox_types as types;

pub use config::{RenderMode, TerrainParams, WorldConfig};
pub use error::{GenerationError, GenerationResult};
pub use grid::TileGrid;
pub use player::{move_target, Inventory, PlayerState};
pub use render_buffer::{CellContent, DirtyCell, Flush, RenderBuffer};
pub use rng::WorldRng;
pub use store::WorldStore;
pub use terrain::{TerrainGenerator, TerrainStats};
pub use world::World;
