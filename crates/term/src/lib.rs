//! Terminal rendering for the sandbox.
//!
//! Renders into a small framebuffer (one cell per tile) and flushes it to the
//! terminal with crossterm, either as a full repaint or as a patch of the
//! cells the world marked dirty. No ratatui widgets or layout.

pub mod fb;
pub mod renderer;
pub mod world_view;

pub use tui_sandbox_core as core;
pub use tui_sandbox_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_cells_into, encode_full_into, encode_row_into, TerminalRenderer};
pub use world_view::{status_line, WorldView};
