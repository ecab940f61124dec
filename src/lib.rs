//! TUI Sandbox (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `tui_sandbox::{core,input,term,types}`.

pub use tui_sandbox_core as core;
pub use tui_sandbox_input as input;
pub use tui_sandbox_term as term;
pub use tui_sandbox_types as types;
