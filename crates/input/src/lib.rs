//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Intent`] and runs the
//! reader thread that feeds them to the tick loop through a bounded queue.
//! Nothing here touches world state.

pub mod map;
pub mod pump;

pub use tui_sandbox_types as types;

pub use map::{handle_key_event, should_quit};
pub use pump::{
    dispatch, drain_tick, spawn_input_thread, translate, Dispatch, Drained, InputEvent,
    IntentQueue,
};
