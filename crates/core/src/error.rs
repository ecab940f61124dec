//! Errors raised while building a world.

use thiserror::Error;

/// World construction failures.
///
/// Terrain passes never fail on their own (out-of-bounds writes are skipped);
/// the only fatal condition is a section with nowhere to put the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No Ground cell with an Empty cell above it in the right half of the section
    #[error("no spawn point in section {section}: no ground with open sky above in columns {from_x}..{width}")]
    NoSpawnPoint {
        section: usize,
        from_x: u16,
        width: u16,
    },

    /// Section index outside the store
    #[error("section {index} out of range (store holds {count})")]
    SectionOutOfRange { index: usize, count: usize },

    /// Grid dimensions that cannot hold a world
    #[error("invalid world size {width}x{height}")]
    InvalidSize { width: u16, height: u16 },
}

pub type GenerationResult<T> = Result<T, GenerationError>;
