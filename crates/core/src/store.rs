//! Section store.
//!
//! Holds every generated section as a read-only template. Callers get a
//! by-value copy with [`WorldStore::get`]; edits made to that copy never flow
//! back into the store.

use tracing::debug;

use crate::config::WorldConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::grid::TileGrid;
use crate::rng::WorldRng;
use crate::terrain::TerrainGenerator;

#[derive(Debug, Clone)]
pub struct WorldStore {
    width: u16,
    height: u16,
    sections: Vec<TileGrid>,
}

impl WorldStore {
    /// Allocate `section_count` empty sections of `width x height`.
    pub fn new(section_count: usize, width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            sections: (0..section_count.max(1))
                .map(|_| TileGrid::new(width, height))
                .collect(),
        }
    }

    /// Wrap already-built sections. All sections must share one size.
    pub fn from_sections(sections: Vec<TileGrid>) -> Self {
        let (width, height) = sections
            .first()
            .map(|g| (g.width(), g.height()))
            .unwrap_or((0, 0));
        let mut store = Self {
            width,
            height,
            sections,
        };
        if store.sections.is_empty() {
            store.sections.push(TileGrid::new(0, 0));
        }
        store
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.section_count, config.width, config.height)
    }

    /// Run the generator once per section.
    ///
    /// Each section gets its own seed drawn from a master RNG seeded with
    /// `seed`, so the whole store is reproducible from one number.
    pub fn generate_all(&mut self, generator: &TerrainGenerator, seed: u64) {
        let mut master = WorldRng::new(seed);
        for (index, section) in self.sections.iter_mut().enumerate() {
            let section_seed = master.next_u64();
            let stats = generator.generate(section, section_seed);
            debug!(index, section_seed, ores = stats.ores, "stored section");
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// A copy of section `index`, to be adopted as a live grid.
    pub fn get(&self, index: usize) -> GenerationResult<TileGrid> {
        self.section(index).cloned()
    }

    /// Borrow the stored template.
    pub fn section(&self, index: usize) -> GenerationResult<&TileGrid> {
        self.sections
            .get(index)
            .ok_or(GenerationError::SectionOutOfRange {
                index,
                count: self.sections.len(),
            })
    }

    /// Next section index, wrapping to 0 after the last one.
    pub fn advance(&self, current: usize) -> usize {
        (current + 1) % self.sections.len()
    }
}
