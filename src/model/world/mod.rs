//! World - construction, tick orchestration, and the public surface.

use crate::model::config::{AppConfig, ScheduleMode};
use crate::model::events::WorldEvent;
use crate::model::grid::Grid;
use crate::model::rng::SimRng;
use crate::model::stats::{self, WorldStats};
use crate::model::terrain;

pub mod drift;
pub mod init;
pub mod update;

/// Ticks between recomputations of the derived ground cover.
const GROUND_COVER_INTERVAL: u64 = 16;

pub struct World {
    pub config: AppConfig,
    pub grid: Grid,
    pub tick: u64,
    pub rng: SimRng,
    pub events: Vec<WorldEvent>,
    pub next_animal_id: u64,
}

impl World {
    /// Advance the simulation by one discrete step. The event buffer
    /// holds this tick's occurrences until the next call.
    pub fn tick(&mut self) {
        self.tick += 1;
        self.events.clear();
        match self.config.world.mode {
            ScheduleMode::Full => self.tick_full(),
            ScheduleMode::Static => self.tick_static(),
        }
        if self.tick % GROUND_COVER_INTERVAL == 0 {
            terrain::refresh_ground_cover(&mut self.grid);
        }
    }

    /// This tick's notable occurrences, cleared at the start of each tick.
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    /// Aggregate counts per species and plant kind. A pure read; calling
    /// it repeatedly without ticking returns identical values.
    pub fn stats(&self) -> WorldStats {
        stats::gather(&self.grid, self.tick)
    }
}
