//! Full-fidelity scheduling - every occupant runs its complete decision
//! logic every tick.

use crate::model::animal::{self, StepContext};
use crate::model::plant;
use crate::model::world::World;

impl World {
    /// One row-major pass over the grid. The relocation guard is reset
    /// first; without it an animal that moved forward in scan order
    /// would be updated again at its new cell.
    pub(crate) fn tick_full(&mut self) {
        for cell in &mut self.grid.cells {
            if let Some(animal) = cell.animal.as_mut() {
                animal.has_moved = false;
            }
        }
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                plant::step_plant(
                    &mut self.grid,
                    x,
                    y,
                    self.tick,
                    &self.config,
                    &mut self.rng,
                );
                let mut ctx = StepContext {
                    cfg: &self.config,
                    tick: self.tick,
                    events: &mut self.events,
                    next_id: &mut self.next_animal_id,
                };
                animal::step_animal(&mut self.grid, x, y, &mut ctx, &mut self.rng);
            }
        }
    }
}
