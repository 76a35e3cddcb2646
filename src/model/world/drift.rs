//! Static scheduling - time-sliced, velocity-based movement for large
//! populations. No foraging, hunting, or reproduction happens here;
//! numbers are held up by immediate same-species respawn on death.

use crate::model::animal::{Animal, AnimalKind};
use crate::model::config::AppConfig;
use crate::model::grid::Grid;
use crate::model::rng::SimRng;
use crate::model::world::World;

/// Number of rotating update slots.
const SLOT_COUNT: u64 = 10;
/// Herbivore hop phase: period and open-window width in ticks.
const HOP_PERIOD: u64 = 25;
const HOP_WINDOW: u64 = 3;
/// Spreads individual hop phases apart.
const HOP_PHASE_STRIDE: u64 = 7;
/// Chance a herbivore re-rolls its heading after a successful hop.
const HOP_TURN_CHANCE: f64 = 0.3;
/// Heading jitter injected when reflecting off an illegal cell.
const REFLECT_JITTER: f64 = 0.25;
/// Small per-update heading drift for predators.
const DRIFT_JITTER: f64 = 0.2;

impl World {
    pub(crate) fn tick_static(&mut self) {
        for cell in &mut self.grid.cells {
            if let Some(animal) = cell.animal.as_mut() {
                animal.has_moved = false;
            }
        }
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                step_static(
                    &mut self.grid,
                    x,
                    y,
                    self.tick,
                    &self.config,
                    &mut self.rng,
                    &mut self.next_animal_id,
                );
            }
        }
    }
}

fn step_static(
    grid: &mut Grid,
    x: u32,
    y: u32,
    tick: u64,
    cfg: &AppConfig,
    rng: &mut SimRng,
    next_id: &mut u64,
) {
    let Some(mut animal) = grid.cell_mut(x, y).animal.take() else {
        return;
    };
    if animal.has_moved {
        grid.cell_mut(x, y).animal = Some(animal);
        return;
    }
    animal.has_moved = true;
    animal.age += 1;
    if f64::from(animal.age) > animal.traits.lifespan || animal.energy <= 0.0 {
        respawn(grid, animal.kind, cfg, rng, next_id);
        return;
    }
    let pos = match animal.kind {
        // The hop window is the herbivore's own time slicer: open for
        // HOP_WINDOW out of every HOP_PERIOD ticks, phased per animal.
        AnimalKind::Rabbit => {
            if (tick + animal.id * HOP_PHASE_STRIDE) % HOP_PERIOD < HOP_WINDOW {
                hop(grid, x, y, &mut animal, rng)
            } else {
                (x, y)
            }
        }
        AnimalKind::Wolf => {
            if u64::from(animal.update_slot) == tick % SLOT_COUNT {
                drift(grid, x, y, &mut animal, rng)
            } else {
                (x, y)
            }
        }
    };
    grid.cell_mut(pos.0, pos.1).animal = Some(animal);
}

/// Intermittent 1-2 cell jump along the cached heading. Collisions
/// reflect the heading with jitter and leave the animal in place.
fn hop(grid: &Grid, x: u32, y: u32, animal: &mut Animal, rng: &mut SimRng) -> (u32, u32) {
    let distance = rng.range_int(1, 2) as f64;
    let (dx, dy) = heading_step(animal.vx, animal.vy, distance);
    let tx = i64::from(x) + dx;
    let ty = i64::from(y) + dy;
    if grid.in_bounds(tx, ty) && grid.is_free_land(tx as u32, ty as u32) {
        if rng.chance(HOP_TURN_CHANCE) {
            let angle = rng.range(0.0, std::f64::consts::TAU);
            let speed = animal.traits.speed.max(0.1);
            animal.vx = angle.cos() * speed;
            animal.vy = angle.sin() * speed;
        }
        (tx as u32, ty as u32)
    } else {
        reflect(animal, rng);
        (x, y)
    }
}

/// Smooth per-slot predator movement: step along the heading, reflect
/// with jitter on collision, drift the heading, renormalize to speed.
fn drift(grid: &Grid, x: u32, y: u32, animal: &mut Animal, rng: &mut SimRng) -> (u32, u32) {
    let (dx, dy) = heading_step(animal.vx, animal.vy, animal.traits.speed.max(1.0));
    let tx = i64::from(x) + dx;
    let ty = i64::from(y) + dy;
    let pos = if grid.in_bounds(tx, ty) && grid.is_free_land(tx as u32, ty as u32) {
        (tx as u32, ty as u32)
    } else {
        reflect(animal, rng);
        (x, y)
    };
    animal.vx += rng.range(-DRIFT_JITTER, DRIFT_JITTER);
    animal.vy += rng.range(-DRIFT_JITTER, DRIFT_JITTER);
    renormalize(animal);
    pos
}

fn heading_step(vx: f64, vy: f64, distance: f64) -> (i64, i64) {
    let magnitude = (vx * vx + vy * vy).sqrt();
    if magnitude <= f64::EPSILON {
        return (0, 0);
    }
    (
        (vx / magnitude * distance).round() as i64,
        (vy / magnitude * distance).round() as i64,
    )
}

fn reflect(animal: &mut Animal, rng: &mut SimRng) {
    animal.vx = -animal.vx + rng.range(-REFLECT_JITTER, REFLECT_JITTER);
    animal.vy = -animal.vy + rng.range(-REFLECT_JITTER, REFLECT_JITTER);
}

fn renormalize(animal: &mut Animal) {
    let speed = animal.traits.speed.max(0.1);
    let magnitude = (animal.vx * animal.vx + animal.vy * animal.vy).sqrt();
    if magnitude > f64::EPSILON {
        animal.vx = animal.vx / magnitude * speed;
        animal.vy = animal.vy / magnitude * speed;
    } else {
        animal.vx = speed;
        animal.vy = 0.0;
    }
}

/// Same-species replacement somewhere else on the map, keeping herd
/// size level without simulating birth.
fn respawn(grid: &mut Grid, kind: AnimalKind, cfg: &AppConfig, rng: &mut SimRng, next_id: &mut u64) {
    if let Some((x, y)) = grid.random_free_land_cell(rng, 64) {
        let id = *next_id;
        *next_id += 1;
        let mut animal = Animal::new(kind, id, cfg, rng);
        animal.has_moved = true;
        grid.cell_mut(x, y).animal = Some(animal);
    }
}
