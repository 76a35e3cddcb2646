//! Fauna - rabbits and wolves: aging, foraging, hunting, and breeding
//! with trait drift.

use crate::model::config::{AppConfig, SpeciesConfig};
use crate::model::events::WorldEvent;
use crate::model::grid::Grid;
use crate::model::rng::SimRng;
use serde::{Deserialize, Serialize};

/// Fraction of energy a parent keeps after reproducing.
const REPRODUCTION_KEEP: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalKind {
    Rabbit,
    Wolf,
}

impl AnimalKind {
    pub fn config<'a>(&self, cfg: &'a AppConfig) -> &'a SpeciesConfig {
        match self {
            AnimalKind::Rabbit => &cfg.rabbit,
            AnimalKind::Wolf => &cfg.wolf,
        }
    }

    pub fn is_predator(&self) -> bool {
        matches!(self, AnimalKind::Wolf)
    }
}

/// Heritable biology. Every field is independently perturbed when
/// passed to offspring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Traits {
    pub lifespan: f64,
    pub maturity_age: f64,
    pub repro_cooldown: f64,
    pub litter_min: f64,
    pub litter_max: f64,
    pub juvenile_energy_mult: f64,
    pub juvenile_metabolism_mult: f64,
    pub satiety_threshold: f64,
    pub reproduction_threshold: f64,
    pub reproduction_chance: f64,
    pub vision: f64,
    pub speed: f64,
    pub max_energy: f64,
    pub metabolism: f64,
    pub eat_speed: f64,
    pub gain: f64,
}

impl Traits {
    pub fn from_config(sc: &SpeciesConfig) -> Self {
        Self {
            lifespan: sc.lifespan,
            maturity_age: sc.maturity_age,
            repro_cooldown: sc.repro_cooldown,
            litter_min: sc.litter_min,
            litter_max: sc.litter_max,
            juvenile_energy_mult: sc.juvenile_energy_mult,
            juvenile_metabolism_mult: sc.juvenile_metabolism_mult,
            satiety_threshold: sc.satiety_threshold,
            reproduction_threshold: sc.reproduction_threshold,
            reproduction_chance: sc.reproduction_chance,
            vision: sc.vision,
            speed: sc.speed,
            max_energy: sc.max_energy,
            metabolism: sc.metabolism,
            eat_speed: sc.eat_speed,
            gain: sc.gain,
        }
    }

    /// Offspring traits: every value nudged by an independent
    /// multiplicative factor in [1 - variance, 1 + variance]. Satiety
    /// stays clamped to [0.5, 1.0] and litter bounds stay ordered.
    pub fn mutated(&self, variance: f64, rng: &mut SimRng) -> Self {
        let mut drift = |v: f64| v * (1.0 + rng.range(-variance, variance));
        let mut t = Self {
            lifespan: drift(self.lifespan),
            maturity_age: drift(self.maturity_age),
            repro_cooldown: drift(self.repro_cooldown),
            litter_min: drift(self.litter_min),
            litter_max: drift(self.litter_max),
            juvenile_energy_mult: drift(self.juvenile_energy_mult),
            juvenile_metabolism_mult: drift(self.juvenile_metabolism_mult),
            satiety_threshold: drift(self.satiety_threshold),
            reproduction_threshold: drift(self.reproduction_threshold),
            reproduction_chance: drift(self.reproduction_chance),
            vision: drift(self.vision),
            speed: drift(self.speed),
            max_energy: drift(self.max_energy),
            metabolism: drift(self.metabolism),
            eat_speed: drift(self.eat_speed),
            gain: drift(self.gain),
        };
        t.satiety_threshold = t.satiety_threshold.clamp(0.5, 1.0);
        if t.litter_max < t.litter_min {
            std::mem::swap(&mut t.litter_min, &mut t.litter_max);
        }
        t
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub kind: AnimalKind,
    pub id: u64,
    pub age: u32,
    pub energy: f64,
    pub traits: Traits,
    pub last_reproduction: u64,
    /// Guards against a second update after relocation within a tick.
    pub has_moved: bool,
    /// Cached heading, used by the time-sliced scheduler only.
    pub vx: f64,
    pub vy: f64,
    /// Which tick slice (tick mod 10) this animal acts on. Fixed at spawn.
    pub update_slot: u8,
}

impl Animal {
    pub fn new(kind: AnimalKind, id: u64, cfg: &AppConfig, rng: &mut SimRng) -> Self {
        let traits = Traits::from_config(kind.config(cfg));
        let angle = rng.range(0.0, std::f64::consts::TAU);
        let speed = traits.speed.max(0.1);
        Self {
            kind,
            id,
            age: 0,
            energy: traits.max_energy * traits.juvenile_energy_mult * 0.5,
            last_reproduction: 0,
            has_moved: false,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            update_slot: rng.range_int(0, 9) as u8,
            traits,
        }
    }

    /// Child of this parent: fresh age, mutated traits, half of the
    /// juvenile energy cap. Marked moved so it cannot act in the tick
    /// it was born.
    pub fn offspring(&self, id: u64, tick: u64, variance: f64, rng: &mut SimRng) -> Self {
        let traits = self.traits.mutated(variance, rng);
        let angle = rng.range(0.0, std::f64::consts::TAU);
        let speed = traits.speed.max(0.1);
        Self {
            kind: self.kind,
            id,
            age: 0,
            energy: traits.max_energy * traits.juvenile_energy_mult * 0.5,
            last_reproduction: tick,
            has_moved: true,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            update_slot: rng.range_int(0, 9) as u8,
            traits,
        }
    }

    pub fn is_mature(&self) -> bool {
        f64::from(self.age) >= self.traits.maturity_age
    }

    /// Age-dependent energy cap: juveniles run on a reduced tank.
    pub fn max_energy(&self) -> f64 {
        if self.is_mature() {
            self.traits.max_energy
        } else {
            self.traits.max_energy * self.traits.juvenile_energy_mult
        }
    }

    pub fn metabolic_cost(&self) -> f64 {
        if self.is_mature() {
            self.traits.metabolism
        } else {
            self.traits.metabolism * self.traits.juvenile_metabolism_mult
        }
    }

    pub fn is_satiated(&self) -> bool {
        self.energy >= self.traits.satiety_threshold * self.max_energy()
    }

    fn can_reproduce(&self, tick: u64) -> bool {
        self.is_mature()
            && self.energy >= self.traits.reproduction_threshold * self.max_energy()
            && tick.saturating_sub(self.last_reproduction) >= self.traits.repro_cooldown as u64
    }
}

/// Shared state threaded through every animal update of a tick.
pub struct StepContext<'a> {
    pub cfg: &'a AppConfig,
    pub tick: u64,
    pub events: &'a mut Vec<WorldEvent>,
    pub next_id: &'a mut u64,
}

/// Full-fidelity update of the animal at (x, y): age, drain, die or
/// act. The occupant is lifted out of its cell for the duration so the
/// decision logic can freely mutate the grid it walks.
pub fn step_animal(grid: &mut Grid, x: u32, y: u32, ctx: &mut StepContext, rng: &mut SimRng) {
    let Some(mut animal) = grid.cell_mut(x, y).animal.take() else {
        return;
    };
    if animal.has_moved {
        grid.cell_mut(x, y).animal = Some(animal);
        return;
    }
    animal.has_moved = true;
    animal.age += 1;
    animal.energy -= animal.metabolic_cost();
    if animal.energy <= 0.0 || f64::from(animal.age) > animal.traits.lifespan {
        return;
    }
    animal.energy = animal.energy.min(animal.max_energy());
    match animal.kind {
        AnimalKind::Rabbit => step_rabbit(grid, x, y, animal, ctx, rng),
        AnimalKind::Wolf => step_wolf(grid, x, y, animal, ctx, rng),
    }
}

fn step_rabbit(
    grid: &mut Grid,
    x: u32,
    y: u32,
    mut rabbit: Animal,
    ctx: &mut StepContext,
    rng: &mut SimRng,
) {
    let mut fed_here = false;
    if !rabbit.is_satiated() {
        let eat_speed = rabbit.traits.eat_speed;
        let cap = rabbit.max_energy();
        let mut grazed_out = false;
        if let Some(plant) = grid.cell_mut(x, y).plant.as_mut() {
            if plant.kind.is_forage() && plant.energy > 0.0 {
                let taken = plant.consume(eat_speed);
                rabbit.energy = (rabbit.energy + taken).min(cap);
                fed_here = taken > 0.0;
                grazed_out = plant.energy <= 0.0;
            }
        }
        if grazed_out {
            grid.cell_mut(x, y).plant = None;
        }
    }
    if rabbit.is_satiated()
        && rabbit.can_reproduce(ctx.tick)
        && rng.chance(rabbit.traits.reproduction_chance)
    {
        reproduce(grid, x, y, &mut rabbit, ctx, rng);
    }
    let destination = if rabbit.is_satiated() || fed_here {
        None
    } else {
        let vision = rabbit.traits.vision.round().max(0.0) as u32;
        let food = grid.nearest_matching(x, y, vision, rng, |c| {
            c.plant
                .as_ref()
                .is_some_and(|p| p.kind.is_forage() && p.energy > 0.0)
        });
        match food {
            Some(target) => step_toward(grid, (x, y), target, rng),
            None => random_free_neighbor(grid, x, y, rng),
        }
    };
    let (fx, fy) = destination.unwrap_or((x, y));
    grid.cell_mut(fx, fy).animal = Some(rabbit);
}

fn step_wolf(
    grid: &mut Grid,
    x: u32,
    y: u32,
    mut wolf: Animal,
    ctx: &mut StepContext,
    rng: &mut SimRng,
) {
    let mut pos = (x, y);
    let mut moved = false;
    if !wolf.is_satiated() {
        let vision = wolf.traits.vision.round().max(0.0) as u32;
        let prey = grid.nearest_matching(x, y, vision, rng, |c| {
            c.animal.as_ref().is_some_and(|a| !a.kind.is_predator())
        });
        if let Some((px, py)) = prey {
            let distance = Grid::manhattan((x, y), (px, py));
            if f64::from(distance) <= wolf.traits.speed {
                grid.cell_mut(px, py).animal = None;
                ctx.events.push(WorldEvent::Kill { x: px, y: py });
                wolf.energy = (wolf.energy + wolf.traits.gain).min(wolf.max_energy());
                pos = (px, py);
                moved = true;
                if wolf.can_reproduce(ctx.tick) && rng.chance(wolf.traits.reproduction_chance) {
                    reproduce(grid, px, py, &mut wolf, ctx, rng);
                }
            } else if let Some(step) = step_toward(grid, (x, y), (px, py), rng) {
                pos = step;
                moved = true;
            }
        }
    }
    if !moved {
        if let Some(step) = uncrowded_step(grid, x, y, rng) {
            pos = step;
        }
    }
    grid.cell_mut(pos.0, pos.1).animal = Some(wolf);
}

/// Shared reproduction contract: 40% energy cost, cooldown reset, a
/// uniform litter draw, one mutated offspring per free land neighbor
/// up to the litter count.
fn reproduce(grid: &mut Grid, x: u32, y: u32, parent: &mut Animal, ctx: &mut StepContext, rng: &mut SimRng) {
    parent.energy *= REPRODUCTION_KEEP;
    parent.last_reproduction = ctx.tick;
    let lo = parent.traits.litter_min.round().max(0.0) as i64;
    let hi = (parent.traits.litter_max.round() as i64).max(lo);
    let litter = rng.range_int(lo, hi) as u32;
    let mut placed = 0;
    for (nx, ny) in grid.neighbors8(x, y) {
        if placed >= litter {
            break;
        }
        if !grid.is_free_land(nx, ny) {
            continue;
        }
        let id = *ctx.next_id;
        *ctx.next_id += 1;
        let child = parent.offspring(id, ctx.tick, ctx.cfg.evolution.trait_variance, rng);
        grid.cell_mut(nx, ny).animal = Some(child);
        placed += 1;
    }
}

/// Best free-land neighbor step strictly reducing Manhattan distance
/// to the target, ties broken uniformly. `None` when nothing improves.
fn step_toward(
    grid: &Grid,
    from: (u32, u32),
    to: (u32, u32),
    rng: &mut SimRng,
) -> Option<(u32, u32)> {
    let mut best_dist = Grid::manhattan(from, to);
    let mut best: Vec<(u32, u32)> = Vec::new();
    for (nx, ny) in grid.neighbors8(from.0, from.1) {
        if !grid.is_free_land(nx, ny) {
            continue;
        }
        let d = Grid::manhattan((nx, ny), to);
        if d < best_dist {
            best_dist = d;
            best.clear();
            best.push((nx, ny));
        } else if d == best_dist && !best.is_empty() {
            best.push((nx, ny));
        }
    }
    rng.pick(&best).copied()
}

fn random_free_neighbor(grid: &Grid, x: u32, y: u32, rng: &mut SimRng) -> Option<(u32, u32)> {
    let free: Vec<(u32, u32)> = grid
        .neighbors8(x, y)
        .into_iter()
        .filter(|&(nx, ny)| grid.is_free_land(nx, ny))
        .collect();
    rng.pick(&free).copied()
}

/// Dispersive wandering step preferring cells with no adjacent wolf.
fn uncrowded_step(grid: &Grid, x: u32, y: u32, rng: &mut SimRng) -> Option<(u32, u32)> {
    let free: Vec<(u32, u32)> = grid
        .neighbors8(x, y)
        .into_iter()
        .filter(|&(nx, ny)| grid.is_free_land(nx, ny))
        .collect();
    let uncrowded: Vec<(u32, u32)> = free
        .iter()
        .copied()
        .filter(|&(nx, ny)| {
            grid.neighbors8(nx, ny).iter().all(|&(ax, ay)| {
                grid.cell(ax, ay)
                    .animal
                    .as_ref()
                    .map_or(true, |a| !a.kind.is_predator())
            })
        })
        .collect();
    if !uncrowded.is_empty() {
        rng.pick(&uncrowded).copied()
    } else {
        rng.pick(&free).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutated_satiety_stays_clamped() {
        let cfg = AppConfig::default();
        let mut rng = SimRng::new(23);
        let mut traits = Traits::from_config(&cfg.rabbit);
        traits.satiety_threshold = 1.0;
        for _ in 0..200 {
            traits = traits.mutated(0.1, &mut rng);
            assert!((0.5..=1.0).contains(&traits.satiety_threshold));
            assert!(traits.litter_min <= traits.litter_max);
        }
    }

    #[test]
    fn test_juvenile_runs_on_reduced_tank() {
        let cfg = AppConfig::default();
        let mut rng = SimRng::new(4);
        let mut rabbit = Animal::new(AnimalKind::Rabbit, 0, &cfg, &mut rng);
        assert!(!rabbit.is_mature());
        let juvenile_cap = rabbit.max_energy();
        assert!(juvenile_cap < rabbit.traits.max_energy);
        rabbit.age = cfg.rabbit.maturity_age as u32;
        assert!(rabbit.is_mature());
        assert_eq!(rabbit.max_energy(), rabbit.traits.max_energy);
    }

    #[test]
    fn test_starved_animal_is_removed() {
        let cfg = AppConfig::default();
        let mut rng = SimRng::new(6);
        let mut grid = Grid::new(8, 8).unwrap();
        let mut rabbit = Animal::new(AnimalKind::Rabbit, 0, &cfg, &mut rng);
        rabbit.energy = 0.01;
        grid.cell_mut(3, 3).animal = Some(rabbit);
        let mut events = Vec::new();
        let mut next_id = 1;
        let mut ctx = StepContext {
            cfg: &cfg,
            tick: 1,
            events: &mut events,
            next_id: &mut next_id,
        };
        step_animal(&mut grid, 3, 3, &mut ctx, &mut rng);
        assert!(grid.cell(3, 3).animal.is_none());
        assert!(events.is_empty());
    }
}
