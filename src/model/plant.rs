//! Vegetation - grasses and trees that regenerate, spread, and die.

use crate::model::config::{AppConfig, PlantConfig};
use crate::model::grid::Grid;
use crate::model::rng::SimRng;
use crate::model::terrain::{TerrainKind, NEIGHBORS8};
use serde::{Deserialize, Serialize};

/// Baseline death chance every plant carries regardless of moisture.
const BASE_DEATH_CHANCE: f64 = 0.0005;
/// Random offset trials a tree makes when dispersing seeds.
const TREE_SPREAD_TRIALS: u32 = 4;
/// Seed dispersal radius for trees.
const TREE_SPREAD_RADIUS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantKind {
    Grass,
    AridGrass,
    Oak,
    Pine,
}

impl PlantKind {
    pub fn config<'a>(&self, cfg: &'a AppConfig) -> &'a PlantConfig {
        match self {
            PlantKind::Grass => &cfg.vegetation.grass,
            PlantKind::AridGrass => &cfg.vegetation.arid_grass,
            PlantKind::Oak => &cfg.vegetation.oak,
            PlantKind::Pine => &cfg.vegetation.pine,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, PlantKind::Oak | PlantKind::Pine)
    }

    /// Whether herbivores can graze this kind.
    pub fn is_forage(&self) -> bool {
        matches!(self, PlantKind::Grass | PlantKind::AridGrass)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub kind: PlantKind,
    pub age: u32,
    pub energy: f64,
    pub max_energy: f64,
    pub regen_rate: f64,
    pub water_range: u32,
    pub update_frequency: u32,
    /// Random phase so same-kind plants spread their evaluations
    /// across ticks instead of stampeding on the same one.
    pub offset: u32,
}

impl Plant {
    pub fn new(kind: PlantKind, cfg: &AppConfig, rng: &mut SimRng) -> Self {
        let pc = kind.config(cfg);
        let frequency = pc.update_frequency.max(1);
        Self {
            kind,
            age: 0,
            energy: pc.max_energy * 0.5,
            max_energy: pc.max_energy,
            regen_rate: pc.regen_rate,
            water_range: pc.water_range,
            update_frequency: frequency,
            offset: rng.range_int(0, i64::from(frequency) - 1) as u32,
        }
    }

    /// Remove up to `amount` of energy, returning what actually came
    /// off. This is the only grazing interface animals get.
    pub fn consume(&mut self, amount: f64) -> f64 {
        let taken = amount.max(0.0).min(self.energy);
        self.energy -= taken;
        taken
    }

    /// Mature enough to spread: at least half-charged.
    pub fn is_mature(&self) -> bool {
        self.energy >= self.max_energy * 0.5
    }
}

/// Advance the plant at (x, y) by one tick. Aging happens every tick;
/// regeneration, death rolls, and spreading only on the plant's
/// scheduled ticks.
pub fn step_plant(grid: &mut Grid, x: u32, y: u32, tick: u64, cfg: &AppConfig, rng: &mut SimRng) {
    let distance = grid.cell(x, y).distance_to_water;
    let Some(mut plant) = grid.cell_mut(x, y).plant.take() else {
        return;
    };
    plant.age += 1;
    if (tick + u64::from(plant.offset)) % u64::from(plant.update_frequency) != 0 {
        grid.cell_mut(x, y).plant = Some(plant);
        return;
    }
    let pc = plant.kind.config(cfg);
    if plant.energy <= 0.0 || plant.age > pc.lifespan {
        return;
    }
    let stress = f64::from(distance.saturating_sub(plant.water_range));
    let death_chance = BASE_DEATH_CHANCE + stress * cfg.vegetation.drought_penalty;
    if rng.next() <= death_chance {
        return;
    }
    plant.energy = (plant.energy + plant.regen_rate).min(plant.max_energy);
    if plant.is_mature() && plant.age >= pc.mature_age {
        let effective = pc.spread_chance - stress * cfg.vegetation.drought_penalty;
        if effective > 0.0 && rng.chance(effective) {
            try_spread(grid, x, y, &plant, cfg, rng);
        }
    }
    grid.cell_mut(x, y).plant = Some(plant);
}

/// Attempt to place one child. Grasses try a single uniformly random
/// neighbor; trees make a few long-range offset trials.
fn try_spread(grid: &mut Grid, x: u32, y: u32, plant: &Plant, cfg: &AppConfig, rng: &mut SimRng) {
    if plant.kind.is_tree() {
        for _ in 0..TREE_SPREAD_TRIALS {
            let dx = rng.range_int(-TREE_SPREAD_RADIUS, TREE_SPREAD_RADIUS);
            let dy = rng.range_int(-TREE_SPREAD_RADIUS, TREE_SPREAD_RADIUS);
            if dx == 0 && dy == 0 {
                continue;
            }
            if place_child(grid, i64::from(x) + dx, i64::from(y) + dy, plant, cfg, rng) {
                return;
            }
        }
    } else {
        let (dx, dy) = NEIGHBORS8[rng.range_int(0, 7) as usize];
        place_child(
            grid,
            i64::from(x) + i64::from(dx),
            i64::from(y) + i64::from(dy),
            plant,
            cfg,
            rng,
        );
    }
}

/// Place a child on the target if it is land, plant-free, and within
/// tolerable moisture. Grasses falling just past their range seed the
/// drought-tolerant variant instead; trees get a widened tolerance.
fn place_child(
    grid: &mut Grid,
    tx: i64,
    ty: i64,
    parent: &Plant,
    cfg: &AppConfig,
    rng: &mut SimRng,
) -> bool {
    let Some(cell) = grid.get(tx, ty) else {
        return false;
    };
    if cell.terrain != TerrainKind::Land || cell.plant.is_some() {
        return false;
    }
    let distance = cell.distance_to_water;
    let child_kind = match parent.kind {
        PlantKind::Grass => {
            if distance <= parent.water_range {
                PlantKind::Grass
            } else if distance <= cfg.vegetation.arid_grass.water_range {
                PlantKind::AridGrass
            } else {
                return false;
            }
        }
        PlantKind::AridGrass => {
            if distance <= parent.water_range {
                PlantKind::AridGrass
            } else {
                return false;
            }
        }
        kind => {
            if distance <= parent.water_range + parent.water_range / 2 {
                kind
            } else {
                return false;
            }
        }
    };
    let child = Plant::new(child_kind, cfg, rng);
    grid.cell_mut(tx as u32, ty as u32).plant = Some(child);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_setup() -> (Grid, AppConfig, SimRng) {
        let grid = Grid::new(12, 12).unwrap();
        let cfg = AppConfig::default();
        let rng = SimRng::new(17);
        (grid, cfg, rng)
    }

    #[test]
    fn test_consume_clamps_to_available() {
        let (_, cfg, mut rng) = test_setup();
        let mut plant = Plant::new(PlantKind::Grass, &cfg, &mut rng);
        plant.energy = 5.0;
        assert_eq!(plant.consume(8.0), 5.0);
        assert_eq!(plant.energy, 0.0);
        assert_eq!(plant.consume(3.0), 0.0);
        assert_eq!(plant.consume(-1.0), 0.0);
    }

    #[test]
    fn test_plant_regenerates_up_to_max() {
        let (mut grid, cfg, mut rng) = test_setup();
        let mut plant = Plant::new(PlantKind::Grass, &cfg, &mut rng);
        plant.energy = plant.max_energy - 0.5;
        let max = plant.max_energy;
        grid.cell_mut(3, 3).plant = Some(plant);
        step_plant(&mut grid, 3, 3, 1, &cfg, &mut rng);
        let plant = grid.cell(3, 3).plant.as_ref().expect("plant survived");
        assert_eq!(plant.energy, max);
    }

    #[test]
    fn test_grazed_out_plant_is_removed() {
        let (mut grid, cfg, mut rng) = test_setup();
        let mut plant = Plant::new(PlantKind::Grass, &cfg, &mut rng);
        plant.energy = 0.0;
        grid.cell_mut(2, 2).plant = Some(plant);
        step_plant(&mut grid, 2, 2, 1, &cfg, &mut rng);
        assert!(grid.cell(2, 2).plant.is_none());
    }

    #[test]
    fn test_plant_dies_past_lifespan() {
        let (mut grid, cfg, mut rng) = test_setup();
        let mut plant = Plant::new(PlantKind::Grass, &cfg, &mut rng);
        plant.age = cfg.vegetation.grass.lifespan + 1;
        grid.cell_mut(2, 2).plant = Some(plant);
        step_plant(&mut grid, 2, 2, 1, &cfg, &mut rng);
        assert!(grid.cell(2, 2).plant.is_none());
    }

    #[test]
    fn test_tree_skips_off_schedule_ticks() {
        let (mut grid, cfg, mut rng) = test_setup();
        let mut tree = Plant::new(PlantKind::Oak, &cfg, &mut rng);
        tree.offset = 0;
        tree.energy = 1.0;
        grid.cell_mut(5, 5).plant = Some(tree);
        // Tick 3 is off-schedule for a frequency-16 plant with offset 0.
        step_plant(&mut grid, 5, 5, 3, &cfg, &mut rng);
        let tree = grid.cell(5, 5).plant.as_ref().unwrap();
        assert_eq!(tree.energy, 1.0);
        assert_eq!(tree.age, 1);
    }
}
