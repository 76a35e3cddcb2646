//! World construction - terrain, then seeding vegetation and animals.

use crate::model::animal::{Animal, AnimalKind};
use crate::model::config::AppConfig;
use crate::model::error::SimError;
use crate::model::grid::Grid;
use crate::model::plant::{Plant, PlantKind};
use crate::model::rng::SimRng;
use crate::model::terrain::{self, TerrainKind};
use crate::model::world::World;
use tracing::info;

/// Draws spent looking for a free land cell before giving up on one
/// individual.
const PLACEMENT_ATTEMPTS: u32 = 64;

impl World {
    /// Build terrain and seed the initial populations synchronously.
    /// Deterministic for a given size and seed.
    pub fn new(config: AppConfig) -> Result<Self, SimError> {
        let seed = config.world.seed;
        let mut rng = SimRng::new(seed);
        let mut grid = terrain::generate(
            config.world.width,
            config.world.height,
            seed,
            &config.terrain,
            &mut rng,
        )?;
        seed_vegetation(&mut grid, &config, &mut rng);
        let mut next_animal_id = 0;
        seed_animals(&mut grid, &config, &mut rng, &mut next_animal_id);
        terrain::refresh_ground_cover(&mut grid);

        let world = Self {
            grid,
            tick: 0,
            rng,
            events: Vec::new(),
            next_animal_id,
            config,
        };
        let stats = world.stats();
        info!(
            seed,
            width = world.config.world.width,
            height = world.config.world.height,
            land = stats.land_cells,
            water = stats.water_cells,
            plants = stats.plants(),
            animals = stats.animals(),
            "world generated"
        );
        Ok(world)
    }
}

/// Roll every land cell once for a tree and once for a grass, choosing
/// the moisture-appropriate kind.
fn seed_vegetation(grid: &mut Grid, cfg: &AppConfig, rng: &mut SimRng) {
    let veg = &cfg.vegetation;
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.cell(x, y).terrain != TerrainKind::Land {
                continue;
            }
            let distance = grid.cell(x, y).distance_to_water;
            let tree_roll = rng.next();
            let grass_roll = rng.next();
            let kind = if tree_roll < veg.oak.density + veg.pine.density {
                if distance <= veg.oak.water_range {
                    Some(PlantKind::Oak)
                } else if distance <= veg.pine.water_range + veg.pine.water_range / 2 {
                    Some(PlantKind::Pine)
                } else {
                    None
                }
            } else if grass_roll < veg.grass.density + veg.arid_grass.density {
                if distance <= veg.grass.water_range {
                    Some(PlantKind::Grass)
                } else if distance <= veg.arid_grass.water_range {
                    Some(PlantKind::AridGrass)
                } else {
                    None
                }
            } else {
                None
            };
            if let Some(kind) = kind {
                let plant = Plant::new(kind, cfg, rng);
                grid.cell_mut(x, y).plant = Some(plant);
            }
        }
    }
}

fn seed_animals(grid: &mut Grid, cfg: &AppConfig, rng: &mut SimRng, next_id: &mut u64) {
    for (kind, count) in [
        (AnimalKind::Rabbit, cfg.rabbit.count),
        (AnimalKind::Wolf, cfg.wolf.count),
    ] {
        for _ in 0..count {
            let Some((x, y)) = grid.random_free_land_cell(rng, PLACEMENT_ATTEMPTS) else {
                continue;
            };
            let animal = Animal::new(kind, *next_id, cfg, rng);
            *next_id += 1;
            grid.cell_mut(x, y).animal = Some(animal);
        }
    }
}
