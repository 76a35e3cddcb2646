use verdant_lib::model::animal::{Animal, AnimalKind};
use verdant_lib::model::config::AppConfig;
use verdant_lib::model::plant::{Plant, PlantKind};
use verdant_lib::model::rng::SimRng;
use verdant_lib::model::world::World;

/// Flat, all-land, unpopulated config for scenario setups.
#[allow(dead_code)]
pub fn bare_config(width: u32, height: u32, seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.width = width;
    config.world.height = height;
    config.world.seed = seed;
    config.terrain.water_level = 0.0;
    config.terrain.river_count = 0;
    config.terrain.smoothing_passes = 0;
    config.vegetation.grass.density = 0.0;
    config.vegetation.arid_grass.density = 0.0;
    config.vegetation.oak.density = 0.0;
    config.vegetation.pine.density = 0.0;
    config.rabbit.count = 0;
    config.wolf.count = 0;
    config
}

/// Default biology on a smaller map with trimmed populations.
#[allow(dead_code)]
pub fn small_config(width: u32, height: u32, seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.width = width;
    config.world.height = height;
    config.world.seed = seed;
    config.rabbit.count = 40;
    config.wolf.count = 6;
    config
}

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    animals: Vec<(u32, u32, Animal)>,
    plants: Vec<(u32, u32, Plant)>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn bare(width: u32, height: u32, seed: u64) -> Self {
        Self {
            config: bare_config(width, height, seed),
            animals: Vec::new(),
            plants: Vec::new(),
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Place an animal built from config defaults, then adjusted.
    pub fn with_animal<F>(mut self, x: u32, y: u32, kind: AnimalKind, id: u64, adjust: F) -> Self
    where
        F: FnOnce(&mut Animal),
    {
        let mut rng = SimRng::new(id.wrapping_mul(0x9E37_79B9).wrapping_add(1));
        let mut animal = Animal::new(kind, id, &self.config, &mut rng);
        adjust(&mut animal);
        self.animals.push((x, y, animal));
        self
    }

    pub fn with_plant<F>(mut self, x: u32, y: u32, kind: PlantKind, adjust: F) -> Self
    where
        F: FnOnce(&mut Plant),
    {
        let mut rng = SimRng::new(0xF00D);
        let mut plant = Plant::new(kind, &self.config, &mut rng);
        adjust(&mut plant);
        self.plants.push((x, y, plant));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("failed to build test world");
        for (x, y, plant) in self.plants {
            // Scenario plants sit next to imaginary water unless the
            // test says otherwise.
            world.grid.cell_mut(x, y).distance_to_water = 0;
            world.grid.cell_mut(x, y).plant = Some(plant);
        }
        for (x, y, animal) in self.animals {
            world.grid.cell_mut(x, y).animal = Some(animal);
        }
        world
    }
}
