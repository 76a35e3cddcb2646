use serde::{Deserialize, Serialize};
use std::fs;

/// Scheduling strategy, fixed once at world construction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// Full decision logic for every occupant, every tick.
    #[default]
    Full,
    /// Time-sliced velocity-based movement for large populations.
    Static,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub mode: ScheduleMode,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TerrainConfig {
    /// Heights below this are water at generation time.
    pub water_level: f64,
    pub river_count: u32,
    pub smoothing_passes: u32,
    pub noise_frequency: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlantConfig {
    pub max_energy: f64,
    pub regen_rate: f64,
    /// Water-distance tolerance before drought stress sets in.
    pub water_range: u32,
    /// Ticks between logic evaluations; grasses run every tick, trees coarsely.
    pub update_frequency: u32,
    pub lifespan: u32,
    pub mature_age: u32,
    pub spread_chance: f64,
    /// Seeding probability per land cell at generation.
    pub density: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VegetationConfig {
    /// Per-cell-of-stress addition to drought death chance and
    /// subtraction from spread chance.
    pub drought_penalty: f64,
    pub grass: PlantConfig,
    pub arid_grass: PlantConfig,
    pub oak: PlantConfig,
    pub pine: PlantConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpeciesConfig {
    /// Individuals seeded at generation.
    pub count: u32,
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
    /// Energy a predator gains per kill. Unused for herbivores.
    pub gain: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EvolutionConfig {
    /// Half-width of the multiplicative perturbation applied to every
    /// inherited trait.
    pub trait_variance: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub vegetation: VegetationConfig,
    pub rabbit: SpeciesConfig,
    pub wolf: SpeciesConfig,
    pub evolution: EvolutionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                width: 128,
                height: 128,
                seed: 42,
                mode: ScheduleMode::Full,
            },
            terrain: TerrainConfig {
                water_level: 0.35,
                river_count: 4,
                smoothing_passes: 2,
                noise_frequency: 0.06,
            },
            vegetation: VegetationConfig {
                drought_penalty: 0.002,
                grass: PlantConfig {
                    max_energy: 40.0,
                    regen_rate: 2.0,
                    water_range: 8,
                    update_frequency: 1,
                    lifespan: 2000,
                    mature_age: 20,
                    spread_chance: 0.08,
                    density: 0.12,
                },
                arid_grass: PlantConfig {
                    max_energy: 30.0,
                    regen_rate: 1.5,
                    water_range: 14,
                    update_frequency: 1,
                    lifespan: 1600,
                    mature_age: 25,
                    spread_chance: 0.05,
                    density: 0.02,
                },
                oak: PlantConfig {
                    max_energy: 400.0,
                    regen_rate: 4.0,
                    water_range: 10,
                    update_frequency: 16,
                    lifespan: 20000,
                    mature_age: 400,
                    spread_chance: 0.15,
                    density: 0.015,
                },
                pine: PlantConfig {
                    max_energy: 350.0,
                    regen_rate: 4.0,
                    water_range: 16,
                    update_frequency: 16,
                    lifespan: 16000,
                    mature_age: 350,
                    spread_chance: 0.12,
                    density: 0.015,
                },
            },
            rabbit: SpeciesConfig {
                count: 120,
                lifespan: 1200.0,
                maturity_age: 80.0,
                repro_cooldown: 60.0,
                litter_min: 2.0,
                litter_max: 6.0,
                juvenile_energy_mult: 0.5,
                juvenile_metabolism_mult: 0.6,
                satiety_threshold: 0.7,
                reproduction_threshold: 0.65,
                reproduction_chance: 0.2,
                vision: 6.0,
                speed: 1.0,
                max_energy: 100.0,
                metabolism: 0.5,
                eat_speed: 8.0,
                gain: 0.0,
            },
            wolf: SpeciesConfig {
                count: 12,
                lifespan: 2400.0,
                maturity_age: 160.0,
                repro_cooldown: 120.0,
                litter_min: 2.0,
                litter_max: 4.0,
                juvenile_energy_mult: 0.5,
                juvenile_metabolism_mult: 0.6,
                satiety_threshold: 0.6,
                reproduction_threshold: 0.7,
                reproduction_chance: 0.15,
                vision: 10.0,
                speed: 2.0,
                max_energy: 160.0,
                metabolism: 0.4,
                eat_speed: 0.0,
                gain: 50.0,
            },
            evolution: EvolutionConfig {
                trait_variance: 0.1,
            },
        }
    }
}

impl AppConfig {
    /// Read `config.toml` from the working directory, falling back to
    /// defaults (and writing them out) when missing or unparsable.
    pub fn load() -> Self {
        if let Ok(content) = fs::read_to_string("config.toml") {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
        }
        let default = Self::default();
        let _ = fs::write(
            "config.toml",
            toml::to_string(&default).unwrap_or_default(),
        );
        default
    }

    /// Read a specific config file; missing files fall back to defaults,
    /// a present-but-broken file is an error.
    pub fn load_path(path: &str) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(_) => Ok(Self::default()),
        }
    }
}
