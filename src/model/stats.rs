//! Aggregate counts - a pure read derived by scanning the grid.

use crate::model::animal::AnimalKind;
use crate::model::grid::Grid;
use crate::model::plant::PlantKind;
use crate::model::terrain::TerrainKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    pub tick: u64,
    pub rabbits: usize,
    pub wolves: usize,
    pub grass: usize,
    pub arid_grass: usize,
    pub oaks: usize,
    pub pines: usize,
    pub land_cells: usize,
    pub water_cells: usize,
}

impl WorldStats {
    pub fn animals(&self) -> usize {
        self.rabbits + self.wolves
    }

    pub fn plants(&self) -> usize {
        self.grass + self.arid_grass + self.oaks + self.pines
    }
}

pub fn gather(grid: &Grid, tick: u64) -> WorldStats {
    let mut stats = WorldStats {
        tick,
        ..WorldStats::default()
    };
    for cell in &grid.cells {
        match cell.terrain {
            TerrainKind::Land => stats.land_cells += 1,
            TerrainKind::Water => stats.water_cells += 1,
        }
        if let Some(plant) = &cell.plant {
            match plant.kind {
                PlantKind::Grass => stats.grass += 1,
                PlantKind::AridGrass => stats.arid_grass += 1,
                PlantKind::Oak => stats.oaks += 1,
                PlantKind::Pine => stats.pines += 1,
            }
        }
        if let Some(animal) = &cell.animal {
            match animal.kind {
                AnimalKind::Rabbit => stats.rabbits += 1,
                AnimalKind::Wolf => stats.wolves += 1,
            }
        }
    }
    stats
}
