//! Procedural terrain - height field, river carving, smoothing, and the
//! moisture distance field.

use crate::model::config::TerrainConfig;
use crate::model::error::SimError;
use crate::model::grid::Grid;
use crate::model::rng::{Noise2d, SimRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerrainKind {
    #[default]
    Land,
    Water,
}

/// Derived, cosmetic classification of the soil surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroundCover {
    #[default]
    Dirt,
    ForestFloor,
}

/// Offsets of the 8-connected neighborhood.
pub const NEIGHBORS8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const DETAIL_FREQUENCY: f64 = 5.0;
const DETAIL_WEIGHT: f64 = 0.15;
/// Carved river beds sit just below the waterline.
const RIVER_DEPTH_MARGIN: f64 = 0.01;

/// Build the world's terrain: noise heights, water classification,
/// rivers, smoothing, then the moisture field. Deterministic for a
/// given seed.
pub fn generate(
    width: u32,
    height: u32,
    seed: u64,
    cfg: &TerrainConfig,
    rng: &mut SimRng,
) -> Result<Grid, SimError> {
    let mut grid = Grid::new(width, height)?;
    let mut noise = Noise2d::new(seed.wrapping_add(0x5EED));
    fill_heights(&mut grid, &mut noise, cfg);
    for cell in &mut grid.cells {
        if cell.height < cfg.water_level {
            cell.terrain = TerrainKind::Water;
        }
    }
    for _ in 0..cfg.river_count {
        let x = rng.range_int(0, i64::from(width) - 1) as u32;
        let y = rng.range_int(0, i64::from(height) - 1) as u32;
        carve_river(&mut grid, x, y, cfg.water_level);
    }
    for _ in 0..cfg.smoothing_passes {
        smooth(&mut grid);
    }
    compute_moisture(&mut grid);
    Ok(grid)
}

fn fill_heights(grid: &mut Grid, noise: &mut Noise2d, cfg: &TerrainConfig) {
    let f = cfg.noise_frequency;
    for y in 0..grid.height {
        for x in 0..grid.width {
            let base = noise.sample(f64::from(x) * f, f64::from(y) * f);
            let detail = noise.sample(
                f64::from(x) * f * DETAIL_FREQUENCY,
                f64::from(y) * f * DETAIL_FREQUENCY,
            );
            grid.cell_mut(x, y).height = (base + DETAIL_WEIGHT * detail) / (1.0 + DETAIL_WEIGHT);
        }
    }
}

/// Steepest-descent walk from a land cell, converting the visited path
/// to water pinned just below the waterline. The walk runs on the
/// untouched height field and stops at a local minimum or on reaching
/// existing water. Returns the carved path; a start on water is
/// silently skipped and yields an empty path.
pub fn carve_river(grid: &mut Grid, start_x: u32, start_y: u32, water_level: f64) -> Vec<(u32, u32)> {
    if grid.cell(start_x, start_y).terrain != TerrainKind::Land {
        return Vec::new();
    }
    let mut path = vec![(start_x, start_y)];
    let (mut cx, mut cy) = (start_x, start_y);
    loop {
        let current_height = grid.cell(cx, cy).height;
        let mut lowest: Option<(u32, u32, f64)> = None;
        for (nx, ny) in grid.neighbors8(cx, cy) {
            let h = grid.cell(nx, ny).height;
            if lowest.map_or(true, |(_, _, lh)| h < lh) {
                lowest = Some((nx, ny, h));
            }
        }
        let Some((nx, ny, nh)) = lowest else { break };
        if grid.cell(nx, ny).terrain != TerrainKind::Land {
            break;
        }
        if nh >= current_height {
            break;
        }
        path.push((nx, ny));
        cx = nx;
        cy = ny;
    }
    for &(x, y) in &path {
        let cell = grid.cell_mut(x, y);
        cell.terrain = TerrainKind::Water;
        cell.height = water_level - RIVER_DEPTH_MARGIN;
    }
    path
}

/// One majority-neighbor pass over a snapshot of the terrain: isolated
/// water pockets dry up, land pockets surrounded by water flood.
pub fn smooth(grid: &mut Grid) {
    let kinds: Vec<TerrainKind> = grid.cells.iter().map(|c| c.terrain).collect();
    let width = grid.width as usize;
    for y in 0..grid.height {
        for x in 0..grid.width {
            let mut water = 0;
            for (dx, dy) in NEIGHBORS8 {
                let nx = i64::from(x) + i64::from(dx);
                let ny = i64::from(y) + i64::from(dy);
                if grid.in_bounds(nx, ny)
                    && kinds[ny as usize * width + nx as usize] == TerrainKind::Water
                {
                    water += 1;
                }
            }
            let center = kinds[y as usize * width + x as usize];
            let cell = grid.cell_mut(x, y);
            match center {
                TerrainKind::Water if water < 3 => cell.terrain = TerrainKind::Land,
                TerrainKind::Land if water > 5 => cell.terrain = TerrainKind::Water,
                _ => {}
            }
        }
    }
}

/// Multi-source breadth-first expansion from every water cell, +1 per
/// grid step over the 8-connected neighborhood. Yields the exact
/// shortest grid distance for every cell.
pub fn compute_moisture(grid: &mut Grid) {
    let mut queue = VecDeque::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            let cell = grid.cell_mut(x, y);
            if cell.terrain == TerrainKind::Water {
                cell.distance_to_water = 0;
                queue.push_back((x, y));
            } else {
                cell.distance_to_water = u32::MAX;
            }
        }
    }
    while let Some((x, y)) = queue.pop_front() {
        let d = grid.cell(x, y).distance_to_water;
        for (nx, ny) in grid.neighbors8(x, y) {
            let neighbor = grid.cell_mut(nx, ny);
            if neighbor.distance_to_water == u32::MAX {
                neighbor.distance_to_water = d + 1;
                queue.push_back((nx, ny));
            }
        }
    }
}

/// Recompute the derived ground cover from tree density: a land cell
/// carrying a tree, or touching at least two, is forest floor.
pub fn refresh_ground_cover(grid: &mut Grid) {
    let width = grid.width as usize;
    let trees: Vec<bool> = grid
        .cells
        .iter()
        .map(|c| c.plant.as_ref().is_some_and(|p| p.kind.is_tree()))
        .collect();
    for y in 0..grid.height {
        for x in 0..grid.width {
            let mut adjacent = 0;
            for (dx, dy) in NEIGHBORS8 {
                let nx = i64::from(x) + i64::from(dx);
                let ny = i64::from(y) + i64::from(dy);
                if grid.in_bounds(nx, ny) && trees[ny as usize * width + nx as usize] {
                    adjacent += 1;
                }
            }
            let own_tree = trees[y as usize * width + x as usize];
            let cell = grid.cell_mut(x, y);
            cell.ground_cover = if cell.terrain == TerrainKind::Land && (own_tree || adjacent >= 2)
            {
                GroundCover::ForestFloor
            } else {
                GroundCover::Dirt
            };
        }
    }
}
