//! Cell grid - the spatial arena every plant and animal lives in.

use crate::model::animal::Animal;
use crate::model::error::SimError;
use crate::model::plant::Plant;
use crate::model::rng::SimRng;
use crate::model::terrain::{GroundCover, TerrainKind, NEIGHBORS8};
use serde::{Deserialize, Serialize};

/// One tile of the world. Cells are created once at generation and only
/// ever mutated in place; occupancy is exclusive per slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    pub height: f64,
    pub terrain: TerrainKind,
    pub ground_cover: GroundCover,
    /// Shortest grid-step distance to the nearest water cell.
    /// `u32::MAX` in a world with no water at all.
    pub distance_to_water: u32,
    pub plant: Option<Plant>,
    pub animal: Option<Animal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    /// Row-major, `cells[y * width + x]`.
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        })
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn cell(&self, x: u32, y: u32) -> &Cell {
        &self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn cell_mut(&mut self, x: u32, y: u32) -> &mut Cell {
        let idx = self.idx(x, y);
        &mut self.cells[idx]
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Bounds-checked lookup for signed coordinates.
    pub fn get(&self, x: i64, y: i64) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(self.cell(x as u32, y as u32))
        } else {
            None
        }
    }

    /// The 8-connected neighborhood, clipped at the edges.
    pub fn neighbors8(&self, x: u32, y: u32) -> Vec<(u32, u32)> {
        let mut out = Vec::with_capacity(8);
        for (dx, dy) in NEIGHBORS8 {
            let nx = i64::from(x) + i64::from(dx);
            let ny = i64::from(y) + i64::from(dy);
            if self.in_bounds(nx, ny) {
                out.push((nx as u32, ny as u32));
            }
        }
        out
    }

    /// Every cell within a square radius of the center, center excluded.
    pub fn cells_within(&self, x: u32, y: u32, radius: u32) -> Vec<(u32, u32)> {
        let r = i64::from(radius);
        let mut out = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = i64::from(x) + dx;
                let ny = i64::from(y) + dy;
                if self.in_bounds(nx, ny) {
                    out.push((nx as u32, ny as u32));
                }
            }
        }
        out
    }

    /// Nearest cell matching the predicate by Manhattan distance, ties
    /// broken uniformly at random. The center cell is never considered.
    pub fn nearest_matching<F>(
        &self,
        x: u32,
        y: u32,
        radius: u32,
        rng: &mut SimRng,
        pred: F,
    ) -> Option<(u32, u32)>
    where
        F: Fn(&Cell) -> bool,
    {
        let mut best_dist = u32::MAX;
        let mut best: Vec<(u32, u32)> = Vec::new();
        for (nx, ny) in self.cells_within(x, y, radius) {
            if !pred(self.cell(nx, ny)) {
                continue;
            }
            let d = Self::manhattan((x, y), (nx, ny));
            if d < best_dist {
                best_dist = d;
                best.clear();
                best.push((nx, ny));
            } else if d == best_dist {
                best.push((nx, ny));
            }
        }
        rng.pick(&best).copied()
    }

    /// Land with a free animal slot.
    pub fn is_free_land(&self, x: u32, y: u32) -> bool {
        let cell = self.cell(x, y);
        cell.terrain == TerrainKind::Land && cell.animal.is_none()
    }

    /// Rejection-sample a free land cell. Gives up after `attempts`
    /// draws, which only matters on water-dominated or packed grids.
    pub fn random_free_land_cell(&self, rng: &mut SimRng, attempts: u32) -> Option<(u32, u32)> {
        for _ in 0..attempts {
            let x = rng.range_int(0, i64::from(self.width) - 1) as u32;
            let y = rng.range_int(0, i64::from(self.height) - 1) as u32;
            if self.is_free_land(x, y) {
                return Some((x, y));
            }
        }
        None
    }

    #[inline]
    pub fn manhattan(a: (u32, u32), b: (u32, u32)) -> u32 {
        let dx = (i64::from(a.0) - i64::from(b.0)).unsigned_abs();
        let dy = (i64::from(a.1) - i64::from(b.1)).unsigned_abs();
        (dx + dy) as u32
    }
}
