use verdant_lib::model::grid::Grid;
use verdant_lib::model::terrain::{self, TerrainKind};

fn chebyshev(a: (u32, u32), b: (u32, u32)) -> u32 {
    let dx = (i64::from(a.0) - i64::from(b.0)).unsigned_abs();
    let dy = (i64::from(a.1) - i64::from(b.1)).unsigned_abs();
    dx.max(dy) as u32
}

#[test]
fn test_moisture_equals_brute_force_distance() {
    let mut grid = Grid::new(20, 20).unwrap();
    let water = [(3u32, 4u32), (15, 2), (9, 17), (0, 0)];
    for &(x, y) in &water {
        grid.cell_mut(x, y).terrain = TerrainKind::Water;
    }
    terrain::compute_moisture(&mut grid);

    for y in 0..20 {
        for x in 0..20 {
            let expected = water
                .iter()
                .map(|&w| chebyshev((x, y), w))
                .min()
                .unwrap();
            assert_eq!(
                grid.cell(x, y).distance_to_water,
                expected,
                "wrong distance at ({x}, {y})"
            );
        }
    }
}

#[test]
fn test_river_carves_descending_chain_to_low_corner() {
    // A tilted plane sloping down toward (9, 9).
    let mut grid = Grid::new(10, 10).unwrap();
    for y in 0..10u32 {
        for x in 0..10u32 {
            grid.cell_mut(x, y).height = 1.0 - 0.04 * f64::from(x + y);
        }
    }
    let path = terrain::carve_river(&mut grid, 1, 1, 0.3);

    assert!(!path.is_empty());
    assert_eq!(path[0], (1, 1));
    for pair in path.windows(2) {
        assert_eq!(chebyshev(pair[0], pair[1]), 1, "chain must be connected");
        assert!(
            pair[0].0 + pair[0].1 < pair[1].0 + pair[1].1,
            "walk must descend the slope"
        );
    }
    assert_eq!(*path.last().unwrap(), (9, 9), "river must reach the low corner");
    for &(x, y) in &path {
        assert_eq!(grid.cell(x, y).terrain, TerrainKind::Water);
        assert!(grid.cell(x, y).height < 0.3);
    }
}

#[test]
fn test_river_joins_existing_water() {
    let mut grid = Grid::new(10, 10).unwrap();
    for y in 0..10u32 {
        for x in 0..10u32 {
            grid.cell_mut(x, y).height = 1.0 - 0.04 * f64::from(x + y);
        }
    }
    // A lake halfway down the slope.
    grid.cell_mut(5, 5).terrain = TerrainKind::Water;
    let path = terrain::carve_river(&mut grid, 1, 1, 0.3);
    assert_eq!(
        *path.last().unwrap(),
        (4, 4),
        "walk must stop on reaching the water body"
    );
}

#[test]
fn test_smoothing_is_stable_on_uniform_terrain() {
    let mut grid = Grid::new(12, 12).unwrap();
    terrain::smooth(&mut grid);
    assert!(grid
        .cells
        .iter()
        .all(|c| c.terrain == TerrainKind::Land));

    for cell in &mut grid.cells {
        cell.terrain = TerrainKind::Water;
    }
    terrain::smooth(&mut grid);
    assert!(grid
        .cells
        .iter()
        .all(|c| c.terrain == TerrainKind::Water));
}
