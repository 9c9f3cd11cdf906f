use gridlife::{Error, Generation, Grid, Pos2, RuleSet, engine::neighbor_count, evolve};

fn pos(x: i32, y: i32) -> Pos2 {
    Pos2 { x, y }
}

fn glider() -> Grid {
    Grid::from_alive(
        5,
        5,
        &[pos(1, 0), pos(2, 1), pos(0, 2), pos(1, 2), pos(2, 2)],
    )
    .unwrap()
}

fn centroid(grid: &Grid) -> (f64, f64) {
    let alive: Vec<Pos2> = grid.alive_positions().collect();
    let n = alive.len() as f64;
    let (sx, sy) = alive
        .iter()
        .fold((0, 0), |(sx, sy), p| (sx + p.x, sy + p.y));
    (sx as f64 / n, sy as f64 / n)
}

#[test]
fn glider_keeps_five_cells_and_translates() {
    let mut grid = glider();
    let (x0, y0) = centroid(&grid);

    for _ in 0..4 {
        grid.step();
        assert_eq!(grid.count_alive(), 5);
    }

    let (x4, y4) = centroid(&grid);
    assert_eq!((x4 - x0, y4 - y0), (1.0, 1.0));
    assert_eq!(
        grid.alive_positions().collect::<Vec<_>>(),
        vec![pos(2, 1), pos(3, 2), pos(1, 3), pos(2, 3), pos(3, 3)]
    );
}

#[test]
fn glider_dies_into_block_at_corner() {
    // clamped edges stop the glider instead of wrapping it around
    let mut grid = glider();
    for _ in 0..40 {
        grid.step();
    }

    assert_eq!(
        grid.alive_positions().collect::<Vec<_>>(),
        vec![pos(3, 3), pos(4, 3), pos(3, 4), pos(4, 4)]
    );
}

#[test]
fn dead_grid_stays_dead_for_each_catalog_rule() {
    for entry in RuleSet::catalog() {
        let mut grid = Grid::with_rules(9, 4, entry.rules).unwrap();
        grid.step();

        let expected = if entry.rules.birth(0) { 36 } else { 0 };
        assert_eq!(grid.count_alive(), expected, "{}", entry);
    }
}

#[test]
fn corner_has_at_most_three_neighbors() {
    for (w, h) in [(1, 1), (2, 2), (3, 3), (3, 7), (10, 4)] {
        let mut grid = Grid::new(w, h).unwrap();
        grid.randomize(1.0).unwrap();

        let corner = neighbor_count(&grid, pos(0, 0));
        assert!(corner <= 3);
        assert_eq!(corner, if w > 1 && h > 1 { 3 } else { (w.max(h) > 1) as u32 });
    }
}

#[test]
fn evolve_is_pure() {
    let mut grid = Grid::new(12, 12).unwrap();
    grid.randomize(0.4).unwrap();
    let before = grid.clone();
    let rules = RuleSet::named("HighLife").unwrap();

    let a = evolve(&grid, &rules);
    let b = evolve(&Generation::snapshot(&grid), &rules);
    assert_eq!(a, b);
    assert_eq!(grid, before);
}

#[test]
fn step_matches_evolve() {
    let mut grid = Grid::new(20, 15).unwrap();
    grid.randomize(0.35).unwrap();
    let expected = evolve(&grid, grid.rules());

    grid.step();
    assert_eq!(Generation::snapshot(&grid), expected);
}

#[test]
fn clear_twice() {
    let mut grid = Grid::new(8, 8).unwrap();
    grid.randomize(0.5).unwrap();

    grid.clear();
    assert_eq!(grid.count_alive(), 0);
    grid.clear();
    assert_eq!(grid.count_alive(), 0);
}

#[test]
fn resize_preserves_overlap() {
    let mut grid = Grid::from_alive(5, 5, &[pos(2, 2)]).unwrap();
    grid.resize(3, 3).unwrap();
    assert!(grid.get(2, 2).unwrap().alive);

    let mut grid = Grid::from_alive(5, 5, &[pos(2, 2)]).unwrap();
    grid.resize(10, 10).unwrap();
    assert_eq!(grid.count_alive(), 1);
    grid.resize(5, 5).unwrap();
    assert!(grid.get(2, 2).unwrap().alive);
    assert_eq!(grid.count_alive(), 1);
}

#[test]
fn randomize_counts() {
    let mut grid = Grid::new(10, 10).unwrap();
    grid.randomize(0.3).unwrap();
    assert_eq!(grid.count_alive(), 30);

    let mut big = Grid::new(200, 150).unwrap();
    big.randomize(1.0).unwrap();
    assert_eq!(big.count_alive(), 200 * 150);
}

#[test]
fn contract_violations() {
    assert_eq!(RuleSet::new(&[9], &[2, 3]), Err(Error::InvalidRule(9)));
    assert!(matches!(Grid::new(0, 5), Err(Error::InvalidDimension { .. })));

    let grid = Grid::new(5, 5).unwrap();
    assert!(matches!(grid.get(-1, 0), Err(Error::OutOfBounds { .. })));
}

#[test]
fn rule_swap_between_steps() {
    // B3/S23 blinker oscillates; under B1357/S1357 the same seed grows
    let mut grid = Grid::from_alive(9, 9, &[pos(3, 4), pos(4, 4), pos(5, 4)]).unwrap();
    grid.step();
    assert_eq!(grid.count_alive(), 3);

    grid.set_rules("B1357/S1357".parse().unwrap());
    grid.step();
    assert!(grid.count_alive() > 3);
}
