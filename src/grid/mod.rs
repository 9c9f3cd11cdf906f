//! The fixed-size grid of cells and its seeding and resize operations.

mod window;

pub use self::window::GridWindow;
use crate::{
    Cell, Pos2, RuleSet,
    engine::{self, StateView},
    error::{Error, Result},
};
use rand::Rng;
use std::fmt;
use tracing::{debug, trace};

/// A `width` x `height` grid of cells plus the active rule set
///
/// Every position in `[0, width) x [0, height)` holds exactly one [`Cell`].
/// The grid is not internally synchronized; callers serialize access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    rules: RuleSet,
    generation: u64,
}

/// Allocates `width * height` dead cells, failing instead of aborting on huge sizes
fn dead_cells(width: i32, height: i32) -> Result<Vec<Cell>> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    let too_large = || Error::TooLarge { width, height };
    let len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;

    let mut cells = Vec::new();
    cells.try_reserve_exact(len).map_err(|_| too_large())?;
    cells.resize(len, Cell::DEAD);
    Ok(cells)
}

impl Grid {
    /// Creates an all-dead grid using Conway's rules
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_rules(width, height, RuleSet::default())
    }

    /// Creates an all-dead grid with the given rule set
    pub fn with_rules(width: i32, height: i32, rules: RuleSet) -> Result<Self> {
        Ok(Self {
            width,
            height,
            cells: dead_cells(width, height)?,
            rules,
            generation: 0,
        })
    }

    /// Creates a grid seeded with the given alive positions
    pub fn from_alive(width: i32, height: i32, alive: &[Pos2]) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for &pos in alive {
            grid.set_alive(pos.x, pos.y, true)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }
    /// Number of steps taken since construction or the last reset
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn index(&self, x: i32, y: i32) -> Result<usize> {
        if !Pos2::new(x, y).within(self.width, self.height) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Cell> {
        let i = self.index(x, y)?;
        Ok(self.cells[i])
    }

    pub fn set_alive(&mut self, x: i32, y: i32, alive: bool) -> Result<()> {
        let i = self.index(x, y)?;
        self.cells[i].alive = alive;
        Ok(())
    }

    /// Flips a single cell, returning its new state
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<bool> {
        let i = self.index(x, y)?;
        let cell = &mut self.cells[i];
        cell.alive = !cell.alive;
        Ok(cell.alive)
    }

    /// Replaces the active rule set, used from the next [`Grid::step`] on
    pub fn set_rules(&mut self, rules: RuleSet) {
        debug!(%rules, "rule set changed");
        self.rules = rules;
    }

    /// Sets every cell dead
    pub fn clear(&mut self) {
        self.cells.fill(Cell::DEAD);
        self.generation = 0;
        debug!(width = self.width, height = self.height, "grid cleared");
    }

    /// Clears the grid and marks `floor(width * height * fraction)` distinct random cells alive
    ///
    /// `fraction` must lie in `(0.0, 1.0]`.
    pub fn randomize(&mut self, fraction: f64) -> Result<()> {
        self.randomize_with(&mut rand::rng(), fraction)
    }

    /// Like [`Grid::randomize`], drawing positions from `rng`
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, fraction: f64) -> Result<()> {
        // written so NaN fails too
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::InvalidArgument(format!(
                "randomize fraction {} is outside (0.0, 1.0]",
                fraction
            )));
        }

        let total = self.cells.len();
        let target = ((total as f64 * fraction).floor() as usize).min(total);

        // positions are drawn without replacement, so a saturated grid never re-draws
        self.cells.fill(Cell::DEAD);
        for i in rand::seq::index::sample(rng, total, target) {
            self.cells[i].alive = true;
        }
        self.generation = 0;
        debug!(fraction, alive = target, "grid randomized");
        Ok(())
    }

    /// Reallocates the grid, keeping the states of overlapping positions
    ///
    /// New positions start dead; positions outside the new bounds are dropped.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        let mut cells = dead_cells(width, height)?;
        let keep_w = self.width.min(width) as usize;
        for y in 0..self.height.min(height) as usize {
            let src = y * self.width as usize;
            let dst = y * width as usize;
            cells[dst..dst + keep_w].copy_from_slice(&self.cells[src..src + keep_w]);
        }

        debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "grid resized"
        );
        self.width = width;
        self.height = height;
        self.cells = cells;
        self.generation = 0;
        Ok(())
    }

    /// Advances the grid by one generation
    ///
    /// The whole next generation is computed before any cell is written.
    pub fn step(&mut self) {
        let next = engine::evolve(&*self, &self.rules);
        for (cell, (_, alive)) in self.cells.iter_mut().zip(next.into_states()) {
            *cell = Cell::from(alive);
        }
        self.generation += 1;
        trace!(generation = self.generation, "stepped");
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// The alive positions in row-major order
    pub fn alive_positions(&self) -> impl Iterator<Item = Pos2> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.alive)
            .map(move |(i, _)| {
                let i = i as i32;
                Pos2::new(i % width, i / width)
            })
    }

    /// A view of the cells in `[top_left, bottom_right)`
    pub fn window(&self, top_left: Pos2, bottom_right: Pos2) -> GridWindow<'_> {
        GridWindow::new(self, top_left, bottom_right)
    }
}

impl StateView for Grid {
    #[inline]
    fn width(&self) -> i32 {
        self.width
    }
    #[inline]
    fn height(&self) -> i32 {
        self.height
    }
    #[inline]
    fn is_alive(&self, pos: Pos2) -> bool {
        self.cells[pos.y as usize * self.width as usize + pos.x as usize].alive
    }
}

impl fmt::Display for Grid {
    /// One line per row, `█` for alive and `.` for dead
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width as usize).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                f.write_str(if cell.alive { "█" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(4, 3).unwrap();

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.count_alive(), 0);
        assert_eq!(grid.rules(), &RuleSet::conway());
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(Error::InvalidDimension {
                width: 0,
                height: 5
            })
        );
        assert!(matches!(
            Grid::new(5, -2),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn unallocatable_dimensions_fail() {
        assert_eq!(
            Grid::new(i32::MAX, i32::MAX),
            Err(Error::TooLarge {
                width: i32::MAX,
                height: i32::MAX
            })
        );

        let mut grid = Grid::from_alive(3, 3, &[pos(1, 1)]).unwrap();
        let before = grid.clone();
        assert!(matches!(
            grid.resize(i32::MAX, i32::MAX),
            Err(Error::TooLarge { .. })
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn access_out_of_bounds_fails() {
        let mut grid = Grid::new(5, 5).unwrap();

        assert!(matches!(grid.get(-1, 0), Err(Error::OutOfBounds { x: -1, y: 0, .. })));
        assert!(matches!(grid.get(5, 0), Err(Error::OutOfBounds { .. })));
        assert!(matches!(grid.get(0, 5), Err(Error::OutOfBounds { .. })));
        assert!(grid.set_alive(0, -1, true).is_err());
        assert!(grid.toggle(7, 7).is_err());
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn set_and_toggle() {
        let mut grid = Grid::new(3, 3).unwrap();

        grid.set_alive(1, 2, true).unwrap();
        assert!(grid.get(1, 2).unwrap().alive);
        assert!(!grid.get(2, 1).unwrap().alive);

        assert!(!grid.toggle(1, 2).unwrap());
        assert!(grid.toggle(0, 0).unwrap());
        assert_eq!(grid.alive_positions().collect::<Vec<_>>(), vec![pos(0, 0)]);
    }

    #[test]
    fn from_alive_rejects_outside_positions() {
        let grid = Grid::from_alive(3, 3, &[pos(0, 0), pos(2, 2)]).unwrap();
        assert_eq!(grid.count_alive(), 2);

        assert!(matches!(
            Grid::from_alive(3, 3, &[pos(3, 0)]),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut grid = Grid::from_alive(4, 4, &[pos(1, 1), pos(2, 3)]).unwrap();

        grid.clear();
        assert_eq!(grid.count_alive(), 0);
        grid.clear();
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn randomize_hits_exact_count() {
        let mut grid = Grid::new(10, 10).unwrap();

        grid.randomize(0.3).unwrap();
        assert_eq!(grid.count_alive(), 30);

        grid.randomize(0.005).unwrap();
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn randomize_full_fills_every_cell() {
        let mut grid = Grid::new(37, 23).unwrap();

        grid.randomize(1.0).unwrap();
        assert_eq!(grid.count_alive(), 37 * 23);
    }

    #[test]
    fn randomize_replaces_previous_state() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(8, 8).unwrap();
        grid.randomize(1.0).unwrap();

        grid.randomize_with(&mut rng, 0.25).unwrap();
        assert_eq!(grid.count_alive(), 16);
    }

    #[test]
    fn randomize_with_seed_is_reproducible() {
        let mut a = Grid::new(16, 16).unwrap();
        let mut b = Grid::new(16, 16).unwrap();

        a.randomize_with(&mut StdRng::seed_from_u64(42), 0.5).unwrap();
        b.randomize_with(&mut StdRng::seed_from_u64(42), 0.5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn randomize_rejects_bad_fractions() {
        let mut grid = Grid::from_alive(4, 4, &[pos(1, 1)]).unwrap();

        for fraction in [0.0, -0.5, 1.01, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(grid.randomize(fraction), Err(Error::InvalidArgument(_))),
                "fraction {} accepted",
                fraction
            );
        }
        // failed calls leave the grid untouched
        assert_eq!(grid.alive_positions().collect::<Vec<_>>(), vec![pos(1, 1)]);
    }

    #[test]
    fn resize_preserves_overlap() {
        let mut grid = Grid::from_alive(5, 5, &[pos(2, 2)]).unwrap();

        grid.resize(3, 3).unwrap();
        assert!(grid.get(2, 2).unwrap().alive);
        assert_eq!(grid.count_alive(), 1);

        let mut grid = Grid::from_alive(5, 5, &[pos(2, 2)]).unwrap();
        grid.resize(10, 10).unwrap();
        assert_eq!(grid.alive_positions().collect::<Vec<_>>(), vec![pos(2, 2)]);
        grid.resize(5, 5).unwrap();
        assert_eq!(grid.alive_positions().collect::<Vec<_>>(), vec![pos(2, 2)]);
    }

    #[test]
    fn resize_discards_outside_cells() {
        let mut grid = Grid::from_alive(5, 5, &[pos(4, 0), pos(0, 4), pos(1, 1)]).unwrap();

        grid.resize(4, 4).unwrap();
        grid.resize(5, 5).unwrap();
        assert_eq!(grid.alive_positions().collect::<Vec<_>>(), vec![pos(1, 1)]);
    }

    #[test]
    fn resize_non_uniform() {
        let mut grid = Grid::from_alive(2, 3, &[pos(1, 0), pos(0, 2)]).unwrap();

        grid.resize(4, 2).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 2));
        assert_eq!(grid.alive_positions().collect::<Vec<_>>(), vec![pos(1, 0)]);
    }

    #[test]
    fn failed_resize_keeps_grid() {
        let mut grid = Grid::from_alive(3, 3, &[pos(1, 1)]).unwrap();
        let before = grid.clone();

        assert!(matches!(
            grid.resize(0, 3),
            Err(Error::InvalidDimension { .. })
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn step_dead_grid_stays_dead() {
        let mut grid = Grid::new(7, 5).unwrap();

        grid.step();
        assert_eq!(grid.count_alive(), 0);
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn rule_change_applies_on_next_step() {
        // a lone pair dies under Conway but survives under B3/S1..5
        let mut grid = Grid::from_alive(4, 4, &[pos(1, 1), pos(2, 1)]).unwrap();
        grid.set_rules(RuleSet::named("Maze").unwrap());
        assert_eq!(grid.count_alive(), 2);

        grid.step();
        assert_eq!(grid.count_alive(), 2);

        grid.set_rules(RuleSet::conway());
        grid.step();
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn display_renders_rows() {
        let grid = Grid::from_alive(3, 2, &[pos(0, 0), pos(2, 1)]).unwrap();

        assert_eq!(grid.to_string(), "█..\n..█");
    }

    proptest! {
        #[test]
        fn resize_round_trip_keeps_overlap(
            alive in prop::collection::vec((0i32..6, 0i32..6), 0..20),
            w in 1i32..10,
            h in 1i32..10,
        ) {
            let alive: Vec<Pos2> = alive.into_iter().map(Pos2::from).collect();
            let original = Grid::from_alive(6, 6, &alive).unwrap();

            let mut grid = original.clone();
            grid.resize(w, h).unwrap();
            grid.resize(6, 6).unwrap();

            for y in 0..6 {
                for x in 0..6 {
                    let kept = x < w && y < h;
                    let expected = kept && original.get(x, y).unwrap().alive;
                    prop_assert_eq!(grid.get(x, y).unwrap().alive, expected);
                }
            }
        }
    }
}
