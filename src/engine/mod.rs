//! The evolution engine: a pure function from one generation to the next.

mod neighbors;

pub use self::neighbors::neighbor_count;
use crate::{Pos2, RuleSet};

/// Read access to a rectangular generation of cells
///
/// `is_alive` is only ever called with positions inside
/// `[0, width) x [0, height)`. A view with a non-positive dimension has no
/// positions and evolves to an empty generation.
pub trait StateView {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn is_alive(&self, pos: Pos2) -> bool;
}

/// A dense matrix of cell states, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    width: i32,
    height: i32,
    states: Vec<bool>,
}

impl Generation {
    /// Creates an all-dead generation
    ///
    /// A non-positive dimension gives an empty generation with no positions.
    pub(crate) fn dead(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            states: vec![false; width as usize * height as usize],
        }
    }

    /// Copies the state of any view into an owned generation
    pub fn snapshot<V: StateView + ?Sized>(view: &V) -> Self {
        let mut generation = Self::dead(view.width(), view.height());
        for pos in generation.positions() {
            let alive = view.is_alive(pos);
            generation.set(pos, alive);
        }
        generation
    }

    #[inline]
    fn index(&self, pos: Pos2) -> usize {
        debug_assert!(pos.within(self.width, self.height), "{:?} out of bounds", pos);
        pos.y as usize * self.width as usize + pos.x as usize
    }

    #[inline]
    pub fn get(&self, pos: Pos2) -> bool {
        self.states[self.index(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos2, alive: bool) {
        let i = self.index(pos);
        self.states[i] = alive;
    }

    pub fn count_alive(&self) -> usize {
        self.states.iter().filter(|&&alive| alive).count()
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos2> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Pos2::new(x, y)))
    }

    /// Consumes the generation, yielding `(position, alive)` in row-major order
    pub fn into_states(self) -> impl Iterator<Item = (Pos2, bool)> {
        let width = self.width;
        self.states.into_iter().enumerate().map(move |(i, alive)| {
            let i = i as i32;
            (Pos2::new(i % width, i / width), alive)
        })
    }
}

impl StateView for Generation {
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
        self.get(pos)
    }
}

/// The state of a cell in the next generation
#[inline]
pub fn next_state(alive: bool, neighbors: u32, rules: &RuleSet) -> bool {
    if alive {
        rules.survive(neighbors)
    } else {
        rules.birth(neighbors)
    }
}

/// Computes the next generation of `view` under `rules`
///
/// Every next state is derived from the unmodified current generation; the
/// result is returned whole and `view` is never written to.
pub fn evolve<V: StateView + ?Sized>(view: &V, rules: &RuleSet) -> Generation {
    let mut next = Generation::dead(view.width(), view.height());
    for pos in next.positions() {
        let neighbors = neighbor_count(view, pos);
        let alive = next_state(view.is_alive(pos), neighbors, rules);
        next.set(pos, alive);
    }
    next
}
