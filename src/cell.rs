/// A single binary-state cell
///
/// Cells have no identity beyond their position in a [`Grid`](crate::Grid)
/// and carry no rendering state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub alive: bool,
}

impl Cell {
    pub const DEAD: Cell = Cell { alive: false };
    pub const ALIVE: Cell = Cell { alive: true };

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

impl From<bool> for Cell {
    #[inline]
    fn from(alive: bool) -> Self {
        Self { alive }
    }
}
