use super::Grid;
use crate::{Pos2, engine::StateView};

/// A read-only rectangular view of a [`Grid`], for renderers
///
/// The window spans `[tl, br)` and may extend past the grid; positions
/// outside the grid are simply never yielded.
pub struct GridWindow<'a> {
    tl: Pos2,
    br: Pos2,
    grid: &'a Grid,
}
impl<'a> GridWindow<'a> {
    pub fn new(grid: &'a Grid, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            grid,
        }
    }

    /// The alive positions inside the window, in row-major grid coordinates
    pub fn iter(&self) -> impl Iterator<Item = Pos2> + use<'a> {
        let grid = self.grid;
        // clip to the grid so only real cells are visited
        let x0 = self.tl.x.max(0);
        let x1 = self.br.x.min(grid.width());
        let y0 = self.tl.y.max(0);
        let y1 = self.br.y.min(grid.height());
        (y0..y1)
            .flat_map(move |y| (x0..x1).map(move |x| Pos2::new(x, y)))
            .filter(move |&pos| grid.is_alive(pos))
    }
}

impl<'a> std::fmt::Display for GridWindow<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut last = self.tl - Pos2 { x: 1, y: 0 };
        for alive in self.iter() {
            // determine the number of lines to print
            let lines = alive.y - last.y;
            // determine the number of padding spaces to print
            let padding = match lines {
                0 => alive.x - last.x - 1,
                _ => alive.x - self.tl.x,
            };
            write!(
                f,
                "{0:\n<1$}{0: <2$}█",
                "", lines as usize, padding as usize
            )?;
            last = alive;
        }
        Ok(())
    }
}
