use super::StateView;
use crate::Pos2;

/// Offsets of the eight positions surrounding a cell
pub(super) const NEIGHBOR_OFFSETS: [Pos2; 8] = [
    Pos2::new(-1, -1),
    Pos2::new(0, -1),
    Pos2::new(1, -1),
    Pos2::new(-1, 0),
    Pos2::new(1, 0),
    Pos2::new(-1, 1),
    Pos2::new(0, 1),
    Pos2::new(1, 1),
];

/// Counts the live neighbors of `pos`
///
/// Off-grid positions do not exist and are never counted, so an edge cell has
/// at most 5 neighbors and a corner cell at most 3. The result is in `0..=8`.
pub fn neighbor_count<V: StateView + ?Sized>(view: &V, pos: Pos2) -> u32 {
    let (w, h) = (view.width(), view.height());
    NEIGHBOR_OFFSETS
        .iter()
        .map(|&offset| pos + offset)
        .filter(|&n| n.within(w, h) && view.is_alive(n))
        .count() as u32
}
