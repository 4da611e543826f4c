use ndarray::Array2;

/// Single coordinate axis used for grid height, width, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Simulation clock value; the hazard and the player share one clock, one
/// tick per player move.
pub type Ticks = u32;

/// Count of player moves.
pub type StepCount = u32;

/// Freeze time recorded for cells the hazard never reaches.
pub const NEVER: Ticks = Ticks::MAX;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// The four cardinal displacements in `(row, col)` form. Movement and hazard
/// spread are both 4-connected; diagonals never touch.
pub(crate) const CARDINALS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, size)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= CARDINALS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, CARDINALS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbor_iter_clips_at_the_corner() {
        let grid: Array2<u8> = Array2::default([3, 3]);

        let neighbors: Vec<Coord2> = grid.iter_neighbors((0, 0)).collect();

        assert_eq!(neighbors, [(1, 0), (0, 1)]);
    }

    #[test]
    fn neighbor_iter_yields_four_cells_in_the_interior() {
        let grid: Array2<u8> = Array2::default([3, 3]);

        let neighbors: Vec<Coord2> = grid.iter_neighbors((1, 1)).collect();

        assert_eq!(neighbors, [(0, 1), (2, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn apply_delta_rejects_out_of_bounds_moves() {
        assert_eq!(apply_delta((0, 0), (-1, 0), (3, 3)), None);
        assert_eq!(apply_delta((2, 2), (0, 1), (3, 3)), None);
        assert_eq!(apply_delta((1, 1), (1, 0), (3, 3)), Some((2, 1)));
    }
}
