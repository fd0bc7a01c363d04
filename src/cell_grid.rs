use crate::UNREACHED;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;

/// Per-cell state of a flow field: hop count to the target and the quantised direction to
/// move in, where `0..256` covers a full turn starting at +x.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub cost: u32,
    pub direction: u8,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            cost: UNREACHED,
            direction: 0,
        }
    }
}

impl Cell {
    pub fn reached(&self) -> bool {
        self.cost != UNREACHED
    }
}

/// Row-major store of [Cell]s.
pub type CellGrid = SimpleGrid<Cell>;

/// Bounds-checked access on top of [Grid]. Neighbour expansion proposes points off the grid all
/// the time, so these yield [None] or [false] instead of indexing out of range.
pub trait CheckedGrid<T: Clone + Copy>: Grid<T> {
    fn get_checked(&self, point: Point) -> Option<T> {
        if self.point_in_bounds(point) {
            Some(self.get_point(point))
        } else {
            None
        }
    }
    /// Returns [false] and leaves the grid untouched if `point` is out of bounds.
    fn set_checked(&mut self, point: Point, value: T) -> bool {
        if self.point_in_bounds(point) {
            self.set_point(point, value);
            true
        } else {
            false
        }
    }
}

impl<T: Clone + Copy, G: Grid<T>> CheckedGrid<T> for G {}
