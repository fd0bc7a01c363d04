//! # grid_flowfield
//!
//! A grid-based [flow field](https://en.wikipedia.org/wiki/Vector_field) pathfinding system.
//! Rather than searching a path for every unit, a single breadth-first pass from the target
//! assigns every cell its hop count to the target, after which a second pass derives a movement
//! direction per cell from the local cost gradient. Any number of units can then look up the
//! direction of the cell they stand on in constant time.
//!
//! Note that every step costs 1, diagonal or not, so costs equal the
//! [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance) on an open grid.
//!
//! ```
//! use grid_flowfield::FlowField;
//! use grid_util::point::Point;
//!
//! let mut field = FlowField::new(5, 5);
//! field.calculate_flow(Point::new(2, 2));
//! assert_eq!(field.cost_at(Point::new(0, 0)), Some(2));
//! assert_eq!(field.max_cost(), Some(2));
//! ```
pub mod cell_grid;
pub mod flow_field;

pub use cell_grid::{Cell, CellGrid, CheckedGrid};
pub use flow_field::FlowField;

/// Cost of a cell the cost pass never reached.
pub const UNREACHED: u32 = u32::MAX;
/// Number of quantised steps in a full turn of a [Cell::direction].
pub const DIRECTION_STEPS: f32 = 256.0;
