//! The [FlowField] owns a grid of [Cell]s and recomputes it as a whole whenever a new target is
//! chosen. Recomputation runs two passes:
//!
//! 1. A breadth-first wavefront from the target assigns every reachable cell its hop count to
//!    the target. All 8 neighbours are one step away, so on an open grid this is the Chebyshev
//!    distance.
//! 2. Every cell sums the offsets to its neighbours, each unit offset weighted by how much
//!    cheaper that neighbour is, and stores the angle of the result quantised to a [u8].
//!
//! ```text
//!  cost              direction
//!  2 2 2 2 2          32  48  64  80  96
//!  2 1 1 1 2          16  32  64  96 112
//!  2 1 0 1 2           0   0   0 128 128
//!  2 1 1 1 2         240 224 192 160 144
//!  2 2 2 2 2         224 208 192 176 160
//! ```
use crate::cell_grid::{Cell, CellGrid, CheckedGrid};
use crate::{DIRECTION_STEPS, UNREACHED};
use core::fmt;
use fxhash::FxHashSet;
use grid_util::grid::{BoolGrid, Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::f32::consts::{FRAC_1_SQRT_2, TAU};

/// Quantises an angle in radians into `0..256`, where 256 steps make a full turn.
pub fn quantize_angle(angle: f32) -> u8 {
    ((angle * DIRECTION_STEPS / TAU).round() as i32).rem_euclid(DIRECTION_STEPS as i32) as u8
}

/// Angle in radians, within `[0, TAU)`, of a quantised direction.
pub fn direction_to_angle(direction: u8) -> f32 {
    direction as f32 * TAU / DIRECTION_STEPS
}

/// [FlowField] guides any number of units towards a single target. It holds the cost and
/// direction of every cell as of the last [calculate_flow](Self::calculate_flow) call together
/// with a [BoolGrid] of blocked cells that the cost pass routes around.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug)]
pub struct FlowField {
    cells: CellGrid,
    blocked: BoolGrid,
    max_cost: Option<u32>,
    target: Option<Point>,
}

impl PartialEq for FlowField {
    fn eq(&self, other: &FlowField) -> bool {
        self.cells.width == other.cells.width
            && self.cells.height == other.cells.height
            && self.cells.values == other.cells.values
            && self.blocked.values == other.blocked.values
            && self.max_cost == other.max_cost
            && self.target == other.target
    }
}

impl FlowField {
    /// Creates a field of `width` by `height` open cells, all unreached. Panics if either
    /// dimension is zero.
    pub fn new(width: usize, height: usize) -> FlowField {
        assert!(
            width > 0 && height > 0,
            "Grid dimensions must be positive, got {}x{}",
            width,
            height
        );
        FlowField {
            cells: CellGrid::new(width, height, Cell::default()),
            blocked: BoolGrid::new(width, height, false),
            max_cost: None,
            target: None,
        }
    }
    pub fn width(&self) -> usize {
        self.cells.width()
    }
    pub fn height(&self) -> usize {
        self.cells.height()
    }
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }
    /// Highest finite cost of the last computation, [None] before the first one or when nothing
    /// was reachable.
    pub fn max_cost(&self) -> Option<u32> {
        self.max_cost
    }
    /// Target of the last computation.
    pub fn target(&self) -> Option<Point> {
        self.target
    }
    pub fn is_blocked(&self, point: Point) -> bool {
        self.blocked.get_checked(point).unwrap_or(false)
    }
    /// Marks a cell as (im)passable. Takes effect on the next
    /// [calculate_flow](Self::calculate_flow); returns [false] if `point` is out of bounds.
    pub fn set_blocked(&mut self, point: Point, blocked: bool) -> bool {
        self.blocked.set_checked(point, blocked)
    }

    /// Recomputes the whole field towards `target`. The target does not have to lie on the
    /// grid; if it does not, or if it is blocked, every cell ends up unreached.
    ///
    /// Both passes work on fresh buffers which replace the cells only once complete, so the
    /// previous field is either kept whole or fully overwritten.
    pub fn calculate_flow(&mut self, target: Point) {
        info!("Calculating flow field towards {}", target);
        if !self.cells.point_in_bounds(target) {
            warn!("Flow target {} lies outside the grid", target);
        } else if self.is_blocked(target) {
            warn!("Flow target {} is blocked", target);
        }
        let (costs, max_cost) = self.propagate_costs(target);
        let values = iproduct!(0..costs.height as i32, 0..costs.width as i32)
            .zip(costs.values.iter())
            .map(|((y, x), &cost)| Cell {
                cost,
                direction: cell_direction(&costs, Point::new(x, y)),
            })
            .collect::<Vec<Cell>>();
        self.cells = CellGrid {
            width: costs.width,
            height: costs.height,
            values,
        };
        self.max_cost = max_cost;
        self.target = Some(target);
        info!("Flow field towards {} has maximum cost {:?}", target, max_cost);
    }

    /// Breadth-first relaxation outwards from `target`. Each point is expanded at most once,
    /// the first time it is popped, which by layer order is also its cheapest.
    fn propagate_costs(&self, target: Point) -> (SimpleGrid<u32>, Option<u32>) {
        let mut costs = SimpleGrid::new(self.width(), self.height(), UNREACHED);
        let mut max_cost: Option<u32> = None;
        let mut visited: FxHashSet<Point> = FxHashSet::default();
        let mut queue: VecDeque<(Point, u32)> = VecDeque::new();
        let mut popped = 0_usize;
        queue.push_back((target, 0));
        while let Some((point, cost)) = queue.pop_front() {
            popped += 1;
            let current = match costs.get_checked(point) {
                Some(c) => c,
                None => continue,
            };
            if self.is_blocked(point) || !visited.insert(point) {
                continue;
            }
            let cost = current.min(cost);
            costs.set_point(point, cost);
            max_cost = max_cost.max(Some(cost));
            for n in point.moore_neighborhood() {
                if costs.point_in_bounds(n) && !self.is_blocked(n) && !visited.contains(&n) {
                    queue.push_back((n, cost + 1));
                }
            }
        }
        debug!(
            "Cost pass expanded {} of {} cells from {} queue entries",
            visited.len(),
            costs.values.len(),
            popped
        );
        (costs, max_cost)
    }

    pub fn cell_at(&self, point: Point) -> Option<Cell> {
        self.cells.get_checked(point)
    }
    /// Hop count from `point` to the target, [UNREACHED] if there is no path and [None] if
    /// `point` is off the grid.
    pub fn cost_at(&self, point: Point) -> Option<u32> {
        self.cell_at(point).map(|cell| cell.cost)
    }
    /// Quantised direction to move in from `point`, [None] if `point` is off the grid.
    pub fn direction_at(&self, point: Point) -> Option<u8> {
        self.cell_at(point).map(|cell| cell.direction)
    }
    /// Cost scaled by [max_cost](Self::max_cost) into `[0, 1]`, for colouring cells. [None] for
    /// cells off the grid or unreached.
    pub fn normalized_cost(&self, point: Point) -> Option<f32> {
        let cell = self.cell_at(point).filter(|cell| cell.reached())?;
        match self.max_cost? {
            0 => Some(0.0),
            max => Some(cell.cost as f32 / max as f32),
        }
    }
    /// Unit vector of the direction at `point`. The target and unreached cells have nowhere to
    /// go and yield the zero vector.
    pub fn direction_vector(&self, point: Point) -> Option<(f32, f32)> {
        let cell = self.cell_at(point)?;
        if !cell.reached() || cell.cost == 0 {
            return Some((0.0, 0.0));
        }
        let angle = direction_to_angle(cell.direction);
        Some((angle.cos(), angle.sin()))
    }
}

/// Direction of steepest descent around `point`, quantised. Neighbours off the grid or
/// unreached are left out; the target, unreached cells and cells on a flat plateau get 0.
fn cell_direction(costs: &SimpleGrid<u32>, point: Point) -> u8 {
    let cost = costs.get_checked(point).unwrap_or(UNREACHED);
    if cost == UNREACHED || cost == 0 {
        return 0;
    }
    // Straight and diagonal contributions are kept apart as integers so that a zero sum is exact
    let mut straight = (0_i64, 0_i64);
    let mut diagonal = (0_i64, 0_i64);
    for n in point.moore_neighborhood() {
        let n_cost = match costs.get_checked(n) {
            Some(c) if c != UNREACHED => c,
            _ => continue,
        };
        let delta = cost as i64 - n_cost as i64;
        let offset = n - point;
        let sum = if point.dir_obj(&n).diagonal() {
            &mut diagonal
        } else {
            &mut straight
        };
        sum.0 += offset.x as i64 * delta;
        sum.1 += offset.y as i64 * delta;
    }
    if straight == (0, 0) && diagonal == (0, 0) {
        return 0;
    }
    let x = straight.0 as f32 + diagonal.0 as f32 * FRAC_1_SQRT_2;
    let y = straight.1 as f32 + diagonal.1 as f32 * FRAC_1_SQRT_2;
    quantize_angle(y.atan2(x))
}

impl fmt::Display for FlowField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Costs:")?;
        for y in 0..self.height() {
            let values = (0..self.width())
                .map(|x| self.cells.get(x, y))
                .map(|c| if c.reached() { c.cost as i64 } else { -1 })
                .collect::<Vec<i64>>();
            writeln!(f, "{:?}", values)?;
        }
        writeln!(f, "\nDirections:")?;
        for y in 0..self.height() {
            let values = (0..self.width())
                .map(|x| self.cells.get(x, y).direction)
                .collect::<Vec<u8>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
