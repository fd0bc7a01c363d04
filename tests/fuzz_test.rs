/// Fuzzes the flow field by comparing its costs on many random grids against a plain
/// breadth-first search, and checking that every direction leads downhill.
use grid_flowfield::{FlowField, UNREACHED};
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::VecDeque;
use std::f32::consts::TAU;

fn random_field(w: usize, h: usize, rng: &mut StdRng) -> FlowField {
    let mut field = FlowField::new(w, h);
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            field.set_blocked(Point::new(x, y), rng.gen_bool(0.3));
        }
    }
    field
}

fn random_point(field: &FlowField, rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(0..field.width()) as i32,
        rng.gen_range(0..field.height()) as i32,
    )
}

fn visualize_field(field: &FlowField, target: &Point) {
    for y in 0..field.height() as i32 {
        for x in 0..field.width() as i32 {
            let p = Point::new(x, y);
            if *target == p {
                print!("T");
            } else if field.is_blocked(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Reference costs from an ordinary BFS that marks cells when they are first queued.
fn reference_costs(field: &FlowField, target: Point) -> Vec<Vec<u32>> {
    let (w, h) = (field.width() as i32, field.height() as i32);
    let mut costs = vec![vec![UNREACHED; w as usize]; h as usize];
    if field.is_blocked(target) {
        return costs;
    }
    let mut queue = VecDeque::new();
    costs[target.y as usize][target.x as usize] = 0;
    queue.push_back(target);
    while let Some(p) = queue.pop_front() {
        let c = costs[p.y as usize][p.x as usize];
        for dx in -1..=1 {
            for dy in -1..=1 {
                let n = Point::new(p.x + dx, p.y + dy);
                if n.x < 0 || n.y < 0 || n.x >= w || n.y >= h || field.is_blocked(n) {
                    continue;
                }
                if costs[n.y as usize][n.x as usize] == UNREACHED {
                    costs[n.y as usize][n.x as usize] = c + 1;
                    queue.push_back(n);
                }
            }
        }
    }
    costs
}

#[test]
fn fuzz_costs() {
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let w = rng.gen_range(1..12);
        let h = rng.gen_range(1..12);
        let mut field = random_field(w, h, &mut rng);
        let target = random_point(&field, &mut rng);
        field.calculate_flow(target);
        let expected = reference_costs(&field, target);
        let mut max_cost = None;
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let p = Point::new(x, y);
                let cost = field.cost_at(p).unwrap();
                if cost != expected[y as usize][x as usize] {
                    visualize_field(&field, &target);
                    println!("{}", field);
                }
                assert_eq!(cost, expected[y as usize][x as usize]);
                if cost != UNREACHED {
                    max_cost = max_cost.max(Some(cost));
                }
            }
        }
        assert_eq!(field.max_cost(), max_cost);
        let first = field.clone();
        field.calculate_flow(target);
        assert_eq!(first, field);
    }
}

/// On an open grid, moving one cell along the quantised direction never increases the cost.
#[test]
fn fuzz_directions_descend() {
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let w = rng.gen_range(2..16);
        let h = rng.gen_range(2..16);
        let mut field = FlowField::new(w, h);
        let target = random_point(&field, &mut rng);
        field.calculate_flow(target);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let p = Point::new(x, y);
                let cost = field.cost_at(p).unwrap();
                if cost == 0 {
                    continue;
                }
                let angle = field.direction_at(p).unwrap() as f32 * TAU / 256.0;
                let step = Point::new(
                    p.x + angle.cos().round() as i32,
                    p.y + angle.sin().round() as i32,
                );
                if let Some(next) = field.cost_at(step) {
                    assert!(next <= cost, "{:?} -> {:?} goes uphill in\n{}", p, step, field);
                }
            }
        }
    }
}
