use grid_flowfield::FlowField;
use grid_util::point::Point;

const ARROWS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];

// In this example a flow field is computed on a grid with shape
// ..........
// ....#.....
// ....#..T..
// ....#.....
// ..........
// T marks the target, every other cell is printed as the arrow closest to its direction
fn main() {
    let mut field = FlowField::new(10, 5);
    for y in 1..4 {
        field.set_blocked(Point::new(4, y), true);
    }
    let target = Point::new(7, 2);
    field.calculate_flow(target);
    println!("{}", field);
    for y in 0..field.height() as i32 {
        let line = (0..field.width() as i32)
            .map(|x| {
                let p = Point::new(x, y);
                if p == target {
                    'T'
                } else if field.is_blocked(p) {
                    '#'
                } else {
                    let dir = field.direction_at(p).unwrap_or(0) as usize;
                    ARROWS[((dir + 16) / 32) % 8]
                }
            })
            .collect::<String>();
        println!("{}", line);
    }
}
