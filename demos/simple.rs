use collision_astar::{DynamicBlocks, Pathfinder, Point};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// The collision string is row-major with '1' marking blocked cells.

fn main() {
    env_logger::init();
    let pathfinder = Pathfinder::new("000010000", 3, 3).unwrap();
    println!("{}", pathfinder);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = pathfinder
        .get_path_from_start(start, end, &DynamicBlocks::new())
        .unwrap()
        .unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
