use grid_util::point::Point;

/// Cost of a single orthogonal step.
pub const STEP_COST: i32 = 1;

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two points,
/// scaled by [STEP_COST]. Admissible and consistent on a 4-connected uniform-cost grid.
pub fn manhattan(p1: &Point, p2: &Point) -> i32 {
    ((p1.x - p2.x).abs() + (p1.y - p2.y).abs()) * STEP_COST
}
