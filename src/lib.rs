//! # collision_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a 4-connected,
//! uniform-cost grid. The grid is built once from a packed collision string, in which `'1'`
//! marks a blocked cell, and can then be searched any number of times with a different set of
//! [DynamicBlocks] per search. The heuristic is the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry).
//! Connected components of the open cells are pre-computed so that unreachable goals are
//! rejected without flood-filling the grid.
//!
//! Paths are returned from the goal back to the first step after the start. The goal is always
//! allowed as the final hop, even when it is blocked itself.
pub mod astar;
pub mod dynamic_blocks;
pub mod error;
pub mod heuristic;
pub mod pathing_grid;

pub use crate::dynamic_blocks::{DynamicBlocks, LEGACY_KEY_STRIDE};
pub use crate::error::{PathError, Result};
pub use crate::pathing_grid::{Cell, CollisionGrid};
pub use grid_util::point::Point;

use crate::astar::astar_collision;
use crate::heuristic::{manhattan, STEP_COST};
use core::fmt;
use itertools::Itertools;
use log::info;

/// Turns a path in goal-to-start order, as returned by the search, into the order in which it is
/// walked. The start is not part of either.
pub fn path_from_start(mut path: Vec<Point>) -> Vec<Point> {
    path.reverse();
    path
}

/// Checks that consecutive points of a path are orthogonal neighbours.
pub fn is_contiguous(path: &[Point]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| manhattan(a, b) == STEP_COST)
}

/// [Pathfinder] couples a [CollisionGrid] with the search settings. The grid is only read during
/// a search, so a single [Pathfinder] can be shared between threads.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    pub grid: CollisionGrid,
    /// Rejects goals on a different connected component than the start before searching.
    pub prefilter_components: bool,
}

impl Pathfinder {
    /// Builds the grid from a collision string, see
    /// [CollisionGrid::from_collision_string].
    pub fn new(collision_map: &str, width: usize, height: usize) -> Result<Pathfinder> {
        CollisionGrid::from_collision_string(collision_map, width, height).map(Pathfinder::from)
    }

    /// Computes a path from start to goal avoiding both the static collisions and the given
    /// dynamic blocks. The path runs from the goal back to the first step after the start and
    /// is empty if both coincide. `Ok(None)` means that no path exists.
    pub fn get_path_single_goal(
        &self,
        start: Point,
        goal: Point,
        dynamic_blocks: &DynamicBlocks,
    ) -> Result<Option<Vec<Point>>> {
        let start_ix = self.grid.checked_ix(&start)?;
        let goal_ix = self.grid.checked_ix(&goal)?;
        if self.prefilter_components && self.grid.unreachable(&start, &goal) {
            info!("{:?} is not reachable from {:?}", goal, start);
            return Ok(None);
        }
        info!("Computing path from {:?} to {:?}", start, goal);
        Ok(astar_collision(
            &self.grid,
            start_ix,
            goal_ix,
            dynamic_blocks,
        ))
    }

    /// Same as [get_path_single_goal](Self::get_path_single_goal), with the path in walking
    /// order: first step first, goal last.
    pub fn get_path_from_start(
        &self,
        start: Point,
        goal: Point,
        dynamic_blocks: &DynamicBlocks,
    ) -> Result<Option<Vec<Point>>> {
        self.get_path_single_goal(start, goal, dynamic_blocks)
            .map(|path| path.map(path_from_start))
    }
}

impl From<CollisionGrid> for Pathfinder {
    fn from(grid: CollisionGrid) -> Self {
        Pathfinder {
            grid,
            prefilter_components: true,
        }
    }
}

impl fmt::Display for Pathfinder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

/// One-shot search: builds a grid from `collision_map` and searches it once. Prefer
/// [Pathfinder] when searching the same map repeatedly.
pub fn find_path(
    collision_map: &str,
    width: usize,
    height: usize,
    start: Point,
    end: Point,
    dynamic_blocks: &DynamicBlocks,
) -> Result<Option<Vec<Point>>> {
    Pathfinder::new(collision_map, width, height)?.get_path_single_goal(start, end, dynamic_blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_order_ends_at_goal() {
        let pathfinder = Pathfinder::new("00000", 5, 1).unwrap();
        let path = pathfinder
            .get_path_from_start(Point::new(0, 0), Point::new(3, 0), &DynamicBlocks::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            path,
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );
        assert!(is_contiguous(&path));
    }

    #[test]
    fn contiguity() {
        assert!(is_contiguous(&[]));
        assert!(is_contiguous(&[Point::new(4, 4)]));
        assert!(!is_contiguous(&[Point::new(0, 0), Point::new(1, 1)]));
        assert!(!is_contiguous(&[Point::new(0, 0), Point::new(0, 0)]));
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let pathfinder = Pathfinder::new("0000", 2, 2).unwrap();
        let blocks = DynamicBlocks::new();
        let err = pathfinder
            .get_path_single_goal(Point::new(0, 0), Point::new(2, 1), &blocks)
            .unwrap_err();
        assert_eq!(
            err,
            PathError::OutOfBounds {
                x: 2,
                y: 1,
                width: 2,
                height: 2
            }
        );
        assert!(matches!(
            pathfinder.get_path_single_goal(Point::new(-1, 0), Point::new(1, 1), &blocks),
            Err(PathError::OutOfBounds { .. })
        ));
    }

    /// The prefilter only skips the search, it never changes its outcome.
    #[test]
    fn prefilter_agrees_with_search() {
        // |..#.|
        // |..#.|
        let mut pathfinder = Pathfinder::new("00100010", 4, 2).unwrap();
        let blocks = DynamicBlocks::new();
        for prefilter in [true, false] {
            pathfinder.prefilter_components = prefilter;
            let across = pathfinder
                .get_path_single_goal(Point::new(0, 0), Point::new(3, 1), &blocks)
                .unwrap();
            assert!(across.is_none());
            let onto_wall = pathfinder
                .get_path_single_goal(Point::new(0, 0), Point::new(2, 1), &blocks)
                .unwrap();
            assert_eq!(onto_wall.map(|p| p.len()), Some(3));
        }
    }

    #[test]
    fn display_renders_grid() {
        let pathfinder = Pathfinder::new("0110", 2, 2).unwrap();
        assert_eq!(pathfinder.to_string(), ".#\n#.\n");
    }
}
