//! A* over a [CollisionGrid]. The per-search state lives in an [IndexMap] keyed by cell index, so
//! the grid itself stays untouched and the insertion order of the map doubles as the discovery
//! order used to break ties between cells with equal estimated cost.
use crate::dynamic_blocks::DynamicBlocks;
use crate::heuristic::{manhattan, STEP_COST};
use crate::pathing_grid::CollisionGrid;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Position of the start cell in the side table.
const START_INDEX: usize = 0;

struct SmallestCostHolder {
    estimated_cost: i32,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.index == other.index
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then the cell discovered first
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Search state of a touched cell. Cells absent from the table have infinite cost.
#[derive(Clone, Debug)]
struct NodeState {
    /// Side table position of the predecessor on the best known path.
    parent: usize,
    cost: i32,
    heuristic: i32,
    closed: bool,
}

impl NodeState {
    fn estimated_cost(&self) -> i32 {
        self.cost + self.heuristic
    }
}

/// Walks the parent links from the goal back to the start, excluding the start.
fn reverse_path(
    grid: &CollisionGrid,
    nodes: &FxIndexMap<usize, NodeState>,
    goal_index: usize,
) -> Vec<Point> {
    std::iter::successors(Some(goal_index), |&i| {
        nodes.get_index(i).map(|(_, state)| state.parent)
    })
    .take_while(|&i| i != START_INDEX)
    .filter_map(|i| nodes.get_index(i).map(|(&cell_ix, _)| grid.point(cell_ix)))
    .collect()
}

/// Runs A* from `start_ix` to `goal_ix`, both of which must be valid cell indices of `grid`.
/// Returns the path from the goal back to the first step after the start, so an empty path
/// when start and goal coincide, or [None] if the open set runs dry.
///
/// A neighbour enters the open set when it is the goal, whether blocked or not, or when it is
/// neither statically nor dynamically blocked. The goal's predecessor and cost are overwritten
/// every time it is reached; other open cells are only updated on a strictly cheaper path.
pub fn astar_collision(
    grid: &CollisionGrid,
    start_ix: usize,
    goal_ix: usize,
    dynamic_blocks: &DynamicBlocks,
) -> Option<Vec<Point>> {
    let goal = grid.point(goal_ix);
    let start_heuristic = manhattan(&grid.point(start_ix), &goal);

    let mut nodes: FxIndexMap<usize, NodeState> = FxIndexMap::default();
    nodes.insert(
        start_ix,
        NodeState {
            parent: usize::MAX,
            cost: 0,
            heuristic: start_heuristic,
            closed: false,
        },
    );
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: start_heuristic,
        index: START_INDEX,
    });

    let mut expanded = 0usize;
    while let Some(SmallestCostHolder {
        estimated_cost,
        index,
    }) = to_see.pop()
    {
        let Some((&cell_ix, state)) = nodes.get_index(index) else {
            continue;
        };
        // A cell is pushed again whenever its cost changes; only the entry matching the
        // current estimate of an open cell is live.
        if state.closed || estimated_cost != state.estimated_cost() {
            continue;
        }
        if cell_ix == goal_ix {
            let path = reverse_path(grid, &nodes, index);
            debug!(
                "Found path of length {} after expanding {} cells",
                path.len(),
                expanded
            );
            if !path.is_empty() && (grid.cell(goal_ix).blocked || dynamic_blocks.contains(&goal))
            {
                warn!("Path to {goal:?} ends on a blocked cell");
            }
            return Some(path);
        }
        let cost = state.cost;
        if let Some((_, state)) = nodes.get_index_mut(index) {
            state.closed = true;
        }
        expanded += 1;

        for &neighbour_ix in grid.cell(cell_ix).neighbours() {
            let new_cost = cost + STEP_COST;
            let neighbour = grid.cell(neighbour_ix);
            let is_goal = neighbour_ix == goal_ix;
            let h; // heuristic of the neighbour
            let n; // side table position of the neighbour
            match nodes.entry(neighbour_ix) {
                Vacant(e) => {
                    if !is_goal && (neighbour.blocked || dynamic_blocks.contains(&neighbour.point))
                    {
                        continue;
                    }
                    h = manhattan(&neighbour.point, &goal);
                    n = e.index();
                    e.insert(NodeState {
                        parent: index,
                        cost: new_cost,
                        heuristic: h,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    n = e.index();
                    let state = e.get_mut();
                    if state.closed {
                        continue;
                    }
                    if is_goal || (!neighbour.blocked && new_cost < state.cost) {
                        state.parent = index;
                        state.cost = new_cost;
                        h = state.heuristic;
                    } else {
                        continue;
                    }
                }
            }
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                index: n,
            });
        }
    }
    debug!(
        "Open set exhausted after expanding {} cells, no path to {:?}",
        expanded, goal
    );
    None
}
