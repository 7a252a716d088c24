use crate::error::{PathError, Result};
use core::fmt;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Character marking a statically blocked cell in a collision string. Every other character is
/// walkable.
pub const BLOCKED_CHAR: char = '1';

/// A single grid position. The neighbours are the indices of the orthogonally adjacent cells,
/// clipped at the border, in the order left, up, right, down.
#[derive(Clone, Debug)]
pub struct Cell {
    pub point: Point,
    pub blocked: bool,
    neighbours: SmallVec<[usize; 4]>,
}

impl Cell {
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }
}

/// [CollisionGrid] holds the static topology a search runs on: the blocked flag of every cell,
/// the cached 4-neighbourhood of every cell and the connected components of the open cells in a
/// [UnionFind] structure. It is never mutated by a search, so one grid can serve any number of
/// searches, also concurrently.
#[derive(Clone, Debug)]
pub struct CollisionGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
}

impl CollisionGrid {
    /// Parses a row-major collision string where the character at `x + y * width` is
    /// [BLOCKED_CHAR] for a blocked cell. The string must hold exactly `width * height`
    /// characters.
    pub fn from_collision_string(
        collision_map: &str,
        width: usize,
        height: usize,
    ) -> Result<CollisionGrid> {
        if width == 0 || height == 0 {
            return Err(PathError::InvalidMap(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(PathError::InvalidMap(format!(
                "grid dimensions {width}x{height} exceed the coordinate range"
            )));
        }
        let n_cells = width.checked_mul(height).ok_or_else(|| {
            PathError::InvalidMap(format!("grid of {width}x{height} cells is too large"))
        })?;
        let map_len = collision_map.chars().count();
        if map_len != n_cells {
            return Err(PathError::InvalidMap(format!(
                "collision map has {map_len} cells, expected {width}x{height} = {n_cells}"
            )));
        }

        let cells = collision_map
            .chars()
            .enumerate()
            .map(|(ix, c)| Cell {
                point: Point::new((ix % width) as i32, (ix / width) as i32),
                blocked: c == BLOCKED_CHAR,
                neighbours: SmallVec::new(),
            })
            .collect();
        let mut grid = CollisionGrid {
            width,
            height,
            cells,
            components: UnionFind::new(n_cells),
        };
        for ix in 0..n_cells {
            let neighbours = grid.neumann_neighbourhood(&grid.cells[ix].point);
            grid.cells[ix].neighbours = neighbours;
        }
        grid.generate_components();
        Ok(grid)
    }

    fn neumann_neighbourhood(&self, point: &Point) -> SmallVec<[usize; 4]> {
        [
            Point::new(point.x - 1, point.y),
            Point::new(point.x, point.y - 1),
            Point::new(point.x + 1, point.y),
            Point::new(point.x, point.y + 1),
        ]
        .iter()
        .filter_map(|p| self.get_ix_point(p))
        .collect()
    }

    /// Links every open cell to its open right and lower neighbour, which covers every open
    /// orthogonal edge exactly once.
    fn generate_components(&mut self) {
        info!(
            "Generating connected components for {}x{} grid",
            self.width, self.height
        );
        for ix in 0..self.cells.len() {
            if self.cells[ix].blocked {
                continue;
            }
            let point = self.cells[ix].point;
            for p in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
                if let Some(n_ix) = self.get_ix_point(&p) {
                    if !self.cells[n_ix].blocked {
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, `width * height`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, ix: usize) -> &Cell {
        &self.cells[ix]
    }

    pub fn point(&self, ix: usize) -> Point {
        self.cells[ix].point
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Row-major index of a point, [None] if it lies outside the grid.
    pub fn get_ix_point(&self, point: &Point) -> Option<usize> {
        if self.in_bounds(point.x, point.y) {
            Some(point.x as usize + point.y as usize * self.width)
        } else {
            None
        }
    }

    /// Like [get_ix_point](Self::get_ix_point), reporting points outside the grid as
    /// [PathError::OutOfBounds].
    pub fn checked_ix(&self, point: &Point) -> Result<usize> {
        self.get_ix_point(point).ok_or(PathError::OutOfBounds {
            x: point.x,
            y: point.y,
            width: self.width,
            height: self.height,
        })
    }

    /// Whether a point is statically blocked. Points outside the grid count as blocked.
    pub fn is_blocked(&self, point: &Point) -> bool {
        self.get_ix_point(point)
            .map_or(true, |ix| self.cells[ix].blocked)
    }

    /// Points of the orthogonal neighbours of a point, empty outside the grid.
    pub fn neighbours_of(&self, point: &Point) -> SmallVec<[Point; 4]> {
        match self.get_ix_point(point) {
            Some(ix) => self.cells[ix]
                .neighbours
                .iter()
                .map(|&n| self.cells[n].point)
                .collect(),
            None => SmallVec::new(),
        }
    }

    /// Retrieves the component id of the cell at the given index.
    pub fn get_component(&self, ix: usize) -> usize {
        self.components.find(ix)
    }

    /// Components a search leaving or entering this cell can run through: the cell's own if it
    /// is open and those of its open neighbours.
    fn touching_components(&self, ix: usize) -> SmallVec<[usize; 5]> {
        let cell = &self.cells[ix];
        (!cell.blocked)
            .then_some(ix)
            .into_iter()
            .chain(
                cell.neighbours
                    .iter()
                    .copied()
                    .filter(|&n| !self.cells[n].blocked),
            )
            .map(|n| self.components.find(n))
            .collect()
    }

    /// Checks whether a path from start to goal can exist on the static map. The start is left
    /// through any neighbour and the goal may be entered even when blocked, so both ends are
    /// matched on every component they touch. Dynamic blocks are not taken into account, hence
    /// a positive answer does not guarantee a path.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        let (Some(start_ix), Some(goal_ix)) = (self.get_ix_point(start), self.get_ix_point(goal))
        else {
            return false;
        };
        if start_ix == goal_ix || self.cells[start_ix].neighbours.contains(&goal_ix) {
            return true;
        }
        let start_components = self.touching_components(start_ix);
        self.touching_components(goal_ix)
            .iter()
            .any(|c| start_components.contains(c))
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
}

impl fmt::Display for CollisionGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line = row
                .iter()
                .map(|c| if c.blocked { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
