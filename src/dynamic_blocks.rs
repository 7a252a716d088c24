use fxhash::FxHashSet;
use grid_util::point::Point;

/// Row stride of the packed coordinate keys `x + LEGACY_KEY_STRIDE * y` used by adapters that
/// encode occupied cells as a single integer. Only used by [DynamicBlocks::from_legacy_keys].
pub const LEGACY_KEY_STRIDE: i32 = 256;

/// Cells that are blocked for a single search only, such as cells occupied by other agents.
/// These come on top of the static collisions of the
/// [CollisionGrid](crate::pathing_grid::CollisionGrid) and are keyed by the point itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DynamicBlocks {
    points: FxHashSet<Point>,
}

impl DynamicBlocks {
    pub fn new() -> DynamicBlocks {
        DynamicBlocks::default()
    }

    /// Decodes packed keys of the form `x + stride * y`. Keys are expected to be non-negative
    /// with `x < stride`.
    pub fn from_packed_keys<I>(keys: I, stride: i32) -> DynamicBlocks
    where
        I: IntoIterator<Item = i32>,
    {
        keys.into_iter()
            .map(|key| Point::new(key.rem_euclid(stride), key.div_euclid(stride)))
            .collect()
    }

    /// [from_packed_keys](Self::from_packed_keys) with [LEGACY_KEY_STRIDE].
    pub fn from_legacy_keys<I>(keys: I) -> DynamicBlocks
    where
        I: IntoIterator<Item = i32>,
    {
        DynamicBlocks::from_packed_keys(keys, LEGACY_KEY_STRIDE)
    }

    /// Marks a point as blocked. Returns false if it already was.
    pub fn insert(&mut self, point: Point) -> bool {
        self.points.insert(point)
    }

    pub fn remove(&mut self, point: &Point) -> bool {
        self.points.remove(point)
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

impl FromIterator<Point> for DynamicBlocks {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        DynamicBlocks {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point> for DynamicBlocks {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter)
    }
}
