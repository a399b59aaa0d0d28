use crate::models::{Body, Vector2};
use crate::utils::BarnesHutError;

/// One of the four children of a subdivided region.
///
/// The discriminant is the child's slot in [`BoundingRegion::subdivide`] and in a
/// node's child array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    fn is_east(self) -> bool {
        matches!(self, Quadrant::NorthEast | Quadrant::SouthEast)
    }

    fn is_north(self) -> bool {
        matches!(self, Quadrant::NorthWest | Quadrant::NorthEast)
    }
}

/// An axis-aligned square covering `[center - half_extent, center + half_extent)` on both axes.
///
/// This is used both for the world extent handed to a tree build and for every node's quadrant.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::models::{BoundingRegion, Vector2};
///
/// let region = BoundingRegion::new(Vector2::zero(), 1.0).unwrap();
///
/// assert!(region.contains(Vector2::new(0.0, 0.0)));   // Center
/// assert!(region.contains(Vector2::new(-1.0, -1.0))); // Lower corner (inclusive)
/// assert!(!region.contains(Vector2::new(1.0, 0.0)));  // Right edge (exclusive)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    pub center: Vector2,
    pub half_extent: f64,
}

impl BoundingRegion {
    /// Creates a region, rejecting a non-positive half extent or a non-finite center.
    pub fn new(center: Vector2, half_extent: f64) -> Result<Self, BarnesHutError> {
        if !center.is_finite() || !half_extent.is_finite() || half_extent <= 0.0 {
            return Err(BarnesHutError::InvalidRegion);
        }
        Ok(BoundingRegion { center, half_extent })
    }

    /// Builds a world region centered on the origin that covers every body.
    ///
    /// The half extent is `scale` times the farthest coordinate on either axis, plus `margin`.
    /// Non-finite coordinates are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::models::{Body, BoundingRegion, Vector2};
    ///
    /// let bodies = vec![
    ///     Body::new(0, Vector2::new(4.0, -2.0), 1.0).unwrap(),
    ///     Body::new(1, Vector2::new(-1.0, 8.0), 1.0).unwrap(),
    /// ];
    /// let world = BoundingRegion::containing(&bodies, 1.5, 10.0).unwrap();
    /// assert_eq!(world.half_extent, 22.0);
    /// assert!(bodies.iter().all(|b| world.contains(b.position)));
    /// ```
    pub fn containing(bodies: &[Body], scale: f64, margin: f64) -> Result<Self, BarnesHutError> {
        let farthest = bodies
            .iter()
            .flat_map(|b| [b.position.x.abs(), b.position.y.abs()])
            .filter(|c| c.is_finite())
            .fold(0.0_f64, f64::max);
        Self::new(Vector2::zero(), farthest * scale + margin)
    }

    pub fn min(&self) -> Vector2 {
        Vector2::new(self.center.x - self.half_extent, self.center.y - self.half_extent)
    }

    pub fn max(&self) -> Vector2 {
        Vector2::new(self.center.x + self.half_extent, self.center.y + self.half_extent)
    }

    /// Full side length of the square.
    pub fn span(&self) -> f64 {
        2.0 * self.half_extent
    }

    /// Returns true if the point is inside this region.
    ///
    /// Lower bounds are inclusive and upper bounds exclusive on both axes, so a point on a shared
    /// edge belongs to exactly one of two neighbouring regions.
    pub fn contains(&self, point: Vector2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x &&
            point.x < max.x &&
            point.y >= min.y &&
            point.y < max.y
    }

    /// Returns true if the two regions overlap.
    ///
    /// Regions that only touch along an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::models::{BoundingRegion, Vector2};
    ///
    /// let world = BoundingRegion::new(Vector2::zero(), 10.0).unwrap();
    /// let overlapping = BoundingRegion::new(Vector2::new(15.0, 0.0), 6.0).unwrap();
    /// let apart = BoundingRegion::new(Vector2::new(25.0, 0.0), 6.0).unwrap();
    ///
    /// assert!(world.intersects(&overlapping));
    /// assert!(!world.intersects(&apart));
    /// ```
    pub fn intersects(&self, other: &BoundingRegion) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Picks the child quadrant a point descends into.
    ///
    /// A coordinate must be strictly greater than the center to go east or north, so points on a
    /// splitting axis fall to the west or south side.
    pub fn quadrant_of(&self, point: Vector2) -> Quadrant {
        match (point.x > self.center.x, point.y > self.center.y) {
            (false, true) => Quadrant::NorthWest,
            (true, true) => Quadrant::NorthEast,
            (false, false) => Quadrant::SouthWest,
            (true, false) => Quadrant::SouthEast,
        }
    }

    /// The region covered by one quadrant: half the half extent, offset by half of it on each axis.
    pub fn child(&self, quadrant: Quadrant) -> BoundingRegion {
        let hs = self.half_extent / 2.0;
        let dx = if quadrant.is_east() { hs } else { -hs };
        let dy = if quadrant.is_north() { hs } else { -hs };
        BoundingRegion {
            center: Vector2::new(self.center.x + dx, self.center.y + dy),
            half_extent: hs,
        }
    }

    /// Subdivides the region into its four quadrants (NW, NE, SW, SE).
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::models::{BoundingRegion, Vector2};
    ///
    /// let region = BoundingRegion::new(Vector2::zero(), 1.0).unwrap();
    /// let [nw, ne, sw, se] = region.subdivide();
    ///
    /// assert_eq!(nw.center, Vector2::new(-0.5, 0.5));
    /// assert_eq!(ne.center, Vector2::new(0.5, 0.5));
    /// assert_eq!(sw.center, Vector2::new(-0.5, -0.5));
    /// assert_eq!(se.center, Vector2::new(0.5, -0.5));
    /// assert_eq!(nw.half_extent, 0.5);
    /// ```
    pub fn subdivide(&self) -> [BoundingRegion; 4] {
        Quadrant::ALL.map(|q| self.child(q))
    }
}
