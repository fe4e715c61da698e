use super::{GeometryError, positive, validate_common};
use crate::point::{Point, Rect};

/// Pie menu of equal sectors around the anchor. Sector 0 sits at north and
/// indices grow clockwise. Only the radius is bounded; direction is not.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGeometry {
    item_count: usize,
    radius: f64,
    min_dist: f64,
}

impl RadialGeometry {
    pub fn new(item_count: usize, radius: f64, min_dist: f64) -> Result<Self, GeometryError> {
        validate_common(item_count, min_dist)?;
        positive("radius", radius)?;
        Ok(Self {
            item_count,
            radius,
            min_dist,
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(-self.radius, -self.radius, 2.0 * self.radius, 2.0 * self.radius)
    }

    pub fn sweep(&self) -> f64 {
        360.0 / self.item_count as f64
    }

    /// Degrees added to the screen angle so that sector boundaries line up
    /// with the arcs the painter draws.
    pub fn rotation(&self) -> f64 {
        let n = self.item_count as f64;
        90.0 * (n + 2.0) / n
    }

    /// Start and sweep, in screen degrees (clockwise, 0 = east), of the arc
    /// covering `index`.
    pub fn sector_arc(&self, index: usize) -> Option<(f64, f64)> {
        (index < self.item_count)
            .then(|| (index as f64 * self.sweep() - self.rotation(), self.sweep()))
    }

    pub fn resolve(&self, offset: Point) -> Option<usize> {
        let d2 = offset.length_squared();
        // written so that a NaN distance fails both bounds
        if !(d2 >= self.min_dist * self.min_dist && d2 <= self.radius * self.radius) {
            return None;
        }

        let n = self.item_count as f64;
        // wrap into [0, 360)
        let angle = (offset.y.atan2(offset.x).to_degrees() + self.rotation()).rem_euclid(360.0);
        let sector = (n * angle / 360.0).floor() as usize;
        Some(sector.min(self.item_count - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_MIN_DIST;

    fn pie(n: usize) -> RadialGeometry {
        RadialGeometry::new(n, 200.0, DEFAULT_MIN_DIST).unwrap()
    }

    #[test]
    fn test_compass_points_with_four_items() {
        let g = pie(4);
        assert_eq!(g.resolve(Point::new(0.0, -100.0)), Some(0));
        assert_eq!(g.resolve(Point::new(100.0, 0.0)), Some(1));
        assert_eq!(g.resolve(Point::new(0.0, 100.0)), Some(2));
        assert_eq!(g.resolve(Point::new(-100.0, 0.0)), Some(3));
    }

    #[test]
    fn test_distance_limits() {
        let g = pie(4);
        assert_eq!(g.resolve(Point::new(0.0, -400.0)), None);
        assert_eq!(g.resolve(Point::new(3.0, -3.0)), None);
        assert_eq!(g.resolve(Point::new(0.0, -200.0)), Some(0));
    }

    #[test]
    fn test_every_direction_resolves_in_range() {
        for n in 1..=12 {
            let g = pie(n);
            for step in 0..720 {
                let theta = (step as f64 / 2.0).to_radians();
                let p = Point::new(150.0 * theta.cos(), 150.0 * theta.sin());
                let idx = g.resolve(p).expect("inside the ring");
                assert!(idx < n, "n={n} step={step} gave {idx}");
            }
        }
    }

    #[test]
    fn test_sector_arcs_agree_with_resolve() {
        for n in [3, 4, 5, 8] {
            let g = pie(n);
            for i in 0..n {
                let (start, sweep) = g.sector_arc(i).unwrap();
                let mid = (start + sweep / 2.0).to_radians();
                let p = Point::new(120.0 * mid.cos(), 120.0 * mid.sin());
                assert_eq!(g.resolve(p), Some(i), "n={n} sector {i}");
            }
            assert_eq!(g.sector_arc(n), None);
        }
    }

    #[test]
    fn test_single_item_takes_whole_ring() {
        let g = pie(1);
        assert_eq!(g.resolve(Point::new(0.0, -50.0)), Some(0));
        assert_eq!(g.resolve(Point::new(-50.0, 1.0)), Some(0));
        assert_eq!(g.resolve(Point::new(50.0, 0.0)), Some(0));
    }
}
