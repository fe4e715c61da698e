use super::{CellSize, GeometryError, in_dead_zone, row_at, validate_common};
use crate::point::{Point, Rect};

/// Equal-height cells stacked downward from the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGeometry {
    item_count: usize,
    cell: CellSize,
    min_dist: f64,
}

impl LinearGeometry {
    pub fn new(item_count: usize, cell: CellSize, min_dist: f64) -> Result<Self, GeometryError> {
        validate_common(item_count, min_dist)?;
        cell.validate()?;
        Ok(Self {
            item_count,
            cell,
            min_dist,
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.cell.width,
            self.cell.height * self.item_count as f64,
        )
    }

    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        (index < self.item_count).then(|| {
            Rect::new(
                0.0,
                self.cell.height * index as f64,
                self.cell.width,
                self.cell.height,
            )
        })
    }

    pub fn resolve(&self, offset: Point) -> Option<usize> {
        if in_dead_zone(offset, self.min_dist) || !self.bounds().contains(offset) {
            return None;
        }
        row_at(offset.y, self.cell.height, self.item_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_MIN_DIST;

    fn three_items() -> LinearGeometry {
        LinearGeometry::new(3, CellSize::new(100.0, 40.0), DEFAULT_MIN_DIST).unwrap()
    }

    #[test]
    fn test_resolve_picks_row() {
        let g = three_items();
        assert_eq!(g.resolve(Point::new(50.0, 85.0)), Some(2));
        assert_eq!(g.resolve(Point::new(50.0, 10.0)), Some(0));
        assert_eq!(g.resolve(Point::new(0.0, 45.0)), Some(1));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let g = three_items();
        assert_eq!(g.resolve(Point::new(50.0, 500.0)), None);
        assert_eq!(g.resolve(Point::new(-5.0, 60.0)), None);
        assert_eq!(g.resolve(Point::new(100.5, 60.0)), None);
        assert_eq!(g.resolve(Point::new(50.0, -30.0)), None);
        // closed bottom edge must not leak index N
        assert_eq!(g.resolve(Point::new(50.0, 120.0)), None);
    }

    #[test]
    fn test_dead_zone_is_none() {
        let g = three_items();
        assert_eq!(g.resolve(Point::new(1.0, 1.0)), None);
        assert_eq!(g.resolve(Point::new(0.0, 0.0)), None);
        assert_eq!(g.resolve(Point::new(0.0, DEFAULT_MIN_DIST)), Some(0));
    }

    #[test]
    fn test_cell_rect_centers_resolve_to_their_index() {
        let g = LinearGeometry::new(4, CellSize::new(120.0, 50.0), DEFAULT_MIN_DIST).unwrap();
        for i in 0..4 {
            let rect = g.cell_rect(i).unwrap();
            assert_eq!(g.resolve(rect.center()), Some(i));
        }
        assert_eq!(g.cell_rect(4), None);
    }
}
