use super::{CellSize, GeometryError, in_dead_zone, row_at, validate_common};
use crate::permutation::SlotAssignment;
use crate::point::{Point, Rect};
use rand::Rng;

/// Staircase of cells whose horizontal slot and vertical row are shuffled
/// once per session.
///
/// Slot `s` starts at `s * cell.height` horizontally, so neighbouring cells
/// overlap when the cell is wider than it is tall. Rows never overlap, which
/// is why the hit test goes row first. The answer is not the item under the
/// finger but the item half a menu away from it in index order.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomizedGeometry {
    item_count: usize,
    cell: CellSize,
    min_dist: f64,
    assignment: Option<SlotAssignment>,
}

impl RandomizedGeometry {
    pub fn new(item_count: usize, cell: CellSize, min_dist: f64) -> Result<Self, GeometryError> {
        validate_common(item_count, min_dist)?;
        cell.validate()?;
        Ok(Self {
            item_count,
            cell,
            min_dist,
            assignment: None,
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn assignment(&self) -> Option<&SlotAssignment> {
        self.assignment.as_ref()
    }

    pub fn begin_session<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.assignment = Some(SlotAssignment::generate(self.item_count, rng));
    }

    pub fn end_session(&mut self) {
        self.assignment = None;
    }

    pub fn bounds(&self) -> Rect {
        let n = self.item_count as f64;
        Rect::new(
            0.0,
            0.0,
            self.cell.height * (n - 1.0) + self.cell.width,
            self.cell.height * n,
        )
    }

    /// Where logical item `index` is drawn this session.
    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        let assignment = self.assignment.as_ref()?;
        if index >= self.item_count {
            return None;
        }
        let slot = assignment.index_to_slot(index);
        let row = assignment.slot_to_row(slot);
        Some(Rect::new(
            self.cell.height * slot as f64,
            self.cell.height * row as f64,
            self.cell.width,
            self.cell.height,
        ))
    }

    /// Logical item physically under `offset`, before the half-menu shift.
    pub fn logical_under(&self, offset: Point) -> Option<usize> {
        let assignment = self.assignment.as_ref()?;
        if in_dead_zone(offset, self.min_dist) || !self.bounds().contains(offset) {
            return None;
        }

        let row = row_at(offset.y, self.cell.height, self.item_count)?;
        let slot = assignment.row_to_slot(row);
        let left = self.cell.height * slot as f64;
        if !(left..=left + self.cell.width).contains(&offset.x) {
            return None;
        }
        Some(assignment.slot_to_index(slot))
    }

    pub fn resolve(&self, offset: Point) -> Option<usize> {
        self.logical_under(offset)
            .map(|logical| shift_half(logical, self.item_count))
    }
}

/// `((index - n / 2) mod n + n) mod n` with truncating `n / 2`.
pub fn shift_half(index: usize, n: usize) -> usize {
    let n = n as isize;
    (index as isize - n / 2).rem_euclid(n) as usize
}
