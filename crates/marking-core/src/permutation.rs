use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermutationError {
    #[error("Value {value} is out of range for a permutation of length {len}")]
    OutOfRange { value: usize, len: usize },
    #[error("Value {0} appears more than once")]
    Repeated(usize),
    #[error("Column permutation has {columns} entries but row permutation has {rows}")]
    LengthMismatch { columns: usize, rows: usize },
}

/// A bijection on `[0, n)` stored together with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Self {
            forward: (0..n).collect(),
            inverse: (0..n).collect(),
        }
    }

    /// Draws a uniformly random permutation.
    ///
    /// Position `r` is picked among the `n - i` entries of `remaining` that are
    /// still unused, the original index stored there is sent to `i`, and the
    /// consumed entry is swapped to the tail. Lengths 0 and 1 take no draws.
    pub fn assign<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        if n <= 1 {
            return Self::identity(n);
        }

        let mut remaining: Vec<usize> = (0..n).collect();
        let mut forward = vec![0; n];
        for i in 0..n {
            let r = rng.random_range(0..n - i);
            forward[remaining[r]] = i;
            remaining.swap(r, n - i - 1);
        }

        Self::with_inverse(forward)
    }

    pub fn from_forward(forward: Vec<usize>) -> Result<Self, PermutationError> {
        let len = forward.len();
        let mut seen = vec![false; len];
        for &value in &forward {
            match seen.get_mut(value) {
                None => return Err(PermutationError::OutOfRange { value, len }),
                Some(true) => return Err(PermutationError::Repeated(value)),
                Some(slot) => *slot = true,
            }
        }
        Ok(Self::with_inverse(forward))
    }

    fn with_inverse(forward: Vec<usize>) -> Self {
        let mut inverse = vec![0; forward.len()];
        for (i, &target) in forward.iter().enumerate() {
            inverse[target] = i;
        }
        Self { forward, inverse }
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Where `index` is sent.
    pub fn forward(&self, index: usize) -> usize {
        self.forward[index]
    }

    /// Which index was sent to `target`.
    pub fn inverse(&self, target: usize) -> usize {
        self.inverse[target]
    }

    pub fn as_forward(&self) -> &[usize] {
        &self.forward
    }

    pub fn as_inverse(&self) -> &[usize] {
        &self.inverse
    }

    pub fn is_consistent(&self) -> bool {
        self.forward.len() == self.inverse.len()
            && self
                .forward
                .iter()
                .enumerate()
                .all(|(i, &t)| self.inverse.get(t) == Some(&i))
    }
}

/// Per-session placement for the randomized staircase.
///
/// `columns` maps a logical item to its horizontal slot, and `rows` maps a
/// horizontal slot to its vertical position. Both are drawn independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    columns: Permutation,
    rows: Permutation,
}

impl SlotAssignment {
    pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let rows = Permutation::assign(n, rng);
        let columns = Permutation::assign(n, rng);
        Self { columns, rows }
    }

    pub fn from_parts(columns: Permutation, rows: Permutation) -> Result<Self, PermutationError> {
        if columns.len() != rows.len() {
            return Err(PermutationError::LengthMismatch {
                columns: columns.len(),
                rows: rows.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_to_slot(&self, index: usize) -> usize {
        self.columns.forward(index)
    }

    pub fn slot_to_index(&self, slot: usize) -> usize {
        self.columns.inverse(slot)
    }

    pub fn slot_to_row(&self, slot: usize) -> usize {
        self.rows.forward(slot)
    }

    pub fn row_to_slot(&self, row: usize) -> usize {
        self.rows.inverse(row)
    }

    pub fn columns(&self) -> &Permutation {
        &self.columns
    }

    pub fn rows(&self) -> &Permutation {
        &self.rows
    }
}
