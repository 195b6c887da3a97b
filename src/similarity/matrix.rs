/// Symmetric user-user weights stored as a lower triangle (diagonal
/// included) in one flat buffer. Entry `(i, j)` with `i >= j` lives at
/// `i * (i + 1) / 2 + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    size: usize,
    weights: Vec<f64>,
}

impl WeightMatrix {
    pub(crate) fn from_buffer(size: usize, weights: Vec<f64>) -> Self {
        debug_assert_eq!(weights.len(), triangle_len(size));
        Self { size, weights }
    }

    /// Number of users covered by the matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of materialized entries
    pub fn entries(&self) -> usize {
        self.weights.len()
    }

    /// Weight between two dense positions, in either order.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.get(a, b)
            .unwrap_or_else(|| panic!("position ({a}, {b}) out of range for {} users", self.size))
    }

    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        let (i, j) = if a >= b { (a, b) } else { (b, a) };
        if i >= self.size {
            return None;
        }
        self.weights.get(row_offset(i) + j).copied()
    }

    /// Stored part of row `i`: weights against positions `0..=i`
    pub fn row(&self, i: usize) -> &[f64] {
        let start = row_offset(i);
        &self.weights[start..start + i + 1]
    }

    /// Count of off-diagonal pairs with a nonzero weight
    pub fn nonzero_pairs(&self) -> usize {
        (0..self.size)
            .map(|i| self.row(i)[..i].iter().filter(|w| **w != 0.0).count())
            .sum()
    }
}

pub(crate) fn row_offset(i: usize) -> usize {
    i * (i + 1) / 2
}

pub(crate) fn triangle_len(size: usize) -> usize {
    row_offset(size)
}
