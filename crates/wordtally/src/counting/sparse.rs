//! # Sparse Count Vectors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A sparse row of term counts.
///
/// `indices` are strictly increasing, all `< dim`; `counts` are non-zero
/// and parallel to `indices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseCountVector {
    dim: usize,
    indices: Vec<usize>,
    counts: Vec<u64>,
}

impl SparseCountVector {
    /// An all-zero vector of width `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            counts: Vec::new(),
        }
    }

    /// Build from ``{ column -> count }``; zero counts and out-of-range columns are dropped.
    pub fn from_counts(
        dim: usize,
        counts: BTreeMap<usize, u64>,
    ) -> Self {
        let (indices, counts) = counts
            .into_iter()
            .filter(|&(index, count)| index < dim && count > 0)
            .unzip();
        Self {
            dim,
            indices,
            counts,
        }
    }

    /// The vector width; the vocabulary size it was produced against.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The number of non-zero columns.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// The non-zero columns, increasing.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The count at `index`; zero when absent.
    pub fn get(
        &self,
        index: usize,
    ) -> u64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.counts[pos],
            Err(_) => 0,
        }
    }

    /// Iterate ``(column, count)`` over non-zero columns.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
    }

    /// The sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Expand to a dense row.
    pub fn to_dense(&self) -> Vec<u64> {
        let mut dense = vec![0; self.dim];
        for (index, count) in self.iter() {
            dense[index] = count;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counts() {
        let v = SparseCountVector::from_counts(
            4,
            BTreeMap::from([(3, 2), (0, 1), (1, 0), (9, 5)]),
        );
        assert_eq!(v.dim(), 4);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.indices(), &[0, 3]);
        assert_eq!(v.get(3), 2);
        assert_eq!(v.get(1), 0);
        assert_eq!(v.total(), 3);
        assert_eq!(v.to_dense(), vec![1, 0, 0, 2]);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(0, 1), (3, 2)]);
    }

    #[test]
    fn test_empty() {
        let v = SparseCountVector::new(3);
        assert_eq!(v.nnz(), 0);
        assert_eq!(v.to_dense(), vec![0, 0, 0]);
    }

    #[test]
    fn test_json() {
        let v = SparseCountVector::from_counts(3, BTreeMap::from([(1, 2)]));
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"dim":3,"indices":[1],"counts":[2]}"#);
    }
}
