use log::{debug, info};
use rayon::prelude::*;

use super::matrix::{triangle_len, WeightMatrix};
use super::pearson::pearson;
use crate::ratings::UserProfile;

/// Builds the user-user Pearson weight matrix.
///
/// Row `i` holds the weights of user `i` against users `0..i` plus the
/// diagonal. Rows are independent and are filled in parallel, each worker
/// writing only to its own slice of the flat buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CorrelationEngine;

impl CorrelationEngine {
    pub fn new() -> Self {
        Self
    }

    /// `profiles` must be ordered by dense position
    pub fn build(&self, profiles: &[UserProfile]) -> WeightMatrix {
        let n_users = profiles.len();
        info!(
            "Building correlation matrix for {} users ({} pairs)",
            n_users,
            n_users * n_users.saturating_sub(1) / 2
        );

        let mut weights = vec![0.0_f64; triangle_len(n_users)];
        let rows = split_rows(&mut weights, n_users);

        rows.into_par_iter()
            .enumerate()
            .for_each(|(i, row)| fill_row(profiles, i, row));

        let matrix = WeightMatrix::from_buffer(n_users, weights);
        debug!("Correlation matrix has {} informative pairs", matrix.nonzero_pairs());
        matrix
    }
}

/// Carves the flat buffer into rows of length 1, 2, ..., n
fn split_rows(weights: &mut [f64], n_users: usize) -> Vec<&mut [f64]> {
    let mut rows = Vec::with_capacity(n_users);
    let mut rest = weights;
    for i in 0..n_users {
        let (row, tail) = std::mem::take(&mut rest).split_at_mut(i + 1);
        rows.push(row);
        rest = tail;
    }
    rows
}

fn fill_row(profiles: &[UserProfile], i: usize, row: &mut [f64]) {
    let user = &profiles[i];
    for (j, other) in profiles[..i].iter().enumerate() {
        row[j] = pearson(user, other);
    }
    row[i] = 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RatingRecord;
    use crate::ratings::load_training;

    fn profiles(records: Vec<RatingRecord>) -> Vec<UserProfile> {
        load_training(records).profiles().to_vec()
    }

    fn population() -> Vec<UserProfile> {
        profiles(vec![
            RatingRecord::new(1, 1, 5.0),
            RatingRecord::new(2, 1, 3.0),
            RatingRecord::new(3, 1, 4.0),
            RatingRecord::new(1, 2, 4.0),
            RatingRecord::new(2, 2, 2.0),
            RatingRecord::new(1, 3, 1.0),
            RatingRecord::new(2, 3, 5.0),
            RatingRecord::new(3, 3, 2.0),
            RatingRecord::new(9, 4, 3.0),
            RatingRecord::new(3, 5, 4.0),
            RatingRecord::new(4, 5, 4.0),
        ])
    }

    #[test]
    fn test_diagonal_is_one() {
        let matrix = CorrelationEngine::new().build(&population());

        for i in 0..matrix.size() {
            assert_eq!(matrix.weight(i, i), 1.0);
        }
    }

    #[test]
    fn test_weights_are_symmetric_and_bounded() {
        let profiles = population();
        let matrix = CorrelationEngine::new().build(&profiles);

        for a in 0..profiles.len() {
            for b in 0..profiles.len() {
                let w = matrix.weight(a, b);
                assert_eq!(w, matrix.weight(b, a));
                assert!((-1.0..=1.0).contains(&w));
            }
        }
    }

    #[test]
    fn test_matches_pairwise_pearson() {
        let profiles = population();
        let matrix = CorrelationEngine::new().build(&profiles);

        assert_eq!(matrix.weight(0, 1), 1.0);
        assert_eq!(matrix.weight(0, 2), pearson(&profiles[0], &profiles[2]));
        // user 4 rated only item 9, shared with nobody
        for other in [0, 1, 2, 4] {
            assert_eq!(matrix.weight(3, other), 0.0);
        }
        // user 5 has flat ratings
        assert_eq!(matrix.weight(4, 0), 0.0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let profiles = population();
        let engine = CorrelationEngine::new();

        let first = engine.build(&profiles);
        let second = engine.build(&profiles);

        for i in 0..first.size() {
            let a: Vec<u64> = first.row(i).iter().map(|w| w.to_bits()).collect();
            let b: Vec<u64> = second.row(i).iter().map(|w| w.to_bits()).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_empty_population() {
        let matrix = CorrelationEngine::new().build(&[]);

        assert_eq!(matrix.size(), 0);
        assert_eq!(matrix.entries(), 0);
    }
}
