use std::cmp::Ordering;

use crate::ratings::UserProfile;

/// Running sums of mean-centered deviations over co-rated items
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CoRatingSums {
    pub xy: f64,
    pub xx: f64,
    pub yy: f64,
    pub common_items: usize,
}

impl CoRatingSums {
    fn add(&mut self, dx: f64, dy: f64) {
        self.xy += dx * dy;
        self.xx += dx * dx;
        self.yy += dy * dy;
        self.common_items += 1;
    }

    /// Pearson coefficient, or 0 when there is no overlap or one side has
    /// zero variance over it.
    pub fn coefficient(&self) -> f64 {
        let denominator = self.xx * self.yy;
        if denominator == 0.0 {
            return 0.0;
        }
        (self.xy / denominator.sqrt()).clamp(-1.0, 1.0)
    }
}

/// Merge-joins the two sorted item lists and accumulates the deviation sums
/// of every item both users rated.
pub fn co_rating_sums(a: &UserProfile, b: &UserProfile) -> CoRatingSums {
    let (items_a, ratings_a, mean_a) = (a.items(), a.ratings(), a.mean_rating());
    let (items_b, ratings_b, mean_b) = (b.items(), b.ratings(), b.mean_rating());

    let mut sums = CoRatingSums::default();
    let (mut m, mut n) = (0, 0);

    while m < items_a.len() && n < items_b.len() {
        match items_a[m].cmp(&items_b[n]) {
            Ordering::Less => m += 1,
            Ordering::Greater => n += 1,
            Ordering::Equal => {
                sums.add(ratings_a[m] - mean_a, ratings_b[n] - mean_b);
                m += 1;
                n += 1;
            }
        }
    }

    sums
}

pub fn pearson(a: &UserProfile, b: &UserProfile) -> f64 {
    co_rating_sums(a, b).coefficient()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::ProfileBuilder;

    fn profile(ratings: &[(i32, f64)]) -> UserProfile {
        let mut builder = ProfileBuilder::new();
        for &(item, rating) in ratings {
            builder.add(item, rating);
        }
        builder.finalize(0)
    }

    #[test]
    fn test_identical_deviations_give_one() {
        let a = profile(&[(1, 5.0), (2, 3.0)]);
        let b = profile(&[(1, 4.0), (2, 2.0)]);

        let sums = co_rating_sums(&a, &b);

        assert_eq!(sums.xy, 2.0);
        assert_eq!(sums.xx, 2.0);
        assert_eq!(sums.yy, 2.0);
        assert_eq!(sums.common_items, 2);
        assert_eq!(pearson(&a, &b), 1.0);
    }

    #[test]
    fn test_negated_deviations_give_minus_one() {
        let a = profile(&[(1, 5.0), (2, 1.0), (3, 3.0)]);
        let b = profile(&[(1, 1.0), (2, 5.0), (3, 3.0)]);

        assert_eq!(pearson(&a, &b), -1.0);
    }

    #[test]
    fn test_no_overlap_gives_zero() {
        let a = profile(&[(1, 5.0), (3, 1.0)]);
        let b = profile(&[(2, 4.0), (4, 2.0)]);

        assert_eq!(co_rating_sums(&a, &b).common_items, 0);
        assert_eq!(pearson(&a, &b), 0.0);
    }

    #[test]
    fn test_flat_ratings_give_zero() {
        let a = profile(&[(1, 4.0), (2, 4.0)]);
        let b = profile(&[(1, 5.0), (2, 1.0)]);

        assert_eq!(pearson(&a, &b), 0.0);
    }

    #[test]
    fn test_deviations_use_full_profile_mean() {
        // a's mean covers item 3 which b never rated
        let a = profile(&[(1, 4.0), (2, 2.0), (3, 3.0)]);
        let b = profile(&[(1, 2.0), (2, 4.0)]);

        let sums = co_rating_sums(&a, &b);

        assert_eq!(sums.common_items, 2);
        assert_eq!(sums.xy, -2.0);
        assert_eq!(pearson(&a, &b), -1.0);
    }

    #[test]
    fn test_partial_overlap_stays_in_range() {
        let a = profile(&[(1, 5.0), (2, 3.0), (4, 4.0), (7, 1.0)]);
        let b = profile(&[(2, 2.0), (3, 5.0), (4, 5.0), (7, 2.0), (9, 1.0)]);

        let w = pearson(&a, &b);

        assert!((-1.0..=1.0).contains(&w));
        assert_eq!(w, pearson(&b, &a));
    }
}
