use std::collections::BTreeMap;

use crate::domain::{ItemId, RatingValue, UserId};

/// Finalized ratings of one user.
///
/// `items` is strictly increasing and index-aligned with `ratings`, which
/// allows merge-joins between two profiles and binary-search lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    user_id: UserId,
    items: Vec<ItemId>,
    ratings: Vec<RatingValue>,
    mean_rating: f64,
}

impl UserProfile {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn ratings(&self) -> &[RatingValue] {
        &self.ratings
    }

    pub fn mean_rating(&self) -> f64 {
        self.mean_rating
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rating given to `item_id`, if any
    pub fn rating_for(&self, item_id: ItemId) -> Option<RatingValue> {
        self.items
            .binary_search(&item_id)
            .ok()
            .map(|idx| self.ratings[idx])
    }

    pub fn has_rated(&self, item_id: ItemId) -> bool {
        self.items.binary_search(&item_id).is_ok()
    }
}

/// Collects a user's ratings in arbitrary order until `finalize` is called.
#[derive(Debug, Default)]
pub struct ProfileBuilder {
    ratings: BTreeMap<ItemId, RatingValue>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later ratings for the same item overwrite earlier ones
    pub fn add(&mut self, item_id: ItemId, rating: RatingValue) {
        self.ratings.insert(item_id, rating);
    }

    pub fn finalize(self, user_id: UserId) -> UserProfile {
        let (items, ratings): (Vec<ItemId>, Vec<RatingValue>) = self.ratings.into_iter().unzip();
        let mean_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        UserProfile {
            user_id,
            items,
            ratings,
            mean_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(user_id: UserId, ratings: &[(ItemId, RatingValue)]) -> UserProfile {
        let mut builder = ProfileBuilder::new();
        for &(item, rating) in ratings {
            builder.add(item, rating);
        }
        builder.finalize(user_id)
    }

    #[test]
    fn test_finalize_sorts_items_and_aligns_ratings() {
        let profile = build(1, &[(30, 1.0), (10, 5.0), (20, 3.0)]);

        assert_eq!(profile.items(), &[10, 20, 30]);
        assert_eq!(profile.ratings(), &[5.0, 3.0, 1.0]);
        assert_eq!(profile.mean_rating(), 3.0);
    }

    #[test]
    fn test_duplicate_item_last_write_wins() {
        let profile = build(1, &[(10, 1.0), (20, 3.0), (10, 5.0)]);

        assert_eq!(profile.len(), 2);
        assert_eq!(profile.rating_for(10), Some(5.0));
        assert_eq!(profile.mean_rating(), 4.0);
    }

    #[test]
    fn test_rating_for_missing_item() {
        let profile = build(1, &[(10, 4.0)]);

        assert_eq!(profile.rating_for(11), None);
        assert!(!profile.has_rated(9));
        assert!(profile.has_rated(10));
    }
}
