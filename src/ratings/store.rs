use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::profile::{ProfileBuilder, UserProfile};
use crate::domain::{RatingRecord, UserId};

/// Bijection between training user ids and dense positions `0..N-1`.
///
/// Positions follow ascending user id, so they are stable across runs on
/// the same input. Weight matrix addressing only ever uses positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserIndex {
    user_ids: Vec<UserId>,
}

impl UserIndex {
    pub fn position(&self, user_id: UserId) -> Option<usize> {
        self.user_ids.binary_search(&user_id).ok()
    }

    pub fn user_id(&self, position: usize) -> Option<UserId> {
        self.user_ids.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.user_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoreSummary {
    pub users: usize,
    pub ratings: usize,
    pub distinct_items: usize,
}

/// Finalized user profiles, ordered by ascending user id.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    profiles: Vec<UserProfile>,
}

impl RatingStore {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RatingRecord>,
    {
        let profiles = group_by_user(records)
            .into_iter()
            .map(|(user_id, builder)| builder.finalize(user_id))
            .collect();

        Self { profiles }
    }

    pub fn profiles(&self) -> &[UserProfile] {
        &self.profiles
    }

    pub fn get(&self, user_id: UserId) -> Option<&UserProfile> {
        self.profiles
            .binary_search_by_key(&user_id, UserProfile::user_id)
            .ok()
            .map(|idx| &self.profiles[idx])
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn summary(&self) -> StoreSummary {
        let distinct_items: HashSet<_> = self
            .profiles
            .iter()
            .flat_map(|p| p.items().iter().copied())
            .collect();

        StoreSummary {
            users: self.profiles.len(),
            ratings: self.profiles.iter().map(UserProfile::len).sum(),
            distinct_items: distinct_items.len(),
        }
    }
}

/// Training population: profiles at their dense positions plus the index.
#[derive(Debug, Clone, Default)]
pub struct TrainingData {
    store: RatingStore,
    index: UserIndex,
}

impl TrainingData {
    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    /// Profiles ordered by dense position
    pub fn profiles(&self) -> &[UserProfile] {
        self.store.profiles()
    }

    pub fn index(&self) -> &UserIndex {
        &self.index
    }

    pub fn profile_at(&self, position: usize) -> Option<&UserProfile> {
        self.store.profiles().get(position)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// A testing profile together with its training position, `None` when the
/// user never appeared in training.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub profile: UserProfile,
    pub position: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct TestingData {
    users: Vec<TestUser>,
}

impl TestingData {
    pub fn users(&self) -> &[TestUser] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn unknown_users(&self) -> usize {
        self.users.iter().filter(|u| u.position.is_none()).count()
    }

    pub fn rating_count(&self) -> usize {
        self.users.iter().map(|u| u.profile.len()).sum()
    }
}

/// Builds the training profiles and assigns dense positions in the same
/// ascending-user-id pass.
pub fn load_training<I>(records: I) -> TrainingData
where
    I: IntoIterator<Item = RatingRecord>,
{
    let groups = group_by_user(records);
    let mut profiles = Vec::with_capacity(groups.len());
    let mut user_ids = Vec::with_capacity(groups.len());

    for (user_id, builder) in groups {
        user_ids.push(user_id);
        profiles.push(builder.finalize(user_id));
    }

    TrainingData {
        store: RatingStore { profiles },
        index: UserIndex { user_ids },
    }
}

/// Builds testing profiles and resolves each against the training index.
/// Unknown users are never added to the index.
pub fn load_testing<I>(records: I, index: &UserIndex) -> TestingData
where
    I: IntoIterator<Item = RatingRecord>,
{
    let users = RatingStore::from_records(records)
        .profiles
        .into_iter()
        .map(|profile| TestUser {
            position: index.position(profile.user_id()),
            profile,
        })
        .collect();

    TestingData { users }
}

fn group_by_user<I>(records: I) -> BTreeMap<UserId, ProfileBuilder>
where
    I: IntoIterator<Item = RatingRecord>,
{
    let mut groups: BTreeMap<UserId, ProfileBuilder> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.user_id)
            .or_default()
            .add(record.item_id, record.rating);
    }
    groups
}
