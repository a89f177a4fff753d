pub mod ledger;

pub use ledger::LikeLedger;

use crate::domain::auth::Identity;
use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Storage key of the like set belonging to `identity`
pub fn like_key(identity: &Identity) -> String {
    format!("likes_{}", identity.as_str())
}

/// Durable set of item identifiers one identity has liked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeSet(BTreeSet<String>);

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.0.contains(item_id)
    }

    pub fn insert(&mut self, item_id: impl Into<String>) -> bool {
        self.0.insert(item_id.into())
    }

    pub fn remove(&mut self, item_id: &str) -> bool {
        self.0.remove(item_id)
    }

    /// Remove `item_id` if present, add it otherwise.
    /// Returns whether the item is liked afterwards.
    pub fn toggle(&mut self, item_id: &str) -> bool {
        if self.remove(item_id) {
            false
        } else {
            self.insert(item_id)
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LikeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Keyed persistence of like sets.
///
/// Implementations must survive process restarts. A missing key reads as the
/// empty set; writes replace the whole set (last write wins).
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<LikeSet>;

    async fn set(&self, key: &str, likes: &LikeSet) -> AppResult<()>;
}
