use super::{like_key, LikeSet, LikeStore};
use crate::domain::auth::Identity;
use crate::error::AppResult;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-modify-write access to like sets, serialized per identity.
///
/// Two toggles for the same identity never interleave their read and write,
/// so concurrent toggles on different items cannot lose an update.
pub struct LikeLedger {
    store: Arc<dyn LikeStore>,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl LikeLedger {
    pub fn new(store: Arc<dyn LikeStore>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn load(&self, identity: &Identity) -> AppResult<LikeSet> {
        self.store.get(&like_key(identity)).await
    }

    /// Flip `item_id` in the like set of `identity` and persist the result.
    /// Returns whether the item is liked after the write.
    pub async fn toggle(&self, identity: &Identity, item_id: &str) -> AppResult<bool> {
        let key = like_key(identity);
        let lock = self.lock_for(&key);
        let result = {
            let _serialized = lock.lock().await;
            self.write_toggled(&key, item_id).await
        };
        self.release(&key, lock);

        let (liked, total) = result?;
        tracing::debug!(
            identity = %identity,
            item_id = item_id,
            liked = liked,
            total = total,
            "Like set persisted"
        );

        Ok(liked)
    }

    async fn write_toggled(&self, key: &str, item_id: &str) -> AppResult<(bool, usize)> {
        let mut likes = self.store.get(key).await?;
        let liked = likes.toggle(item_id);
        self.store.set(key, &likes).await?;
        Ok((liked, likes.len()))
    }

    fn lock_for(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.locks
            .lock()
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    /// Drop the per-key lock once no other toggle holds or awaits it
    fn release(&self, key: &str, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.locks.lock();
        let idle = locks
            .get(key)
            .is_some_and(|entry| Arc::ptr_eq(entry, &lock) && Arc::strong_count(&lock) == 2);
        if idle {
            locks.remove(key);
        }
    }
}
