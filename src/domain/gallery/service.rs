use super::error::GalleryServiceError;
use super::optimistic::apply_with_rollback;
use super::{CatalogSource, GallerySnapshot, GalleryState, Item, ItemDecorator};
use crate::domain::auth::{Identity, IdentityProvider};
use crate::domain::likes::{LikeLedger, LikeSet, LikeStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Message recorded in the gallery state when a page cannot be fetched
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load photos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A fetch was already running or the catalog is exhausted
    Skipped,
    /// A page landed; `added` counts the items actually inserted
    Loaded { added: usize },
    /// The catalog returned an empty page
    Exhausted,
    /// The catalog call failed; the cursor was not advanced
    Failed(String),
    /// The gallery was reset while the request was in flight
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No signed-in user
    Skipped,
    Liked,
    Unliked,
}

pub struct GalleryController {
    catalog: Arc<dyn CatalogSource>,
    identity: Arc<dyn IdentityProvider>,
    likes: LikeLedger,
    decorators: Vec<Arc<dyn ItemDecorator>>,
    page_size: u32,
    state: RwLock<GalleryState>,
}

impl GalleryController {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        identity: Arc<dyn IdentityProvider>,
        like_store: Arc<dyn LikeStore>,
    ) -> Self {
        Self {
            catalog,
            identity,
            likes: LikeLedger::new(like_store),
            decorators: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            state: RwLock::new(GalleryState::new()),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_decorator(mut self, decorator: Arc<dyn ItemDecorator>) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn items(&self) -> Vec<Item> {
        self.state.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn has_more(&self) -> bool {
        self.state.read().has_more
    }

    pub fn next_page(&self) -> u32 {
        self.state.read().next_page
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        self.state.read().snapshot()
    }

    /// Reset the gallery every time the published identity changes.
    ///
    /// The task ends when the sending side is dropped.
    pub fn reset_on_identity_change(
        self: &Arc<Self>,
        mut identity_rx: watch::Receiver<Option<Identity>>,
    ) -> JoinHandle<()> {
        let gallery = Arc::clone(self);
        tokio::spawn(async move {
            while identity_rx.changed().await.is_ok() {
                let identity = identity_rx.borrow_and_update().clone();
                tracing::info!(
                    identity = ?identity.as_ref().map(Identity::as_str),
                    "Identity changed, resetting gallery"
                );
                gallery.reset();
            }
        })
    }
}

#[async_trait]
pub trait GalleryControllerApi: Send + Sync {
    /// Load the next page of the catalog.
    ///
    /// No-op while a fetch is running or after the catalog is exhausted.
    async fn fetch_next_page(&self) -> FetchOutcome;

    /// Optimistically flip the like flag of `item_id` and persist it,
    /// rolling the flag back if the write fails.
    async fn toggle_like(&self, item_id: &str) -> Result<ToggleOutcome, GalleryServiceError>;

    /// Re-project the current identity's like set onto every item
    async fn load_likes_for_identity(&self);

    /// Drop all items and return to the first page
    fn reset(&self);
}

#[async_trait]
impl GalleryControllerApi for GalleryController {
    async fn fetch_next_page(&self) -> FetchOutcome {
        let (page, epoch) = {
            let mut state = self.state.write();
            if state.loading || !state.has_more {
                return FetchOutcome::Skipped;
            }
            state.loading = true;
            state.error = None;
            (state.next_page, state.epoch)
        };
        let _loading = LoadingGuard {
            state: &self.state,
            epoch,
        };

        tracing::debug!(page = page, per_page = self.page_size, "Fetching gallery page");

        let mut items = match self.catalog.fetch_page(page, self.page_size).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, page = page, "Error fetching photos");
                let mut state = self.state.write();
                if state.epoch != epoch {
                    return FetchOutcome::Discarded;
                }
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                return FetchOutcome::Failed(e.to_string());
            }
        };

        if items.is_empty() {
            let mut state = self.state.write();
            if state.epoch != epoch {
                return FetchOutcome::Discarded;
            }
            tracing::info!(page = page, "Catalog exhausted");
            state.has_more = false;
            return FetchOutcome::Exhausted;
        }

        let likes = self.current_likes().await.unwrap_or_default();
        for item in &mut items {
            for decorator in &self.decorators {
                decorator.decorate(item);
            }
            item.liked = likes.contains(&item.id);
        }

        let mut state = self.state.write();
        if state.epoch != epoch {
            tracing::debug!(page = page, "Dropping page fetched before reset");
            return FetchOutcome::Discarded;
        }
        let received = items.len();
        let added = if page == 1 {
            state.replace_items(items)
        } else {
            state.append_items(items)
        };
        state.next_page += 1;

        tracing::debug!(
            page = page,
            received = received,
            added = added,
            total = state.items.len(),
            "Gallery page loaded"
        );

        FetchOutcome::Loaded { added }
    }

    async fn toggle_like(&self, item_id: &str) -> Result<ToggleOutcome, GalleryServiceError> {
        let Some(identity) = self.identity.current_identity() else {
            tracing::debug!(item_id = item_id, "Ignoring like toggle without identity");
            return Ok(ToggleOutcome::Skipped);
        };
        let epoch = self.state.read().epoch;

        let liked = apply_with_rollback(
            || {
                self.state.write().flip_liked(item_id);
            },
            || self.likes.toggle(&identity, item_id),
            || {
                let mut state = self.state.write();
                if state.epoch == epoch {
                    state.flip_liked(item_id);
                }
            },
        )
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                identity = %identity,
                item_id = item_id,
                "Error toggling like, reverted"
            );
            GalleryServiceError::from(e)
        })?;

        // A reset or reload may have projected the store before this write landed
        if self.identity.current_identity().as_ref() == Some(&identity) {
            self.state.write().set_liked(item_id, liked);
        }

        Ok(if liked {
            ToggleOutcome::Liked
        } else {
            ToggleOutcome::Unliked
        })
    }

    async fn load_likes_for_identity(&self) {
        let likes = match self.current_likes().await {
            Some(likes) => likes,
            None if self.identity.current_identity().is_none() => LikeSet::new(),
            None => return,
        };

        let mut state = self.state.write();
        for item in &mut state.items {
            item.liked = likes.contains(&item.id);
        }
        tracing::debug!(liked = likes.len(), items = state.items.len(), "Likes projected");
    }

    fn reset(&self) {
        self.state.write().reset();
        tracing::debug!("Gallery reset");
    }
}

impl GalleryController {
    /// Like set of the current identity. `None` when there is no identity or
    /// the store cannot be read; both mean "nothing is known to be liked".
    async fn current_likes(&self) -> Option<LikeSet> {
        let identity = self.identity.current_identity()?;
        match self.likes.load(&identity).await {
            Ok(likes) => Some(likes),
            Err(e) => {
                tracing::warn!(error = %e, identity = %identity, "Error loading user likes");
                None
            }
        }
    }
}

/// Clears `loading` when a fetch ends, however it ends. A reset in the
/// meantime owns the flag, so a stale guard leaves it alone.
struct LoadingGuard<'a> {
    state: &'a RwLock<GalleryState>,
    epoch: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.write();
        if state.epoch == self.epoch {
            state.loading = false;
        }
    }
}
