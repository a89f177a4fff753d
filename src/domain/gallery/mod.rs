pub mod decoration;
pub mod error;
pub mod model;
pub mod optimistic;
pub mod service;

pub use decoration::{DisplayDefaults, ItemDecorator};
pub use error::GalleryServiceError;
pub use model::{Category, GallerySnapshot, GalleryState, Item};
pub use service::{FetchOutcome, GalleryController, GalleryControllerApi, ToggleOutcome};

use crate::error::AppResult;
use async_trait::async_trait;

/// Remote paged provider of catalog items.
///
/// Pages are numbered from 1. An empty successful page means the catalog is
/// exhausted.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, page: u32, per_page: u32) -> AppResult<Vec<Item>>;
}
