use super::{Category, Item};
use rand::seq::SliceRandom;
use rand::Rng;

/// Hook applied to every item of a page after it arrives and before it is
/// inserted into the gallery. Decorators must leave `id` and `liked` alone.
pub trait ItemDecorator: Send + Sync {
    fn decorate(&self, item: &mut Item);
}

/// Presentation defaults for catalog records that arrive incomplete:
/// a fallback title and author, a random category, and synthetic counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayDefaults;

const TITLE_ID_PREFIX: usize = 6;
const UNKNOWN_AUTHOR: &str = "Unknown artist";
const MAX_SYNTHETIC_LIKES: u32 = 500;
const MAX_SYNTHETIC_VIEWS: u32 = 50;

impl ItemDecorator for DisplayDefaults {
    fn decorate(&self, item: &mut Item) {
        let mut rng = rand::thread_rng();

        if item.category.is_none() {
            item.category = Category::ALL.choose(&mut rng).copied();
        }

        if item.title.trim().is_empty() {
            let prefix: String = item.id.chars().take(TITLE_ID_PREFIX).collect();
            item.title = format!("Photo {}", prefix);
        }

        if item.author.trim().is_empty() {
            item.author = UNKNOWN_AUTHOR.to_string();
        }

        if item.like_count == 0 {
            item.like_count = rng.gen_range(0..MAX_SYNTHETIC_LIKES);
        }

        if item.view_count == 0 {
            item.view_count = rng.gen_range(1..=MAX_SYNTHETIC_VIEWS);
        }
    }
}
