use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Display category assigned to catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Animation,
    Branding,
    Illustration,
    Mobile,
    Print,
    #[serde(rename = "Product Design")]
    ProductDesign,
    Typography,
    #[serde(rename = "Web Design")]
    WebDesign,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Animation,
        Category::Branding,
        Category::Illustration,
        Category::Mobile,
        Category::Print,
        Category::ProductDesign,
        Category::Typography,
        Category::WebDesign,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Animation => "Animation",
            Category::Branding => "Branding",
            Category::Illustration => "Illustration",
            Category::Mobile => "Mobile",
            Category::Print => "Print",
            Category::ProductDesign => "Product Design",
            Category::Typography => "Typography",
            Category::WebDesign => "Web Design",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry as shown in the gallery.
///
/// Everything except `liked` comes from the remote catalog (or a decorator);
/// `liked` is a local projection of the current identity's like set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub author: String,
    pub thumbnail_url: String,
    pub full_url: String,
    pub like_count: u32,
    pub view_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub liked: bool,
}

/// State owned by the gallery controller
#[derive(Debug, Clone)]
pub struct GalleryState {
    pub items: Vec<Item>,
    pub loading: bool,
    pub error: Option<String>,
    pub next_page: u32,
    pub has_more: bool,
    /// Bumped by every reset so in-flight work can tell it is stale
    pub epoch: u64,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::with_epoch(0)
    }

    fn with_epoch(epoch: u64) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            next_page: 1,
            has_more: true,
            epoch,
        }
    }

    /// Back to initial values, in a new epoch
    pub fn reset(&mut self) {
        *self = Self::with_epoch(self.epoch.wrapping_add(1));
    }

    /// Replace all items with `page`, dropping repeated ids
    pub fn replace_items(&mut self, page: Vec<Item>) -> usize {
        self.items.clear();
        self.append_items(page)
    }

    /// Append `page` in order, skipping ids already present.
    /// Returns how many items were inserted.
    pub fn append_items(&mut self, page: Vec<Item>) -> usize {
        let mut seen: HashSet<String> = self.items.iter().map(|item| item.id.clone()).collect();
        let before = self.items.len();
        for item in page {
            if seen.insert(item.id.clone()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    /// Flip the liked flag of `item_id`; returns the new value when the item exists
    pub fn flip_liked(&mut self, item_id: &str) -> Option<bool> {
        self.items
            .iter_mut()
            .find(|item| item.id == item_id)
            .map(|item| {
                item.liked = !item.liked;
                item.liked
            })
    }

    /// Set the liked flag of `item_id`; returns false when the item is not shown
    pub fn set_liked(&mut self, item_id: &str, liked: bool) -> bool {
        match self.items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.liked = liked;
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
            next_page: self.next_page,
            has_more: self.has_more,
        }
    }
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of the observable gallery state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GallerySnapshot {
    pub items: Vec<Item>,
    pub loading: bool,
    pub error: Option<String>,
    pub next_page: u32,
    pub has_more: bool,
}
