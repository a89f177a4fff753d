use photo_gallery::domain::gallery::Item;

pub fn item(id: &str) -> Item {
    Item {
        id: id.to_string(),
        title: format!("Title {}", id),
        author: "Test Author".to_string(),
        thumbnail_url: format!("https://images.example/{}/small", id),
        full_url: format!("https://images.example/{}/regular", id),
        like_count: 10,
        view_count: 5,
        category: None,
        liked: false,
    }
}

/// Item with every display field left blank, as sparse catalog records arrive
pub fn bare_item(id: &str) -> Item {
    Item {
        id: id.to_string(),
        title: String::new(),
        author: String::new(),
        thumbnail_url: String::new(),
        full_url: String::new(),
        like_count: 0,
        view_count: 0,
        category: None,
        liked: false,
    }
}

/// `count` items with ids `<prefix>1 ..= <prefix><count>`
pub fn page(prefix: &str, count: usize) -> Vec<Item> {
    (1..=count).map(|n| item(&format!("{}{}", prefix, n))).collect()
}

pub fn items(ids: &[&str]) -> Vec<Item> {
    ids.iter().map(|id| item(id)).collect()
}
