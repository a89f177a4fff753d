use crate::domain::gallery::{CatalogSource, Item};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UnsplashPhoto {
    pub id: String,
    pub alt_description: Option<String>,
    pub description: Option<String>,
    pub urls: UnsplashUrls,
    pub user: Option<UnsplashUser>,
    #[serde(default)]
    pub likes: u32,
    pub views: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashUrls {
    pub regular: String,
    pub small: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashUser {
    pub name: Option<String>,
}

impl From<UnsplashPhoto> for Item {
    fn from(photo: UnsplashPhoto) -> Self {
        Self {
            id: photo.id,
            title: photo
                .alt_description
                .or(photo.description)
                .unwrap_or_default(),
            author: photo.user.and_then(|user| user.name).unwrap_or_default(),
            thumbnail_url: photo.urls.small,
            full_url: photo.urls.regular,
            like_count: photo.likes,
            view_count: photo.views.unwrap_or(0),
            category: None,
            liked: false,
        }
    }
}

/// Catalog source backed by the Unsplash `GET /photos` listing
pub struct UnsplashCatalog {
    base_url: String,
    access_key: String,
    order_by: String,
    http_client: reqwest::Client,
}

impl UnsplashCatalog {
    pub fn new(base_url: String, access_key: String, order_by: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key,
            order_by,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for UnsplashCatalog {
    async fn fetch_page(&self, page: u32, per_page: u32) -> AppResult<Vec<Item>> {
        let response = self
            .http_client
            .get(format!("{}/photos", self.base_url))
            .query(&[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("order_by", self.order_by.clone()),
            ])
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Unsplash request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalService(format!(
                "Unsplash returned {}: {}",
                status, error_text
            )));
        }

        let photos: Vec<UnsplashPhoto> = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse Unsplash photos: {}", e))
        })?;

        tracing::debug!(
            page = page,
            per_page = per_page,
            count = photos.len(),
            "Unsplash page received"
        );

        Ok(photos.into_iter().map(Item::from).collect())
    }
}
