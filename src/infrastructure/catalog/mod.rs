pub mod unsplash;

pub use unsplash::UnsplashCatalog;
