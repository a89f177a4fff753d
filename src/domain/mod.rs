pub mod auth;
pub mod gallery;
pub mod likes;
