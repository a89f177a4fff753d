pub mod credentials_repository;
pub mod like_repository;
pub mod session_repository;

pub use credentials_repository::HardcodedCredentialsRepository;
pub use like_repository::LikeRepository;
pub use session_repository::SessionRepository;
