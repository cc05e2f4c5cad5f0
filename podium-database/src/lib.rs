pub mod cache;
pub mod database;
pub mod error;
pub mod model;
pub mod ranking;
pub mod store;

pub use cache::CacheService;
pub use database::{Database, MIGRATOR};
pub use error::PodiumError;
pub use store::PlayerStore;
