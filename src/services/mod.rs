// Service exports
pub mod appwrite;
pub mod cache;
pub mod postgres;

pub use appwrite::{AppwriteClient, AppwriteError};
pub use cache::{CacheError, CacheManager, Feed, FeedKey, FeedTtls};
pub use postgres::{PostgresClient, PostgresError};
