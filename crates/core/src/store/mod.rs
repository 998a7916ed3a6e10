//! Document store seam for blog posts.
//!
//! Handlers only ever see a [`SharedStore`]. The backend is chosen from the
//! store address scheme by [`connect`]:
//! - `postgres://` / `postgresql://`: [`postgres::PgPostStore`]
//! - `memory://`: [`memory::MemoryPostStore`]

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::post::{BlogPost, NewPost, PostChanges, PostId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("store connection is closed")]
    Closed,

    #[error("unsupported store address scheme: {0}")]
    UnsupportedAddress(String),
}

/// Connection tuning for pooled backends.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// CRUD over the single collection of blog-post documents.
///
/// The store assigns `id` and `created`; callers never supply them.
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    /// All posts, oldest first.
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError>;

    async fn find(&self, id: PostId) -> Result<Option<BlogPost>, StoreError>;

    async fn insert(&self, post: NewPost) -> Result<BlogPost, StoreError>;

    /// Insert every post or none of them.
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, StoreError>;

    /// Returns `None` when no post has this id.
    async fn update(&self, id: PostId, changes: PostChanges)
        -> Result<Option<BlogPost>, StoreError>;

    /// Returns whether a post was removed.
    async fn delete(&self, id: PostId) -> Result<bool, StoreError>;

    /// Remove every post.
    async fn drop_all(&self) -> Result<(), StoreError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the connection. Later calls fail.
    async fn close(&self);
}

pub type SharedStore = Arc<dyn PostStore>;

/// Open the store named by `address`.
pub async fn connect(address: &str, options: &StoreOptions) -> Result<SharedStore, StoreError> {
    let scheme = address.split_once("://").map(|(scheme, _)| scheme);
    match scheme {
        Some("postgres") | Some("postgresql") => {
            let store = postgres::PgPostStore::connect(address, options).await?;
            tracing::info!("Connected to PostgreSQL post store");
            Ok(Arc::new(store))
        }
        Some("memory") => {
            tracing::info!("Using in-memory post store");
            Ok(Arc::new(memory::MemoryPostStore::new()))
        }
        _ => Err(StoreError::UnsupportedAddress(
            scheme.unwrap_or(address).to_string(),
        )),
    }
}
