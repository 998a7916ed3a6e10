use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

use super::{PostStore, StoreError, StoreOptions};
use crate::post::{BlogPost, NewPost, PostChanges, PostId};

const COLUMNS: &str = "id, document, created_at";

const INSERT: &str = "INSERT INTO blog_posts (id, document, created_at) VALUES ($1, $2, $3) \
     RETURNING id, document, created_at";

/// Posts stored as JSONB documents in the `blog_posts` table.
#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    /// Open a pool and apply pending migrations.
    pub async fn connect(url: &str, options: &StoreOptions) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .min_connections(options.min_connections)
            .connect(url)
            .await?;

        sqlx::migrate!("../../migrations").run(&pool).await?;
        tracing::debug!("Post store migrations applied");

        Ok(Self { pool })
    }
}

fn decode_row(row: &PgRow) -> Result<BlogPost, StoreError> {
    let id: Uuid = row.try_get("id")?;
    let Json(body): Json<NewPost> = row.try_get("document")?;
    let created: DateTime<Utc> = row.try_get("created_at")?;
    Ok(BlogPost::from_parts(PostId::from(id), created, body))
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM blog_posts ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(decode_row).collect()
    }

    async fn find(&self, id: PostId) -> Result<Option<BlogPost>, StoreError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(decode_row).transpose()
    }

    async fn insert(&self, post: NewPost) -> Result<BlogPost, StoreError> {
        let row = sqlx::query(INSERT)
            .bind(PostId::generate().as_uuid())
            .bind(Json(post))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        decode_row(&row)
    }

    /// `now()` is frozen for a whole transaction, so each row binds its own
    /// timestamp to keep insertion order visible in `list`.
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(posts.len());
        for post in posts {
            let row = sqlx::query(INSERT)
                .bind(PostId::generate().as_uuid())
                .bind(Json(post))
                .bind(Utc::now())
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(decode_row(&row)?);
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostChanges,
    ) -> Result<Option<BlogPost>, StoreError> {
        // `||` replaces top-level keys only, so a new author overwrites both names.
        let row = sqlx::query(&format!(
            "UPDATE blog_posts SET document = document || $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(Json(changes))
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(decode_row).transpose()
    }

    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        sqlx::query("TRUNCATE blog_posts").execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
