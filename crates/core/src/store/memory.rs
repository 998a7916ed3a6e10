use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{PostStore, StoreError};
use crate::post::{BlogPost, NewPost, PostChanges, PostId};

/// Process-local post store. Posts live in insertion order.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    posts: Vec<BlogPost>,
    closed: bool,
}

impl Inner {
    fn open(&self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    fn store(&mut self, post: NewPost) -> BlogPost {
        let post = BlogPost::from_parts(PostId::generate(), Utc::now(), post);
        self.posts.push(post.clone());
        post
    }
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let inner = self.inner.read().await;
        inner.open()?;
        Ok(inner.posts.clone())
    }

    async fn find(&self, id: PostId) -> Result<Option<BlogPost>, StoreError> {
        let inner = self.inner.read().await;
        inner.open()?;
        Ok(inner.posts.iter().find(|post| post.id == id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<BlogPost, StoreError> {
        let mut inner = self.inner.write().await;
        inner.open()?;
        Ok(inner.store(post))
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, StoreError> {
        let mut inner = self.inner.write().await;
        inner.open()?;
        Ok(posts.into_iter().map(|post| inner.store(post)).collect())
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostChanges,
    ) -> Result<Option<BlogPost>, StoreError> {
        let mut inner = self.inner.write().await;
        inner.open()?;
        Ok(inner
            .posts
            .iter_mut()
            .find(|post| post.id == id)
            .map(|post| {
                post.apply(&changes);
                post.clone()
            }))
    }

    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        inner.open()?;
        let before = inner.posts.len();
        inner.posts.retain(|post| post.id != id);
        Ok(inner.posts.len() < before)
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.open()?;
        inner.posts.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.read().await.open()
    }

    async fn close(&self) {
        let mut inner = self.inner.write().await;
        inner.closed = true;
        inner.posts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Author;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            author: Some(Author::new("Jane", "Doe")),
            title: title.to_string(),
            content: format!("{title} body"),
        }
    }

    #[tokio::test]
    async fn insert_assigns_identity() {
        let store = MemoryPostStore::new();
        let a = store.insert(new_post("a")).await.unwrap();
        let b = store.insert(new_post("b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "a");
        assert_eq!(store.find(b.id).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryPostStore::new();
        store
            .insert_many(vec![new_post("one"), new_post("two"), new_post("three")])
            .await
            .unwrap();
        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|post| post.title)
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let store = MemoryPostStore::new();
        let post = store.insert(new_post("old")).await.unwrap();
        let updated = store
            .update(
                post.id,
                PostChanges {
                    title: Some("new".to_string()),
                    ..PostChanges::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.author, post.author);
        assert_eq!(updated.created, post.created);
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let store = MemoryPostStore::new();
        let result = store
            .update(PostId::generate(), PostChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_reports_removal() {
        let store = MemoryPostStore::new();
        let post = store.insert(new_post("gone")).await.unwrap();
        assert!(store.delete(post.id).await.unwrap());
        assert!(!store.delete(post.id).await.unwrap());
        assert!(store.find(post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn closed_store_fails() {
        let store = MemoryPostStore::new();
        store.insert(new_post("x")).await.unwrap();
        store.close().await;
        assert!(matches!(store.list().await, Err(StoreError::Closed)));
        assert!(matches!(store.ping().await, Err(StoreError::Closed)));
    }
}
