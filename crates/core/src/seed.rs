//! Fake post data and per-test seed/teardown helpers.

use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use crate::post::{Author, BlogPost, NewPost};
use crate::store::{PostStore, StoreError};

pub fn fake_author() -> Author {
    Author::new(FirstName().fake::<String>(), LastName().fake::<String>())
}

/// One random, valid post.
pub fn fake_post() -> NewPost {
    NewPost {
        author: Some(fake_author()),
        title: Sentence(3..8).fake(),
        content: Paragraph(3..7).fake(),
    }
}

/// Insert `count` random posts.
pub async fn seed_posts(store: &dyn PostStore, count: usize) -> Result<Vec<BlogPost>, StoreError> {
    tracing::info!(count, "Seeding blog post data");
    store
        .insert_many((0..count).map(|_| fake_post()).collect())
        .await
}

/// Remove every post.
pub async fn tear_down(store: &dyn PostStore) -> Result<(), StoreError> {
    tracing::warn!("Deleting all blog posts");
    store.drop_all().await
}
