use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::PostId;
use super::validate::{NewPost, PostChanges};

/// Post author as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// `"firstName lastName"`, trimmed so a blank half leaves no stray space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A persisted blog post. Only stores construct these.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: PostId,
    pub author: Option<Author>,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Assemble a post from its store-assigned identity and document body.
    pub fn from_parts(id: PostId, created: DateTime<Utc>, body: NewPost) -> Self {
        Self {
            id,
            author: body.author,
            title: body.title,
            content: body.content,
            created,
        }
    }

    /// Overwrite the fields present in `changes`. `id` and `created` never move.
    pub fn apply(&mut self, changes: &PostChanges) {
        if let Some(author) = &changes.author {
            self.author = Some(author.clone());
        }
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(content) = &changes.content {
            self.content = content.clone();
        }
    }

    pub fn to_client_view(&self) -> PostView {
        PostView::from(self)
    }
}

/// Client-facing representation of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    /// Author display name, empty when the post has no author.
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl From<&BlogPost> for PostView {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            author: post
                .author
                .as_ref()
                .map(Author::full_name)
                .unwrap_or_default(),
            title: post.title.clone(),
            content: post.content.clone(),
            created: post.created,
        }
    }
}
