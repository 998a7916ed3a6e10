//! Request payloads and their validation into store inputs.
//!
//! Payload fields are all optional at the serde level so that absence is
//! reported as a [`ValidationError`] naming the field, not a decoder error.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::PostId;
use super::model::Author;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing `{0}` in request body")]
    MissingField(&'static str),
    #[error("`{0}` cannot be empty")]
    EmptyField(&'static str),
    #[error("malformed post id `{0}`")]
    MalformedId(String),
    #[error("request path id ({path}) and request body id ({body}) must match")]
    IdMismatch { path: String, body: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthorPayload {
    fn validate(self) -> Result<Author, ValidationError> {
        let first_name = self
            .first_name
            .ok_or(ValidationError::MissingField("author.firstName"))?;
        let last_name = self
            .last_name
            .ok_or(ValidationError::MissingField("author.lastName"))?;
        Ok(Author {
            first_name,
            last_name,
        })
    }
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostPayload {
    pub author: Option<AuthorPayload>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Body of `PUT /posts/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostPayload {
    pub id: Option<String>,
    pub author: Option<AuthorPayload>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A validated post awaiting insertion. Also the stored document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    pub title: String,
    pub content: String,
}

/// Fields to overwrite on an existing post. Serializes to a document patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

fn non_empty_title(title: String) -> Result<String, ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyField("title"));
    }
    Ok(title)
}

impl CreatePostPayload {
    pub fn validate(self) -> Result<NewPost, ValidationError> {
        let title = self.title.ok_or(ValidationError::MissingField("title"))?;
        let content = self
            .content
            .ok_or(ValidationError::MissingField("content"))?;
        Ok(NewPost {
            author: self.author.map(AuthorPayload::validate).transpose()?,
            title: non_empty_title(title)?,
            content,
        })
    }
}

impl UpdatePostPayload {
    /// Validate against the id taken from the request path.
    pub fn validate(self, path_id: &str) -> Result<(PostId, PostChanges), ValidationError> {
        let id = PostId::parse(path_id)?;
        if let Some(body_id) = self.id {
            if PostId::parse(&body_id).ok() != Some(id) {
                return Err(ValidationError::IdMismatch {
                    path: path_id.to_string(),
                    body: body_id,
                });
            }
        }
        let changes = PostChanges {
            author: self.author.map(AuthorPayload::validate).transpose()?,
            title: self.title.map(non_empty_title).transpose()?,
            content: self.content,
        };
        Ok((id, changes))
    }
}
