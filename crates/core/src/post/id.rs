//! Blog post identifiers.
//!
//! Ids are random UUIDs assigned by the store and exchanged with clients in
//! their hyphenated string form, e.g. `5b3c1f0e-8a8d-4d6f-9a55-2f6a0c1e9b77`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Allocate a fresh id. Only stores call this.
    pub fn generate() -> Self {
        PostId(Uuid::new_v4())
    }

    /// Parse a client-supplied id.
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(id.trim())
            .map(PostId)
            .map_err(|_| ValidationError::MalformedId(id.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        PostId(id)
    }
}

impl FromStr for PostId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostId::parse(s)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
