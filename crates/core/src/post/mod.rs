pub mod id;
pub mod model;
pub mod validate;

pub use id::PostId;
pub use model::{Author, BlogPost, PostView};
pub use validate::{CreatePostPayload, NewPost, PostChanges, UpdatePostPayload, ValidationError};
