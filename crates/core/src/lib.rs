pub mod post;
pub mod seed;
pub mod store;
