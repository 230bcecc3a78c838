//! Domain records shared by the repositories and the HTTP layer
//!
//! Field names follow the persisted column layout (`createdAt`, `postId`)
//! on the wire, snake_case in Rust.

pub mod comment;
pub mod pagination;
pub mod post;

pub use comment::Comment;
pub use pagination::{Paginated, Pagination, PaginationParams};
pub use post::{NewPost, Post, PostChanges, PostSummary, PostWithComments};
