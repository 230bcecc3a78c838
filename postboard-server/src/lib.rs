//! postboard-server: post and comment store with a thin HTTP layer
//!
//! The data-access core lives in [`db`]: schema bootstrap, the post
//! repository (paging, view counting, nested comment reads) and the comment
//! repository. [`http`] maps those operations onto JSON endpoints.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, ensure_schema, CommentRepo, DbError, PostRepo, StoreConfig};
pub use http::{run_server, ServerConfig};
