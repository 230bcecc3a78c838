//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool it is given, holds nothing across calls
//! - Update/delete report whether a row matched instead of failing
//! - Lookups by id return `DbError::NotFound` for a missing row

pub mod comments;
pub mod posts;

pub use comments::CommentRepo;
pub use posts::PostRepo;
