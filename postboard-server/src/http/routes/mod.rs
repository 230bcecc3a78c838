//! Route handlers organized by resource

pub mod comments;
pub mod health;
pub mod posts;
