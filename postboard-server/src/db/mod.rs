//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool handed to every repository, no global handle
//! - Nested reads are one statement (JOIN + JSON aggregate), no N+1 queries
//! - Read-modify-read is a single `UPDATE ... RETURNING` statement
//! - Declared foreign keys are not enforced, deletes never cascade

pub mod error;
pub mod pool;
pub mod repos;
pub mod schema;

pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options, StoreConfig};
pub use repos::*;
pub use schema::ensure_schema;
