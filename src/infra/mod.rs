//! Infrastructure layer - External systems integration
//!
//! - Database connections and schema management
//! - SeaORM entities and repositories

pub mod db;
pub mod repositories;

pub use db::{Database, SharedTransaction};
pub use repositories::{TxUserRepository, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
