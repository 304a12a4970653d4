//! Ajali - incident reporting backend.
//!
//! This crate holds the configuration resolver, the data model and HTTP API
//! that the reporting features build on, and the harness integration tests
//! use to bootstrap them.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Profile-based settings resolved from the environment
//! - **domain**: Core entities and value objects
//! - **services**: Authentication use cases
//! - **infra**: Database connection, schema and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **testing**: Session, client and seeded-user fixtures for tests (feature `test-utils`)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server with the development profile
//! cargo run -- --profile development serve
//!
//! # Recreate the tables
//! cargo run -- schema reset
//!
//! # Show the resolved configuration
//! cargo run -- --profile production config
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::{Profile, Settings};
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult, ConfigError};
