//! Domain layer - Core business entities and value objects
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod media;
pub mod password;
pub mod user;

pub use media::MediaKind;
pub use password::Password;
pub use user::{NewUser, User, UserResponse, UserRole};
