//! Application configuration module
//!
//! Resolves deployment profiles against environment variables and holds
//! application-wide constants.

mod constants;
mod env;
mod profile;
mod settings;

pub use constants::*;
pub use env::{split_csv, EnvSource, MapEnv, ProcessEnv};
pub use profile::{Profile, ProfileOverrides};
pub use settings::{Settings, TokenLocation};
