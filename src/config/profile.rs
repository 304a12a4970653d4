//! Deployment profiles and their fixed overrides.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::constants::{TESTING_DATABASE_URL, TESTING_JWT_ACCESS_TOKEN_EXPIRES_SECS};
use crate::errors::ConfigError;

/// Named deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    Development,
    Production,
    Testing,
}

impl Profile {
    /// Profile selected by the `default` name.
    pub const DEFAULT: Profile = Profile::Development;

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
            Profile::Testing => "testing",
        }
    }

    /// Fixed values layered over the environment-derived base record.
    pub fn overrides(&self) -> ProfileOverrides {
        match self {
            Profile::Development => ProfileOverrides {
                debug: Some(true),
                database_echo: Some(true),
                ..ProfileOverrides::NONE
            },
            Profile::Production => ProfileOverrides {
                debug: Some(false),
                database_echo: Some(false),
                ..ProfileOverrides::NONE
            },
            Profile::Testing => ProfileOverrides {
                testing: Some(true),
                database_url: Some(TESTING_DATABASE_URL),
                jwt_access_token_expires: Some(Duration::from_secs(
                    TESTING_JWT_ACCESS_TOKEN_EXPIRES_SECS,
                )),
                ..ProfileOverrides::NONE
            },
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    /// Unknown names are rejected; only `default` falls back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Profile::Development),
            "production" => Ok(Profile::Production),
            "testing" => Ok(Profile::Testing),
            "default" => Ok(Profile::DEFAULT),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-profile override set. `None` keeps the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileOverrides {
    pub debug: Option<bool>,
    pub database_echo: Option<bool>,
    pub testing: Option<bool>,
    pub database_url: Option<&'static str>,
    pub jwt_access_token_expires: Option<Duration>,
}

impl ProfileOverrides {
    pub const NONE: ProfileOverrides = ProfileOverrides {
        debug: None,
        database_echo: None,
        testing: None,
        database_url: None,
        jwt_access_token_expires: None,
    };
}
