//! Application services layer.
//!
//! Services depend on repository traits so handlers and tests can swap
//! the storage behind them.

mod auth_service;

pub use auth_service::{AuthService, Authenticator, Claims, Registration, TokenResponse};
