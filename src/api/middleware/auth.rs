//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// JWT authentication middleware.
///
/// Reads the token from the header named by `jwt_header_name`, expecting the
/// configured `jwt_header_type` prefix, then injects the [`CurrentUser`] into
/// the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let settings = &state.settings;
    let header = request
        .headers()
        .get(settings.jwt_header_name.as_str())
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = header
        .strip_prefix(settings.bearer_prefix().as_str())
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: UserRole::from(claims.role.as_str()),
    });

    Ok(next.run(request).await)
}
