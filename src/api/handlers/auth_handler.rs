//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::{Registration, TokenResponse};

/// Body of `POST /api/auth/register`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "reporter@example.com")]
    pub email: String,
    /// Public handle, unique across accounts
    #[validate(length(min = 3, max = 80, message = "Username must be 3 to 80 characters"))]
    #[schema(example = "reporter")]
    pub username: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    #[schema(example = "Jane Wanjiku")]
    pub full_name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123", min_length = 8)]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            username: request.username,
            full_name: request.full_name,
            password: request.password,
        }
    }
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "reporter@example.com")]
    pub email: String,
    #[schema(example = "SecurePass123")]
    pub password: String,
}

/// Routes mounted under `/api/auth`. Only `/me` needs a token.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

/// Create a `user` account and sign it in
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email or username taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let token = state.auth_service.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Unknown email or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(token))
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth_service.current_user(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}
