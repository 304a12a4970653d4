//! Authentication service - registration, login and token verification.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Settings, TOKEN_TYPE_BEARER};
use crate::domain::{NewUser, Password, User, UserResponse, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Hash compared against when the email is unknown, so both paths cost one
/// Argon2 verification.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$Cb3yDKPTsQSbAm8s8+T1yWwEQxQ2c2z0P7yKzW3yT2k";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Body returned by login and registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
    /// The authenticated user
    pub user: UserResponse,
}

/// Registration input after request validation
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user with the `user` role and sign them in
    async fn register(&self, registration: Registration) -> AppResult<TokenResponse>;

    /// Login and return JWT token
    async fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Look up the user a token was issued to
    async fn current_user(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of AuthService over a user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    settings: Arc<Settings>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, settings: Arc<Settings>) -> Self {
        Self { users, settings }
    }

    fn issue_token(&self, user: User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_in = self.settings.jwt_expires_in_secs();
        let expires_at = Duration::try_seconds(expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AppError::internal("access token expiry out of range"))?;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.jwt_secret_bytes()),
        )?;

        tracing::debug!(user_id = %user.id, expires_in, "Issued access token");

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
            user: UserResponse::from(user),
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<TokenResponse> {
        if self
            .users
            .exists(&registration.email, &registration.username)
            .await?
        {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let user = self
            .users
            .create(NewUser {
                email: registration.email,
                username: registration.username,
                full_name: registration.full_name,
                role: UserRole::User,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        self.issue_token(user)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse> {
        let user = self.users.find_by_email(email).await?;

        // Verify even for unknown emails so timing does not reveal which exist.
        let hash = user
            .as_ref()
            .map_or(DUMMY_HASH, |user| user.password_hash.as_str());
        let password_valid = Password::from_hash(hash.to_string()).verify(password);

        match user {
            Some(user) if password_valid => self.issue_token(user),
            _ => {
                tracing::debug!("Rejected login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn current_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::Unauthorized)
    }
}
