//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, health_handler};
use crate::domain::{UserResponse, UserRole};
use crate::services::TokenResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ajali API",
        version = "0.1.0",
        description = "Incident reporting backend"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        health_handler::health,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            health_handler::HealthResponse,
            health_handler::ServiceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
