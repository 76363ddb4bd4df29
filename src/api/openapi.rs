//! OpenAPI documentation configuration.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, user_handler};
use crate::serializers::{LoginRequest, LoginResponse, RegisterRequest, RegisteredUser, UserDetail};
use crate::services::TokenResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "usermgmt",
        version = "0.1.0",
        description = "User registration and token authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        user_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::current_user,
    ),
    components(
        schemas(
            RegisterRequest,
            RegisteredUser,
            LoginRequest,
            LoginResponse,
            UserDetail,
            TokenResponse,
            auth_handler::DetailResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User registration"),
        (name = "Authentication", description = "Login, logout and current user")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
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
                        .description(Some("Token obtained from /rest-auth/login/"))
                        .build(),
                ),
            );
        }
    }
}
