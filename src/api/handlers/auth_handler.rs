//! Token authentication handlers mounted under `/rest-auth`.

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::serializers::{LoginRequest, LoginResponse, UserDetail};

/// Plain acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct DetailResponse {
    #[schema(example = "Successfully logged out.")]
    pub detail: String,
}

/// Create authentication routes. Only `/user/` requires a token.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/", get(current_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/login/", post(login))
        .route("/logout/", post(logout))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/rest-auth/login/",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials or malformed payload")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = payload.authenticate(state.auth_service.as_ref()).await?;
    let token = state.auth_service.login(user.clone()).await?;

    Ok(Json(LoginResponse::new(token, &user)))
}

/// Log out. Tokens are stateless, so this only acknowledges the request;
/// clients discard their token.
#[utoipa::path(
    post,
    path = "/rest-auth/logout/",
    tag = "Authentication",
    responses((status = 200, description = "Logged out", body = DetailResponse))
)]
pub async fn logout() -> Json<DetailResponse> {
    Json(DetailResponse {
        detail: "Successfully logged out.".to_string(),
    })
}

/// Profile of the token's owner
#[utoipa::path(
    get,
    path = "/rest-auth/user/",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = UserDetail),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn current_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserDetail>> {
    let user = match state.user_service.get_user(current.id).await {
        Ok(user) if user.is_active => user,
        Ok(_) | Err(AppError::NotFound) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e),
    };

    Ok(Json(UserDetail::from(&user)))
}
