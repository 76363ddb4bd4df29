//! User registration handler.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::serializers::{RegisterRequest, RegisteredUser};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/register/", post(register))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/register/",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisteredUser),
        (status = 400, description = "Validation error or duplicate username/email/phone")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisteredUser>)> {
    let user = payload.save(state.user_service.as_ref()).await?;

    Ok((StatusCode::CREATED, Json(RegisteredUser::from(&user))))
}
