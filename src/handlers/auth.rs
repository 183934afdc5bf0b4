use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthenticateResponse {
    pub user_id: i32,
}

/// POST /api/authenticate
///
/// Checks back-office credentials.
#[utoipa::path(
    post,
    path = "/api/authenticate",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthenticateResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "auth"
)]
pub async fn authenticate(
    state: web::Data<AppState>,
    body: web::Json<AuthenticateRequest>,
) -> Result<HttpResponse, AppError> {
    let AuthenticateRequest { email, password } = body.into_inner();

    let user_id = web::block(move || state.users.authenticate(&email, &password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(AuthenticateResponse { user_id }))
}
