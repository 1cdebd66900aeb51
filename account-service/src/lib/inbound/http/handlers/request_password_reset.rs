use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Issue a password-reset code bound to the given email.
///
/// Responds the same whether or not an account exists for the address;
/// existence is only checked when the code comes back.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<ApiSuccess<PasswordResetCodeData>, ApiError> {
    let email = EmailAddress::new(email).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .account_service
        .request_password_reset(&email)
        .await
        .map_err(ApiError::from)
        .map(|reset_code| ApiSuccess::new(StatusCode::OK, PasswordResetCodeData { reset_code }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordResetCodeData {
    pub reset_code: String,
}
