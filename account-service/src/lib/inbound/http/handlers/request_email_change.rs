use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Issue an email-change code for the authenticated account.
///
/// The current email comes from the verified token, never from the body;
/// a caller can only ever move their own account.
pub async fn request_email_change(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedAccount>,
    Json(body): Json<RequestEmailChangeBody>,
) -> Result<ApiSuccess<EmailChangeCodeData>, ApiError> {
    let current_email = EmailAddress::new(identity.email)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
    let requested_email =
        EmailAddress::new(body.email).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .account_service
        .request_email_change(&current_email, &requested_email)
        .await
        .map_err(ApiError::from)
        .map(|change_code| ApiSuccess::new(StatusCode::OK, EmailChangeCodeData { change_code }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestEmailChangeBody {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailChangeCodeData {
    pub change_code: String,
}
