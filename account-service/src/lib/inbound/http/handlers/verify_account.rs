use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Redeem a verification code and mark the bound account as verified.
///
/// The code is the only input; the email it was bound to at issue time
/// decides which account flips. Redemption consumes the code, so a second
/// attempt with the same digits fails even if the first one errored later.
pub async fn verify_account(
    State(state): State<AppState>,
    Json(body): Json<VerifyAccountRequestBody>,
) -> Result<ApiSuccess<VerifyAccountResponseData>, ApiError> {
    let email = state
        .otp
        .redeem(&body.code)
        .await
        .map_err(|e| ApiError::from(AccountError::Otp(e)))?;

    state
        .account_service
        .verify_account(&email)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        VerifyAccountResponseData { email },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyAccountRequestBody {
    code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyAccountResponseData {
    pub email: String,
}
