use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A bad email can't match any account; report it as bad credentials
    // rather than leaking which part was wrong.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let account = state
        .account_service
        .login(&email, &body.password)
        .await
        .map_err(|e| match e {
            // An unknown email reads the same as a wrong password.
            AccountError::NotFound(_) => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            _ => ApiError::from(e),
        })?;

    let token = state
        .token_maker
        .create_token(account.id.0, account.email.as_str(), state.token_duration)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            account: (&account).into(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub account: AccountData,
    pub token: String,
}
