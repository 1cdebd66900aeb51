use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::EmailError;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<ApiSuccess<CreateAccountResponseData>, ApiError> {
    state
        .account_service
        .create_account(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|(ref account, verification_code)| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CreateAccountResponseData {
                    account: account.into(),
                    verification_code,
                },
            )
        })
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateAccountRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreateAccountRequest {
    fn try_into_command(self) -> Result<CreateAccountCommand, ParseCreateAccountRequestError> {
        let email = EmailAddress::new(self.email)?;
        Ok(CreateAccountCommand::new(self.name, email, self.password))
    }
}

impl From<ParseCreateAccountRequestError> for ApiError {
    fn from(err: ParseCreateAccountRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAccountResponseData {
    pub account: AccountData,
    pub verification_code: String,
}
