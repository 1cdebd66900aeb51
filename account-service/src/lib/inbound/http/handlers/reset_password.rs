use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<ApiSuccess<ResetPasswordResponseData>, ApiError> {
    state
        .account_service
        .reset_password(&body.code, &body.old_password, &body.new_password)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                ResetPasswordResponseData {
                    message: "Password updated".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequestBody {
    code: String,
    old_password: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseData {
    pub message: String,
}
