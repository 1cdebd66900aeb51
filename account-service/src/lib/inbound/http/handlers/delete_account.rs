use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Delete the authenticated account. Self-service only; the target is
/// always the identity on the token.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<DeleteAccountResponseData>, ApiError> {
    state
        .account_service
        .delete_account(&identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteAccountResponseData {
                    message: "Account deleted".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAccountResponseData {
    pub message: String,
}
