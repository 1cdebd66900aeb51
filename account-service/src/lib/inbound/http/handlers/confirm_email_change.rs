use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Redeem an email-change code and move the authenticated account to the
/// address the code was bound to. The account drops back to unverified.
///
/// The session token still carries the old email, so the response returns
/// the updated account for the client to re-authenticate against.
pub async fn confirm_email_change(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedAccount>,
    Path(code): Path<String>,
) -> Result<ApiSuccess<ConfirmEmailChangeResponseData>, ApiError> {
    state
        .account_service
        .confirm_email_change(&identity.account_id, &code)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(
                StatusCode::OK,
                ConfirmEmailChangeResponseData {
                    account: account.into(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmEmailChangeResponseData {
    pub account: AccountData,
}
