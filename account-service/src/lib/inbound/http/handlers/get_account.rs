use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let id = AccountId::from_string(&account_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .account_service
        .get_account(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
