use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Paginated account listing. Pages are 1-based; out-of-range pages come
/// back empty rather than erroring.
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<ApiSuccess<ListAccountsResponseData>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * limit;

    state
        .account_service
        .list_accounts(limit, offset)
        .await
        .map_err(ApiError::from)
        .map(|accounts| {
            ApiSuccess::new(
                StatusCode::OK,
                ListAccountsResponseData {
                    accounts: accounts.iter().map(AccountData::from).collect(),
                    page,
                    limit,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListAccountsQuery {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListAccountsResponseData {
    pub accounts: Vec<AccountData>,
    pub page: i64,
    pub limit: i64,
}
