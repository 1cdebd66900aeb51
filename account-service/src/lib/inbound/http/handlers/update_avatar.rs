use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn update_avatar(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedAccount>,
    Json(body): Json<UpdateAvatarRequestBody>,
) -> Result<ApiSuccess<UpdateAvatarResponseData>, ApiError> {
    state
        .account_service
        .update_avatar(&identity.account_id, body.url.clone())
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                UpdateAvatarResponseData { avatar: body.url },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateAvatarRequestBody {
    url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateAvatarResponseData {
    pub avatar: String,
}
