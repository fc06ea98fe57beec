use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use common::types::{LockerBody, LockerUpdated};

use crate::errors::JsonApiError;
use crate::routes::extract::JsonBody;
use crate::routes::auth::{supplied_password, ServerState};

#[derive(Debug, Deserialize)]
pub struct LockerInput {
    #[serde(default)]
    pub password: Option<Value>,
    #[serde(default)]
    pub enabled: Option<Value>,
}

pub async fn get_locker(State(state): State<ServerState>) -> Json<LockerBody> {
    Json(LockerBody { enabled: state.site.locker_status().await })
}

pub async fn set_locker(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<LockerInput>,
) -> Result<Json<LockerUpdated>, JsonApiError> {
    let enabled = state
        .site
        .set_locker_status(supplied_password(&input.password), input.enabled.as_ref())
        .await?;
    Ok(Json(LockerUpdated { success: true, enabled }))
}
