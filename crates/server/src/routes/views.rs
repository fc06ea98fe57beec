use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use common::types::{CountBody, SuccessBody};

use crate::errors::JsonApiError;
use crate::routes::extract::JsonBody;
use crate::routes::auth::{supplied_password, PasswordInput, ServerState};

#[derive(Debug, Deserialize)]
pub struct UpdateViewsInput {
    #[serde(default)]
    pub password: Option<Value>,
    #[serde(default)]
    pub new_count: Option<Value>,
}

pub async fn visit(State(state): State<ServerState>) -> Json<CountBody> {
    Json(CountBody { count: state.site.record_visit().await })
}

pub async fn stats(State(state): State<ServerState>) -> Json<CountBody> {
    Json(CountBody { count: state.site.stats().await })
}

pub async fn reset_views(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<PasswordInput>,
) -> Result<Json<SuccessBody>, JsonApiError> {
    state.site.reset_views(supplied_password(&input.password)).await?;
    Ok(Json(SuccessBody::ok_with("Views have been reset to 0.")))
}

pub async fn update_views(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<UpdateViewsInput>,
) -> Result<Json<SuccessBody>, JsonApiError> {
    let count = state
        .site
        .set_view_count(supplied_password(&input.password), input.new_count.as_ref())
        .await?;
    Ok(Json(SuccessBody::ok_with(format!("Views updated to {count}"))))
}
