use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use common::types::{AppCreated, SuccessBody};
use models::app_entry::{self, AppFields};

use crate::errors::JsonApiError;
use crate::routes::extract::JsonBody;
use crate::routes::auth::{supplied_password, ServerState};

/// Admin catalog payload: the eight app attributes plus password and, for
/// edit/delete, the target id.
#[derive(Debug, Deserialize)]
pub struct AppInput {
    #[serde(default)]
    pub password: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub fields: AppFields,
}

pub async fn list(State(state): State<ServerState>) -> Json<Vec<app_entry::Model>> {
    let apps = state.site.list_apps().await;
    info!(count = apps.len(), "list apps");
    Json(apps)
}

pub async fn add(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<AppInput>,
) -> Result<Json<AppCreated>, JsonApiError> {
    let id = state.site.add_app(supplied_password(&input.password), input.fields).await?;
    Ok(Json(AppCreated { success: true, id }))
}

pub async fn edit(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<AppInput>,
) -> Result<Json<SuccessBody>, JsonApiError> {
    state
        .site
        .edit_app(supplied_password(&input.password), input.id.as_ref(), input.fields)
        .await?;
    Ok(Json(SuccessBody::ok()))
}

pub async fn delete(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<AppInput>,
) -> Result<Json<SuccessBody>, JsonApiError> {
    state
        .site
        .delete_app(supplied_password(&input.password), input.id.as_ref())
        .await?;
    Ok(Json(SuccessBody::ok()))
}
