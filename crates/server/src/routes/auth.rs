use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use common::types::SuccessBody;
use service::site::{repository::SeaOrmSiteRepository, service::SiteService};

use crate::errors::JsonApiError;
use crate::routes::extract::JsonBody;

pub type Site = SiteService<SeaOrmSiteRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub site: Arc<Site>,
}

/// Body of every privileged call that carries nothing but the password.
#[derive(Debug, Default, Deserialize)]
pub struct PasswordInput {
    #[serde(default)]
    pub password: Option<Value>,
}

/// Only a JSON string can ever match the admin secret.
pub fn supplied_password(v: &Option<Value>) -> Option<&str> {
    v.as_ref().and_then(Value::as_str)
}

pub async fn login(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<PasswordInput>,
) -> Result<Json<SuccessBody>, JsonApiError> {
    state.site.login(supplied_password(&input.password))?;
    Ok(Json(SuccessBody::ok()))
}
