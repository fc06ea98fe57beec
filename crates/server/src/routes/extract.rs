use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::errors::JsonApiError;

/// `Json<T>` whose rejections (missing content type, unparsable or
/// mistyped body) answer as a 400 `{success: false, message}`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                warn!(status = %rejection.status(), error = %message, "rejected request body");
                Err(JsonApiError::new(StatusCode::BAD_REQUEST, message))
            }
        }
    }
}
