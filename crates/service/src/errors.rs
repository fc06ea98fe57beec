use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Incorrect Password!")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("Database disconnected")]
    StoreUnavailable,
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn bad_request(msg: &str) -> Self { Self::BadRequest(msg.to_string()) }
}
