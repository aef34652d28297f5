use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use procplan_ai::AiError;
use procplan_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Ai(#[from] AiError),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Ai(e) => match e {
                AiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AiError::Provider(_) | AiError::InvalidResponse(_) | AiError::MissingApiKey(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
