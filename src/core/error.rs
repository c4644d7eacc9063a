//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::core::validation::FieldError;
use crate::infrastructure::store::StoreError;

/// id 无对应记录时返回的消息
pub const NOT_FOUND_MESSAGE: &str = "Produto no encontrado";

/// 核心错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Produto no encontrado")]
    NotFound,

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// `{errores: [...]}`
#[derive(Serialize)]
pub struct ValidationErrorResponse {
    pub errores: Vec<FieldError>,
}

/// `{error: "..."}`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errores) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse { errores }),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(NOT_FOUND_MESSAGE)),
            )
                .into_response(),
            AppError::MalformedBody(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            AppError::Store(err) => {
                error!("Storage error: {}", err);
                let status = match err {
                    StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    StoreError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, Json(ErrorResponse::new(err.to_string()))).into_response()
            }
        }
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
