use std::io;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{news::LookupError, storage::StorageError};

pub type Result<T> = core::result::Result<T, Error>;

/// 客户端可见的错误
///
/// 存储与行情服务的失败在访问层被吸收，只有这两种结果会到达 HTTP 层。
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Article not found")]
    NotFound,

    #[error("Internal Server Error")]
    Internal,
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound => ApiError::NotFound,
            LookupError::Internal => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// 进程级错误
///
/// 用于启动阶段（配置、监听端口）以及 `publish` 写入流程。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable `{0}` not set")]
    MissingEnv(&'static str),

    #[error("environment variable `{name}` is invalid: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    #[error("{0}")]
    FormatError(&'static str),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
