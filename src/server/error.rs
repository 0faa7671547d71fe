// HTTP error mapping for the JSON API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::downloader::DownloadError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// A failure ready to be rendered as a JSON error response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Map a failure during metadata resolution. The extractor owns the
    /// YouTube conversation, so its failures are client-visible 400s; a
    /// missing tool or unreadable tool output is a server fault.
    pub fn resolution(err: DownloadError) -> Self {
        match err {
            DownloadError::ToolNotFound(_)
            | DownloadError::ExecutionFailed(_)
            | DownloadError::ParseError(_) => Self::internal(err.to_string()),
            other => Self::bad_request(other.to_string()),
        }
    }

    /// Map a failure during download streaming. Bad client input is a
    /// 400; everything that goes wrong while materializing is a 500.
    pub fn download(err: DownloadError) -> Self {
        match err {
            DownloadError::FormatNotFound(_) => Self::bad_request(err.to_string()),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
