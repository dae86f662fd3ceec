use crate::error::ShopError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ShopError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::UsernameTaken(_) => StatusCode::CONFLICT,
            Self::StorageFailure(_) | Self::Csv(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side details stay in the log
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ShopError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(ShopError::NotFound("User 'ghost'".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ShopError::ValidationFailed("too short".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ShopError::UsernameTaken("maggie".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ShopError::storage(std::io::Error::other("disk full"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_storage_detail_is_hidden() {
        let response = ShopError::storage(std::io::Error::other("disk full")).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();

        assert!(body.contains("Internal server error"));
        assert!(!body.contains("disk full"));
    }
}
