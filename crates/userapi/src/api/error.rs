//! HTTP error responses and rejection-aware extractors.

use std::fmt;
use std::marker::PhantomData;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::error::Error;

/// Message returned when no user matches the requested id.
pub const USER_NOT_FOUND: &str = "user not found";

/// Message returned when a path id is not an integer.
pub const INVALID_USER_ID: &str = "invalid user id";

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    #[schema(example = "user not found")]
    pub error: String,
}

/// An error that maps onto an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    /// Response status code.
    pub status: StatusCode,
    /// Message placed in the response body.
    pub message: String,
}

impl ApiError {
    /// Create an error with an arbitrary status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "{}", self.message);
        } else {
            debug!(status = %self.status, "{}", self.message);
        }

        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::UserNotFound { .. } => Self::not_found(USER_NOT_FOUND),
            Error::IdConflict { .. } => Self::conflict(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => Self::bad_request(INVALID_USER_ID),
            other => Self::internal(other.body_text()),
        }
    }
}

/// Decode a JSON request body.
///
/// The `Content-Type` header is not consulted. Decode failures become 400
/// responses carrying the decoder's message.
///
/// # Errors
///
/// Returns a 400 [`ApiError`] if `bytes` is not valid JSON for `T`.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::bad_request(e.to_string()))
}

/// JSON request body, decoded before the handler runs.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        decode_json(&bytes).map(JsonBody)
    }
}

/// JSON request body that the handler decodes on demand.
///
/// Lets a handler resolve the target record first, so a missing record is
/// reported ahead of a malformed body.
#[derive(Debug)]
pub struct DeferredJson<T> {
    bytes: Bytes,
    marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> DeferredJson<T> {
    /// Decode the buffered body.
    ///
    /// # Errors
    ///
    /// Returns a 400 [`ApiError`] if the body is not valid JSON for `T`.
    pub fn decode(&self) -> ApiResult<T> {
        decode_json(&self.bytes)
    }
}

impl<T, S> FromRequest<S> for DeferredJson<T>
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            bytes: Bytes::from_request(req, state).await?,
            marker: PhantomData,
        })
    }
}

/// Path parameters whose parse failures become 400 responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(ApiError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(
            ApiError::internal("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_not_found_uses_fixed_message() {
        let err = ApiError::from(Error::UserNotFound { id: 7 });
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, USER_NOT_FOUND);
    }

    #[test]
    fn test_from_conflict() {
        let err = ApiError::from(Error::IdConflict { id: 2 });
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert!(err.message.contains('2'));
    }

    #[test]
    fn test_from_internal() {
        let err = ApiError::from(Error::internal("boom"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal error: boom");
    }

    #[test]
    fn test_decode_json_reports_decoder_message() {
        let err = decode_json::<crate::user::NewUser>(b"{not json").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("line 1"));
    }

    #[tokio::test]
    async fn test_json_body_ignores_content_type() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "text/plain")
            .body(axum::body::Body::from(r#"{"name":"Bob","email":"b@x"}"#))
            .unwrap();

        let JsonBody(payload) = JsonBody::<crate::user::NewUser>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(payload, crate::user::NewUser::new("Bob", "b@x"));
    }

    #[tokio::test]
    async fn test_deferred_json_decodes_on_demand() {
        let req = Request::builder()
            .method("PUT")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let deferred = DeferredJson::<crate::user::UpdateUser>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(deferred.decode().unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ApiError::not_found(USER_NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "user not found");
    }
}
