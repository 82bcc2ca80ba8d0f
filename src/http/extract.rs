//! Request body extraction.
//!
//! Wraps axum's `Json` so a malformed body is answered like every other
//! non-revert failure: logged, then an empty 500.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::blockchain::types::BlockchainError;
use crate::http::error::ApiError;

/// JSON body whose rejection is an [`ApiError`].
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(BlockchainError::Decoding(format!(
            "Malformed request body: {}",
            rejection.body_text()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: u64,
    }

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ApiJson(parsed) = ApiJson::<Payload>::from_request(request(r#"{"value":7}"#), &()).await.unwrap();
        assert_eq!(parsed.value, 7);
    }

    #[tokio::test]
    async fn test_malformed_body_is_empty_500() {
        let err = ApiJson::<Payload>::from_request(request(r#"{"value":"x"}"#), &()).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }
}
