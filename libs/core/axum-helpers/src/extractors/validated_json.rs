//! JSON extractor that validates the body before the handler runs.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::ValidationErrors;

/// Conversion from a loosely typed request payload into a validated input.
///
/// The payload keeps whatever the client sent (absent keys, nulls, values of
/// the wrong type) so that every field can be checked and reported together
/// instead of failing on the first serde error.
pub trait FromPayload: Sized {
    type Payload: DeserializeOwned;

    fn from_payload(payload: Self::Payload) -> Result<Self, ValidationErrors>;
}

/// JSON extractor with validation.
///
/// Bodies that are not JSON are rejected by [`Json`] itself. Bodies that are
/// JSON but fail [`FromPayload`] become [`AppError::ValidationError`] (422).
///
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::ValidatedJson;
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) -> String {
///     format!("Creating {}", input.name)
/// }
///
/// let app = Router::new().route("/product", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: FromPayload + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T::Payload>::from_request(req, state).await?;
        let value = T::from_payload(payload)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::ValidationError;

    #[derive(Deserialize)]
    struct TagPayload {
        label: Option<serde_json::Value>,
    }

    struct Tag {
        label: String,
    }

    impl FromPayload for Tag {
        type Payload = TagPayload;

        fn from_payload(payload: TagPayload) -> Result<Self, ValidationErrors> {
            match payload.label {
                Some(serde_json::Value::String(label)) => Ok(Tag { label }),
                _ => {
                    let mut errors = ValidationErrors::new();
                    let mut err = ValidationError::new("required");
                    err.message = Some("The label field is required.".into());
                    errors.add("label", err);
                    Err(errors)
                }
            }
        }
    }

    async fn create(ValidatedJson(tag): ValidatedJson<Tag>) -> String {
        tag.label
    }

    async fn send(content_type: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = Router::new()
            .route("/tags", post(create))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tags")
                    .header("content-type", content_type)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_payload_reaches_handler() {
        let (status, _) = send("application/json", r#"{"label":"sale"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_422() {
        let (status, json) = send("application/json", r#"{"label":3}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["message"], "Validation Error");
        assert_eq!(json["errors"]["label"][0], "The label field is required.");
    }

    #[tokio::test]
    async fn test_malformed_json_uses_rejection_status() {
        let (status, json) = send("application/json", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let (status, _) = send("text/plain", r#"{"label":"sale"}"#).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
