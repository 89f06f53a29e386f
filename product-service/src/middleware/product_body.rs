use crate::dtos::ProductFields;
use crate::error::ProductApiError;
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;
use service_core::error::AppError;

/// Product fields read from a JSON request body.
///
/// Requests without a JSON content type, or with an empty body, carry no
/// fields. Malformed JSON and values that cannot be cast are rejected with
/// 400 and a `{message}` body.
#[derive(Debug, Clone)]
pub struct ProductBody(pub ProductFields);

#[async_trait]
impl<S> FromRequest<S> for ProductBody
where
    S: Send + Sync,
{
    type Rejection = ProductApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_application_json);

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ProductApiError::write(AppError::BadRequest(anyhow::anyhow!(e.body_text())))
        })?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProductBody(ProductFields::default()));
        }

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ProductApiError::write(AppError::BadRequest(anyhow::anyhow!(
                "Malformed JSON body: {}",
                e
            )))
        })?;

        ProductFields::from_json(&body)
            .map(ProductBody)
            .map_err(ProductApiError::write)
    }
}

/// Matches `application/json`, ignoring parameters such as `charset`.
fn is_application_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_application_json_essence_is_parsed() {
        assert!(is_application_json("application/json"));
        assert!(is_application_json("Application/JSON; charset=utf-8"));
        assert!(!is_application_json("text/json"));
        assert!(!is_application_json("application/ld+json"));
        assert!(!is_application_json("text/plain"));
    }
}
