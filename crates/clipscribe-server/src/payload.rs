use axum::body::Body;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body limit for JSON requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Default sampling temperature for completions
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

/// Field-level checks run after a body is decoded
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Extractor for JSON bodies that are decoded and then validated
pub struct ExtractPayload<T>(pub T);

impl<S, T> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if !is_json(&parts.headers) {
            return Err(ApiError::rejected(
                http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: application/json'",
            ));
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                ApiError::rejected(
                    http::StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                )
            } else {
                ApiError::rejected(
                    http::StatusCode::BAD_REQUEST,
                    format!("Failed to read request body: {err}"),
                )
            }
        })?;

        let payload = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            ApiError::rejected(
                http::StatusCode::BAD_REQUEST,
                format!("Failed to parse request body: {e}"),
            )
        })?;

        payload
            .validate()
            .map_err(|message| ApiError::rejected(http::StatusCode::BAD_REQUEST, message))?;

        Ok(Self(payload))
    }
}

fn is_json(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Body of `POST /videos/{videoId}/transcription`
#[derive(Debug, Deserialize)]
pub struct TranscriptionBody {
    pub prompt: String,
}

impl Validate for TranscriptionBody {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Body of `POST /videos/{videoId}/complete`
#[derive(Debug, Deserialize)]
pub struct CompletionBody {
    pub prompt: String,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl CompletionBody {
    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }
}

impl Validate for CompletionBody {
    fn validate(&self) -> Result<(), String> {
        match self.temperature {
            Some(t) if !(t.is_finite() && (0.0..=1.0).contains(&t)) => {
                Err(format!("temperature must be between 0 and 1, got {t}"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRequest;
    use http::{Request, StatusCode};

    use super::*;
    use clipscribe_core::HttpError;

    fn completion(json: &str) -> CompletionBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn temperature_defaults_to_half() {
        let body = completion(r#"{"prompt":"Summarize: {transcription}"}"#);

        assert!(body.validate().is_ok());
        assert!((body.temperature() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        assert!(completion(r#"{"prompt":"p","temperature":0}"#).validate().is_ok());
        assert!(completion(r#"{"prompt":"p","temperature":1}"#).validate().is_ok());
        assert!(completion(r#"{"prompt":"p","temperature":1.01}"#).validate().is_err());
        assert!(completion(r#"{"prompt":"p","temperature":-0.1}"#).validate().is_err());
    }

    #[test]
    fn json_content_type_accepts_charset() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            "application/json; charset=utf-8".parse().unwrap(),
        );

        assert!(is_json(&headers));

        headers.insert(http::header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!is_json(&headers));
    }

    #[tokio::test]
    async fn missing_prompt_is_rejected() {
        let request = Request::builder()
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"temperature":0.2}"#))
            .unwrap();

        let Err(err) = ExtractPayload::<CompletionBody>::from_request(request, &()).await else {
            panic!("body without prompt should be rejected");
        };

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn out_of_range_temperature_is_rejected() {
        let request = Request::builder()
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"prompt":"p","temperature":2}"#))
            .unwrap();

        let Err(err) = ExtractPayload::<CompletionBody>::from_request(request, &()).await else {
            panic!("temperature 2 should be rejected");
        };

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.client_message().contains("temperature"));
    }
}
