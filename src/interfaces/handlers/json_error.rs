use actix_web::{
    error::{JsonPayloadError, PathError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use derive_more::Display;
use serde_json::json;

/// Extractor rejection rendered as `{ "message": ... }`. JSON bodies answer
/// 400, or 413 when too big; unparsable path segments answer 404.
#[derive(Debug, Display)]
#[display("{message}")]
pub struct JsonError {
    message: String,
    status: StatusCode,
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(json!({ "message": self.message }))
    }
}

impl From<JsonPayloadError> for JsonError {
    fn from(err: JsonPayloadError) -> Self {
        let status = match err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            _ => StatusCode::BAD_REQUEST,
        };

        JsonError {
            message: format!("Invalid JSON body: {}", err),
            status,
        }
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected JSON payload: {}", err);
    JsonError::from(err).into()
}

impl From<PathError> for JsonError {
    fn from(err: PathError) -> Self {
        JsonError {
            message: format!("Invalid path parameter: {}", err),
            status: StatusCode::NOT_FOUND,
        }
    }
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = req.path(), "Rejected path parameter: {}", err);
    JsonError::from(err).into()
}

/// Fallback for unmatched `/api/*` paths.
pub async fn api_not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "message": "API endpoint not found",
        "path": req.path(),
        "method": req.method().as_str(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn oversized_payload_maps_to_413() {
        let err = JsonError::from(JsonPayloadError::OverflowKnownLength { length: 20, limit: 10 });
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn unparsable_path_segment_is_a_json_404() {
        let err = JsonError::from(PathError::Deserialize(serde::de::value::Error::custom(
            "invalid digit found in string",
        )));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().starts_with("Invalid path parameter"));
    }

    #[test]
    fn content_type_errors_are_bad_requests() {
        let err = JsonError::from(JsonPayloadError::ContentType);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
