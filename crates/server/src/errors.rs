use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use models::errors::ModelError;
use models::validation::{FieldError, ValidationErrors};
use service::errors::ServiceError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<FieldError>,
}

/// JSON error response: `{"error": <title>, "message"?: ..., "fieldErrors"?: [...]}`.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, body: ErrorBody { error, message, field_errors: Vec::new() } }
    }

    pub fn validation(errs: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody { error: "Validation Error", message: None, field_errors: errs.into_errors() },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Model(ModelError::Validation(errs)) => Self::validation(errs),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            other => {
                error!(err = %other, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(other.to_string()))
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Malformed Request", Some(r.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Malformed Request", Some(r.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(e: JsonApiError) -> serde_json::Value {
        serde_json::to_value(&e.body).unwrap()
    }

    #[test]
    fn not_found_maps_to_404() {
        let e = JsonApiError::from(ServiceError::not_found("song", 3));
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body(e),
            serde_json::json!({"error": "Not Found", "message": "Not found song with id = 3"})
        );
    }

    #[test]
    fn validation_lists_field_errors() {
        let mut errs = ValidationErrors::default();
        errs.push(FieldError::new("name", "Size", "name must be between 3 and 50 characters"));
        let e = JsonApiError::from(ServiceError::from(errs));
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        let v = body(e);
        assert_eq!(v["error"], "Validation Error");
        assert_eq!(v["fieldErrors"][0]["field"], "name");
        assert_eq!(v["fieldErrors"][0]["message"], "Size: name must be between 3 and 50 characters");
        assert!(v.get("message").is_none());
    }

    #[test]
    fn db_failure_is_500() {
        let e = JsonApiError::from(ServiceError::Db("disk I/O error".into()));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
