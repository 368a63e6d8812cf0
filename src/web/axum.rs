//! [`IntoResponse`] for [`Error`] and [`Errors`], rendering the JSONAPI document.

use crate::error::{Error, ErrorType, Errors};
use ::axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

pub const JSONAPI_CONTENT_TYPE: &str = "application/vnd.api+json";

fn jsonapi_response(err: &impl ErrorType) -> Response {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Json(err.as_jsonapi_response())).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSONAPI_CONTENT_TYPE),
    );
    response
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        jsonapi_response(&self)
    }
}

impl IntoResponse for Errors {
    fn into_response(self) -> Response {
        jsonapi_response(&self)
    }
}

#[cfg(test)]
mod test {
    use super::JSONAPI_CONTENT_TYPE;
    use crate::error::{Errors, ErrorClass, JSON_SCHEMA_VALIDATION_FAILED, ROUTE_NOT_FOUND};
    use ::axum::{
        http::{header, StatusCode},
        response::IntoResponse,
    };

    static ODD_STATUS: ErrorClass = ErrorClass::new("test.OddStatus", 42, "Odd Status");

    #[test]
    fn test_error_response() {
        let resp = ROUTE_NOT_FOUND.new_error("/nowhere").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            JSONAPI_CONTENT_TYPE
        );
    }

    #[test]
    fn test_errors_response() {
        let mut errs = Errors::new();
        errs.add_error(JSON_SCHEMA_VALIDATION_FAILED.new_error("name is required"));
        errs.add_error(ROUTE_NOT_FOUND.new_error(""));
        assert_eq!(errs.into_response().status(), StatusCode::BAD_REQUEST);

        assert_eq!(
            Errors::new().into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_status() {
        let resp = ODD_STATUS.new_error("").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
