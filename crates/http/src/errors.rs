//! Maps `packfinder_core::Error` onto HTTP status codes and the `{code,
//! message}` JSON body every endpoint uses for failures.

use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use packfinder_core::Error;
use packfinder_dto::ErrorBody;
use std::fmt;

pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::MapNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidName => StatusCode::BAD_REQUEST,
            Error::InvalidToken => StatusCode::UNAUTHORIZED,
            Error::UnknownToken => StatusCode::UNAUTHORIZED,
            Error::InvalidAction(_) => StatusCode::BAD_REQUEST,
            Error::ParseError(_) => StatusCode::BAD_REQUEST,
            Error::RestoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.0.code().to_owned(),
            message: self.0.to_string(),
        })
    }
}

/// Constructs the 400 `badRequest`-shaped body used by the unroutable-path
/// catch-all, which has no underlying `Error` value to map.
pub fn bad_request_body(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody {
        code: "badRequest".to_owned(),
        message: message.into(),
    })
}

/// Constructs the 405 `invalidMethod`-shaped body used when a request
/// hits a known path with an unsupported method.
pub fn method_not_allowed_body() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorBody {
        code: "invalidMethod".to_owned(),
        message: "method not allowed on this endpoint".to_owned(),
    })
}
