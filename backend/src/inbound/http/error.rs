//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP agnostic while letting Actix
//! handlers return it directly. Clients only ever see the canonical status
//! reason as plain text; details stay in the logs.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DuplicateEmail => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_server_fault(error: &Error) {
    let trace_id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
    match error.code() {
        ErrorCode::InternalError => {
            error!(
                trace_id = %trace_id,
                code = %error.code(),
                message = error.message(),
                "request failed"
            );
        }
        ErrorCode::ServiceUnavailable => {
            warn!(
                trace_id = %trace_id,
                code = %error.code(),
                message = error.message(),
                "dependency unavailable"
            );
        }
        _ => {}
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_server_fault(self);
        let status = self.status_code();
        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(status.canonical_reason().unwrap_or("Error"))
    }
}
