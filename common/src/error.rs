use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // === APPLICATION ERRORS ===
    #[error("Authorization error: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotVerified(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    InvalidOtp(String),

    #[error("Bad request: {0}")]
    Validation(String),

    #[error("{0}")]
    Checkout(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "error": err_msg })
            } else {
                serde_json::json!({ "error": "Internal server error" })
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                if is_transient(error) {
                    HttpResponse::ServiceUnavailable()
                        .json(serde_json::json!({ "error": "Storage temporarily unavailable" }))
                } else {
                    HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
                }
            }
            AppError::Jwt(error) => {
                log::error!("JWT error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized(_) => {
                HttpResponse::Unauthorized().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Forbidden(_) | AppError::NotVerified(_) => {
                HttpResponse::Forbidden().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::NotFound(_) => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::AlreadyExists(_) => {
                HttpResponse::Conflict().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::InvalidOtp(_) | AppError::Validation(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Checkout(error) => {
                log::error!("Checkout error: {}", error);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
        }
    }
}

/// Connectivity-class failures get a 503 so clients can distinguish
/// "retry later" from a genuine server bug.
fn is_transient(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn application_errors_map_to_expected_statuses() {
        let cases = [
            (AppError::Unauthorized("no token".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("bad token".into()), StatusCode::FORBIDDEN),
            (AppError::NotVerified("not verified".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("no such user".into()), StatusCode::NOT_FOUND),
            (AppError::AlreadyExists("taken".into()), StatusCode::CONFLICT),
            (AppError::InvalidOtp("expired".into()), StatusCode::BAD_REQUEST),
            (AppError::Validation("empty cart".into()), StatusCode::BAD_REQUEST),
            (AppError::Checkout("failed".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.to_http_response().status(), status);
        }
    }

    #[test]
    fn pool_timeout_is_surfaced_as_service_unavailable() {
        let error = AppError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(
            error.to_http_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
