//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::BusinessNotFound
            | Self::CustomerNotFound
            | Self::CampaignNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled
            | Self::GatewayAuthRejected => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::AdminRequired
            | Self::CannotDeleteLastAdmin
            | Self::BusinessDisabled
            | Self::ProxyLocked => StatusCode::FORBIDDEN,

            // 422 Unprocessable Entity (gateway rejected the message itself)
            Self::GatewayError => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient, client can retry)
            Self::GatewayUnreachable | Self::NetworkError | Self::TimeoutError => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_dispatch_codes() {
        assert_eq!(
            ErrorCode::GatewayAuthRejected.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::ProxyLocked.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_default_is_bad_request() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::CredentialMissing.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
