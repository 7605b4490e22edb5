//! Unified error codes for OfferSender
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Business (tenant) errors
//! - 4xxx: Customer errors
//! - 5xxx: Campaign errors
//! - 6xxx: Dispatch errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,
    /// Password does not meet minimum requirements
    PasswordTooShort = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Cannot delete the last remaining admin
    CannotDeleteLastAdmin = 2005,

    // ==================== 3xxx: Business ====================
    /// Business profile not found
    BusinessNotFound = 3001,
    /// Business account is disabled
    BusinessDisabled = 3002,
    /// Unknown subscription plan
    PlanUnknown = 3003,

    // ==================== 4xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 4001,

    // ==================== 5xxx: Campaign ====================
    /// Campaign not found
    CampaignNotFound = 5001,

    // ==================== 6xxx: Dispatch ====================
    /// SMS gateway rejected the credentials (HTTP 401)
    GatewayAuthRejected = 6001,
    /// Public relay is locked and requires manual unlock
    ProxyLocked = 6002,
    /// No delivery strategy could reach the gateway
    GatewayUnreachable = 6003,
    /// Gateway reported an application error code
    GatewayError = 6004,
    /// Gateway credential missing or empty
    CredentialMissing = 6005,
    /// No customers to send to
    NoRecipients = 6006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error
    NetworkError = 9004,
    /// Operation timed out
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::AccountDisabled => "Account is disabled",
            Self::PasswordTooShort => "Password must be at least 8 characters",

            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin role required",
            Self::CannotDeleteLastAdmin => "At least one admin must remain",

            Self::BusinessNotFound => "Business profile not found",
            Self::BusinessDisabled => "Business account is disabled",
            Self::PlanUnknown => "Unknown subscription plan",

            Self::CustomerNotFound => "Customer not found",

            Self::CampaignNotFound => "Campaign not found",

            Self::GatewayAuthRejected => "SMS gateway rejected credentials",
            Self::ProxyLocked => "Relay proxy is locked, manual unlock required",
            Self::GatewayUnreachable => "SMS gateway unreachable",
            Self::GatewayError => "SMS gateway reported an error",
            Self::CredentialMissing => "Gateway credential required",
            Self::NoRecipients => "No customers to send to",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Operation timed out",
        }
    }

    /// Get the error category for this code
    pub fn category(&self) -> super::ErrorCategory {
        super::ErrorCategory::from_code(self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a u16 value does not map to a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            7 => Self::RequiredField,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1007 => Self::AccountDisabled,
            1008 => Self::PasswordTooShort,

            2001 => Self::PermissionDenied,
            2003 => Self::AdminRequired,
            2005 => Self::CannotDeleteLastAdmin,

            3001 => Self::BusinessNotFound,
            3002 => Self::BusinessDisabled,
            3003 => Self::PlanUnknown,

            4001 => Self::CustomerNotFound,

            5001 => Self::CampaignNotFound,

            6001 => Self::GatewayAuthRejected,
            6002 => Self::ProxyLocked,
            6003 => Self::GatewayUnreachable,
            6004 => Self::GatewayError,
            6005 => Self::CredentialMissing,
            6006 => Self::NoRecipients,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::NetworkError,
            9005 => Self::TimeoutError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::InvalidCredentials,
            ErrorCode::CannotDeleteLastAdmin,
            ErrorCode::ProxyLocked,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(12345), Err(InvalidErrorCode(12345)));
    }
}
