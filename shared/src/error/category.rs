//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Business errors
/// - 4xxx: Customer errors
/// - 5xxx: Campaign errors
/// - 6xxx: Dispatch errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Business errors (3xxx)
    Business,
    /// Customer errors (4xxx)
    Customer,
    /// Campaign errors (5xxx)
    Campaign,
    /// Dispatch errors (6xxx)
    Dispatch,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Business,
            4000..5000 => Self::Customer,
            5000..6000 => Self::Campaign,
            6000..7000 => Self::Dispatch,
            _ => Self::System,
        }
    }

    /// Whether errors in this category indicate a server-side fault
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl From<ErrorCode> for ErrorCategory {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(3), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1002), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2005), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Business);
        assert_eq!(ErrorCategory::from_code(6002), ErrorCategory::Dispatch);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }
}
