//! Error taxonomy for the client library.
//!
//! Every failure is caught at the initiating view and shown once as a
//! transient notice; nothing is retried automatically and nothing crashes
//! the application. State is left unchanged on failure.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::StorageError;
use crate::validate::ValidationError;

/// Failures surfaced by authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration conflict, carrying the field the server reported
    /// (e.g., "email already exists").
    #[error("{field} already exists")]
    FieldTaken { field: String },

    /// Login rejected. Deliberately does not say which field was wrong.
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// Client-side form validation failed before any network call.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The underlying HTTP call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Durable session storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Unified error type at the library boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A signed-in identity is required (e.g., checkout).
    #[error("sign in to continue")]
    NotSignedIn,

    /// Checkout was attempted with nothing in the cart.
    #[error("the cart is empty")]
    EmptyCart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_taken_display() {
        let err = AuthError::FieldTaken {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email already exists");
    }

    #[test]
    fn test_invalid_credentials_does_not_name_a_field() {
        let message = AuthError::InvalidCredentials.to_string();
        assert!(!message.contains("email already"));
        assert_eq!(message, "incorrect email or password");
    }

    #[test]
    fn test_client_error_display() {
        assert_eq!(ClientError::EmptyCart.to_string(), "the cart is empty");
        assert_eq!(ClientError::NotSignedIn.to_string(), "sign in to continue");
    }
}
