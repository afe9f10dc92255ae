//! Client-side form validation for registration and checkout.
//!
//! These checks run before any network call so obviously bad input never
//! leaves the process. The backend remains the authority on conflicts
//! (taken emails, usernames).

use serde::Serialize;
use thiserror::Error;

use novashop_core::{Email, EmailError, Phone, PhoneError};

use crate::api::types::Identity;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Failures from client-side form checks.
#[derive(Debug, Error, Clone)]
pub enum ValidationError {
    #[error("please fill in: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("invalid email address: {0}")]
    InvalidEmail(EmailError),
    #[error("invalid phone number: {0}")]
    InvalidPhone(PhoneError),
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,
}

/// Registration form fields, serialized to the backend wire names.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub phone_number: String,
    pub password: String,
}

impl NewAccount {
    /// Check required fields, email/phone formats, and password length.
    ///
    /// # Errors
    ///
    /// Returns the first failing check; missing fields are reported
    /// together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("username", &self.username),
            ("phone number", &self.phone_number),
            ("password", &self.password),
        ];
        check_required(&required)?;

        Email::parse(&self.email).map_err(ValidationError::InvalidEmail)?;
        Phone::parse(&self.phone_number).map_err(ValidationError::InvalidPhone)?;
        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::WeakPassword);
        }
        Ok(())
    }
}

/// Shipping form collected at checkout. Postal code is optional.
#[derive(Debug, Clone, Default)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl ShippingDetails {
    /// Seed name/email/phone from the signed-in identity, as the checkout
    /// form does; address fields start empty.
    #[must_use]
    pub fn prefill(identity: &Identity) -> Self {
        Self {
            full_name: identity.full_name.clone(),
            email: identity.email.clone(),
            phone: identity.phone_number.clone(),
            ..Self::default()
        }
    }

    /// Check required fields and email/phone formats.
    ///
    /// # Errors
    ///
    /// Returns the first failing check; missing fields are reported
    /// together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("phone", &self.phone),
        ];
        check_required(&required)?;

        Email::parse(&self.email).map_err(ValidationError::InvalidEmail)?;
        Phone::parse(&self.phone).map_err(ValidationError::InvalidPhone)?;
        Ok(())
    }
}

fn check_required(fields: &[(&str, &String)]) -> Result<(), ValidationError> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| (*label).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
