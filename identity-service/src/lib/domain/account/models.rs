use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::account::errors::EmailError;

/// Account aggregate entity.
///
/// The persisted record behind local sign-in. The email address is the
/// unique key, the password hash is a PHC string carrying its own salt and
/// cost parameters, and the confirmation code is present only until it has
/// been redeemed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: EmailAddress,
    pub password_hash: String,
    pub confirmation_code: Option<String>,
    pub confirmed: bool,
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Credentials presented for sign-up and local sign-in.
///
/// Transient by contract: the plaintext password exists only for the
/// duration of the operation and is never persisted or logged.
#[derive(Debug)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

impl Credentials {
    /// Construct credentials from a validated email and a plaintext password.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (hashed by the service, never stored)
    ///
    /// # Returns
    /// Credentials for a single authentication operation
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Identity resolved from a federated provider.
///
/// Carries only what the provider attested. Built exclusively from a
/// successful code exchange, never from caller-supplied fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedIdentity {
    pub email: EmailAddress,
}

/// Signed access token returned by every successful authentication flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
}
