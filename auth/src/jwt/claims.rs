use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by issued access tokens.
///
/// Accounts are identified by email address, so the email doubles as the
/// token subject. `exp` and `iat` are Unix timestamps fixed at issue time;
/// nothing in the claim set can extend a token's life after issuance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Authenticated identity (account email)
    pub email: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for an authenticated identity.
    ///
    /// # Arguments
    /// * `email` - Email address of the authenticated account
    /// * `ttl` - Time until the token expires
    ///
    /// # Returns
    /// Claims with email, exp, and iat set
    pub fn for_email(email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            email: email.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Override the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_email() {
        let claims = Claims::for_email("alice@example.com", Duration::hours(24));

        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_with_expiration() {
        let claims =
            Claims::for_email("alice@example.com", Duration::hours(1)).with_expiration(1234567890);

        assert_eq!(claims.exp, 1234567890);
    }

    #[test]
    fn test_wire_shape() {
        let claims = Claims {
            email: "alice@example.com".to_string(),
            exp: 1735689600,
            iat: 1735603200,
        };

        let json = serde_json::to_value(&claims).expect("Failed to serialize claims");
        assert_eq!(
            json,
            serde_json::json!({
                "email": "alice@example.com",
                "exp": 1735689600,
                "iat": 1735603200,
            })
        );
    }
}
