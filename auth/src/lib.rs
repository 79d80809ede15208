//! Authentication utilities library
//!
//! Provides the cryptographic building blocks for the identity service:
//! - Password hashing (Argon2id)
//! - JWT access-token generation and validation
//! - One-time confirmation codes
//!
//! The service defines its own domain ports and composes these
//! implementations behind them, so none of this code touches storage or
//! transport concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_email("alice@example.com", Duration::hours(24));
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.email, "alice@example.com");
//! ```
//!
//! ## Confirmation Codes
//! ```
//! use auth::CodeGenerator;
//!
//! let generator = CodeGenerator::new();
//! let code = generator.generate();
//! assert_eq!(code.len(), 8);
//! ```

pub mod confirmation;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use confirmation::CodeGenerator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
