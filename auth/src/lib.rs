//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id) with explicit, tunable cost parameters
//! - Signed, time-bounded token issuance and verification (JWT)
//!
//! Each service defines its own authentication flows and adapts these
//! implementations. Secrets, expiries, and hashing costs are threaded in at
//! construction time, never read from ambient state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingParams, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(&HashingParams::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//!
//! let issued = issuer.mint_refresh("u1", "a@b.com", "s1").unwrap();
//! let claims = issuer.verify_refresh(&issued.token).unwrap();
//! assert_eq!(claims.sid, "s1");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::IssuedToken;
pub use token::TokenClaims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenSigner;
