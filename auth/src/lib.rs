//! Authentication utilities library
//!
//! Provides the reusable trust primitives of the platform:
//! - Password hashing (Argon2id) with an explicit mismatch outcome
//! - Signed, time-bound session tokens (HS256)
//!
//! Services define their own lifecycle logic and compose these primitives.
//! Nothing in here performs I/O: token verification and password checks are
//! pure computation over a server-held key and a stored hash.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Session Tokens
//! ```
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! use auth::TokenMaker;
//!
//! let maker = TokenMaker::new(b"0123456789abcdef0123456789abcdef").unwrap();
//! let token = maker
//!     .create_token(Uuid::new_v4(), "ada@example.com", Duration::hours(1))
//!     .unwrap();
//! let payload = maker.verify_token(&token).unwrap();
//! assert_eq!(payload.email, "ada@example.com");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenError;
pub use token::TokenMaker;
pub use token::TokenPayload;
