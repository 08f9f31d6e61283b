// security/src/lib.rs
//! Authentication for the hospital backend: argon2 credential handling,
//! JWT issuance/verification and the OAuth2-style grant exchanges.

pub mod auth;
pub mod password;
pub mod tokens;

pub use auth::{AuthService, RegisteredClient, TokenGrantForm};
pub use tokens::{Claims, TokenResponse, TokenService, AUTH_CODE_SCOPE};
