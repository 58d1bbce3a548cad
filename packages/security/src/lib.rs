// ABOUTME: Admin authentication primitives: constant-time password check and HMAC-signed tokens
// ABOUTME: Tokens are self-validating, so no session state is stored server-side

pub mod admin_token;
pub mod password;

pub use admin_token::{AdminTokenSigner, TokenError, ADMIN_TOKEN_COOKIE, ADMIN_TOKEN_TTL_HOURS};
pub use password::verify_admin_password;
