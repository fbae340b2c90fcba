use jsonwebtoken::TokenData;

use crate::{entities::{token::Claims, user::User}, errors::AuthError};

pub trait TokenService: Send + Sync {
    /// Issues a session token for the user
    fn create_session(&self, user: &User) -> Result<String, AuthError>;

    /// Decodes a session token and returns the claims
    fn decode_session(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;

    /// Session lifetime in seconds
    fn session_ttl_secs(&self) -> i64;
}
