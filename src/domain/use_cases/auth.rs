use validator::Validate;

use crate::entities::token::{Claims, SessionResponse};
use crate::entities::user::{LoginForm, NewAdmin};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::user::UserRepository;
use crate::auth::password::{hash_password, verify_password};
use crate::repositories::token::TokenService;

pub struct AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenService,
{
    pub user_repo: R,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenService,
{
    pub fn new(user_repo: R, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            token_service
        }
    }

    /// Creates the admin account unless one with that username already exists.
    /// Returns true when a user was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if self.user_repo.get_user_by_username(username).await?.is_some() {
            tracing::debug!(username, "Admin account already present");
            return Ok(false);
        }

        let request = NewAdmin {
            username: username.to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        match self.user_repo.create_user(&request.prepare_for_insert(hashed_password)).await {
            Ok(id) => {
                tracing::info!(%id, username, "Admin account created");
                Ok(true)
            }
            Err(AppError::Conflict(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Verifies the credentials against the stored Argon2 hash and issues a session token.
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, request: &LoginForm) -> Result<SessionResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_username(request.username.trim())
            .await
            .map_err(|e| {
                tracing::error!("User lookup failed: {}", e);
                AuthError::ServiceUnavailable
            })?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)?;
        if !is_password_valid {
            tracing::warn!(username = %user.username, "Rejected login with wrong password");
            return Err(AuthError::WrongCredentials);
        }

        let token = self.token_service.create_session(&user)?;

        if let Err(e) = self.user_repo.record_login(&user.id).await {
            tracing::warn!("Failed to record login time: {}", e);
        }

        tracing::info!(username = %user.username, "User logged in successfully");
        Ok(SessionResponse::new(token, self.token_service.session_ttl_secs()))
    }

    pub fn verify_session(&self, token: &str) -> Result<Claims, AuthError> {
        self.token_service
            .decode_session(token)
            .map(|data| data.claims)
    }
}
