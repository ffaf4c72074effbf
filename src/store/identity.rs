use chrono::Utc;
use log::{debug, error, info};
use validator::Validate;

use super::{Store, UserRecord};
use crate::auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::models::{User, UserId};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

impl Store {
    /// Creates a user and returns a session token for it.
    ///
    /// Fails with `ValidationError` for a blank username or a password shorter than
    /// six characters, and with `Conflict` if the username is taken. The password is
    /// hashed before the store lock is taken.
    pub fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;
        let password_hash = hash_password(&request.password, self.password_cost)?;

        let user = {
            let mut state = self.write()?;
            if state.usernames.contains_key(&request.username) {
                return Err(AppError::Conflict("Username already exists".into()));
            }

            let user = User {
                id: self.ids.next_user()?,
                username: request.username,
                created_at: Utc::now(),
            };
            state.usernames.insert(user.username.clone(), user.id);
            state.users.insert(
                user.id,
                UserRecord {
                    user: user.clone(),
                    password_hash,
                },
            );
            user
        };

        info!("registered user {} ({})", user.id, user.username);
        self.session_for(user.id)
    }

    /// Exchanges a username and password for a session token.
    ///
    /// An unknown username and a wrong password fail with the same
    /// `Unauthorized("Invalid credentials")`.
    pub fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let record = {
            let state = self.read()?;
            state
                .usernames
                .get(&request.username)
                .and_then(|id| state.users.get(id))
                .cloned()
        };

        let Some(record) = record else {
            debug!("login failed: unknown username");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !verify_password(&request.password, &record.password_hash)? {
            debug!("login failed: wrong password for user {}", record.user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        self.session_for(record.user.id)
    }

    /// Resolves a session token to the user it names.
    ///
    /// Malformed, expired or foreign-signed tokens, and tokens for ids that have no
    /// user, resolve to `None`.
    pub fn resolve_token(&self, token: &str) -> Option<User> {
        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("ignoring unusable bearer token: {}", e);
                return None;
            }
        };

        match self.find_user(claims.sub) {
            Ok(user) => user,
            Err(e) => {
                error!("could not resolve user {} from token: {}", claims.sub, e);
                None
            }
        }
    }

    pub fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.get(&id).map(|record| record.user.clone()))
    }

    fn session_for(&self, user_id: UserId) -> Result<AuthResponse, AppError> {
        Ok(AuthResponse {
            token: self.tokens.issue(user_id)?,
            user_id,
        })
    }
}
