pub mod extractors;
pub mod gate;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{validate_not_blank, UserId};

// Re-export necessary items
pub use extractors::RequestContext;
pub use gate::{require_authenticated, require_ownership, OwnershipPolicy, Resource};
pub use middleware::ContextResolver;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a user login request.
///
/// Login input is deliberately not validated: any mismatch, including a blank
/// username, is reported as invalid credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username. Must contain at least one non-whitespace character.
    #[validate(custom = "validate_not_blank")]
    pub username: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

/// Response structure after successful authentication (login or registration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The session token to present as `Authorization: Bearer <token>`.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: UserId,
}
