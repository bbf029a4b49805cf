//! Login DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_lostfound::{Credentials, Role, User};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Roll number, staff code or email
    #[validate(length(min = 1, message = "identifier is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub role: Role,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            identifier: request.identifier.trim().to_string(),
            password: request.password,
            role: request.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub identifier: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            identifier: user.identifier,
            email: user.email,
            role: user.role,
        }
    }
}
