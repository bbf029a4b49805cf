//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::UserId;
use domain_lostfound::{Role, User};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Portal role
    pub role: Role,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// The authenticated user's id
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing role: {0}")]
    MissingRole(Role),
    #[error("Failed to issue token")]
    TokenCreation,
}

/// Creates a new JWT token for a logged-in user
///
/// # Arguments
///
/// * `user` - The authenticated user
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(user: &User, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = i64::try_from(expiration_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|validity| now.checked_add_signed(validity))
        .ok_or(AuthError::TokenCreation)?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::TokenCreation)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Fails unless the claims carry `required`
pub fn require_role(claims: &Claims, required: Role) -> Result<(), AuthError> {
    if claims.role == required {
        Ok(())
    } else {
        Err(AuthError::MissingRole(required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn faculty() -> User {
        User {
            id: UserId::new(),
            identifier: "FAC-007".to_string(),
            email: "prof.rao@campus.edu".to_string(),
            role: Role::Faculty,
        }
    }

    #[test]
    fn test_token_carries_user_and_role() {
        let user = faculty();
        let token = create_token(&user, SECRET, 60).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert!(require_role(&claims, Role::Faculty).is_ok());
        assert!(require_role(&claims, Role::Student).is_err());
    }

    #[test]
    fn test_out_of_range_expiration_is_refused() {
        let user = faculty();
        assert!(matches!(
            create_token(&user, SECRET, u64::MAX),
            Err(AuthError::TokenCreation)
        ));
        assert!(matches!(
            create_token(&user, SECRET, i64::MAX as u64),
            Err(AuthError::TokenCreation)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token(&faculty(), SECRET, 60).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let user = faculty();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
            iat: (Utc::now() - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(AuthError::TokenExpired)));
    }
}
