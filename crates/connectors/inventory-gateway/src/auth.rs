//! Password checks and session issuing for `POST /api/auth/login`.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use query_engine_translation::translation::login::PASSWORD_HASH_COLUMN;

use crate::error::ServerError;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub access_token: uuid::Uuid,
    pub user_id: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginResponse {
    pub session: Session,
    pub user: serde_json::Map<String, serde_json::Value>,
}

/// Lowercase hex SHA-256 digest of a password, as stored in `users.password_hash`.
///
/// Unsalted. This is the format existing rows were written in, and it must not
/// change without migrating them; new deployments should not take it as a model.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password).eq_ignore_ascii_case(stored_hash.trim())
}

/// Check the password against the looked-up user rows and issue a session.
///
/// Every failure is the same `Unauthorized`, whether the user is missing or the password is wrong.
pub fn authenticate(rows: serde_json::Value, password: &str) -> Result<LoginResponse, ServerError> {
    let mut user = match rows {
        serde_json::Value::Array(rows) => match rows.into_iter().next() {
            Some(serde_json::Value::Object(user)) => user,
            _ => return Err(ServerError::Unauthorized),
        },
        _ => return Err(ServerError::Unauthorized),
    };

    let verified = match user.remove(PASSWORD_HASH_COLUMN) {
        Some(serde_json::Value::String(stored_hash)) => verify_password(password, &stored_hash),
        _ => false,
    };
    if !verified {
        return Err(ServerError::Unauthorized);
    }

    let user_id = user.get("id").cloned().unwrap_or(serde_json::Value::Null);
    Ok(LoginResponse {
        session: Session {
            access_token: uuid::Uuid::new_v4(),
            user_id,
        },
        user,
    })
}
