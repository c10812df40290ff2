// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP Basic authentication for the admin API.
//!
//! The password is checked against an argon2 PHC hash. Outside production,
//! when no hash is configured, a plaintext comparison is used instead and a
//! warning is logged on every check.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;
use folio_config::model::{AdminConfig, DEV_FALLBACK_ADMIN_PASSWORD};
use folio_config::Environment;
use folio_core::FolioError;
use tracing::{error, warn};

use crate::error::ApiError;

/// How the admin password is verified.
#[derive(Clone)]
pub enum AdminCredential {
    /// Argon2 PHC string.
    Hash(String),
    /// Plaintext comparison, development only.
    Plaintext(String),
    /// No usable credential; every request is rejected.
    Disabled,
}

/// Admin authentication settings.
#[derive(Clone)]
pub struct AdminAuth {
    pub username: String,
    pub credential: AdminCredential,
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credential = match self.credential {
            AdminCredential::Hash(_) => "hash",
            AdminCredential::Plaintext(_) => "plaintext",
            AdminCredential::Disabled => "disabled",
        };
        f.debug_struct("AdminAuth")
            .field("username", &self.username)
            .field("credential", &credential)
            .finish()
    }
}

impl AdminAuth {
    pub fn from_config(config: &AdminConfig, environment: Environment) -> Self {
        let credential = match (&config.password_hash, &config.password) {
            (Some(hash), _) => AdminCredential::Hash(hash.clone()),
            _ if environment == Environment::Production => AdminCredential::Disabled,
            (None, Some(password)) => AdminCredential::Plaintext(password.clone()),
            (None, None) => AdminCredential::Plaintext(DEV_FALLBACK_ADMIN_PASSWORD.to_string()),
        };
        Self {
            username: config.username.clone(),
            credential,
        }
    }

    /// Whether `username` and `password` match the configured admin.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        match &self.credential {
            AdminCredential::Hash(hash) => verify_password(hash, password),
            AdminCredential::Plaintext(expected) => {
                warn!("using plaintext admin password comparison (development only)");
                password == expected
            }
            AdminCredential::Disabled => false,
        }
    }
}

fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            error!(error = %e, "admin.password_hash is not a valid PHC string");
            false
        }
    }
}

/// Hashes `password` into an argon2id PHC string for `admin.password_hash`.
pub fn hash_password(password: &str) -> Result<String, FolioError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| FolioError::Internal(format!("failed to hash password: {e}")))
}

/// Middleware that requires valid admin Basic credentials.
pub async fn admin_auth(
    State(auth): State<AdminAuth>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(TypedHeader(Authorization(basic))) = credentials else {
        return Err(ApiError::unauthorized("Authentication required"));
    };

    if auth.verify(basic.username(), basic.password()) {
        return Ok(next.run(request).await);
    }

    warn!(username = basic.username(), "failed admin authentication attempt");
    Err(ApiError::unauthorized("Invalid credentials"))
}
