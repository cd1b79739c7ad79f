//! Employee authentication and session lifecycle

use std::time::Duration;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::LoginRequest,
    repository::Repository,
    services::session::{SessionPair, SessionService},
};

const INVALID_CREDENTIALS: &str = "invalid username or password";

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    session: SessionService,
}

impl AuthService {
    pub fn new(repository: Repository, session: SessionService) -> Self {
        Self { repository, session }
    }

    /// Check credentials and start a session
    pub async fn login(&self, request: &LoginRequest) -> AppResult<SessionPair> {
        let credentials = self
            .repository
            .employees
            .get_credentials(&request.username)
            .await;

        let credentials = match credentials {
            Ok(Some(credentials)) => credentials,
            Ok(None) => {
                failed_login_delay().await;
                return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
            }
            Err(e) => {
                failed_login_delay().await;
                return Err(e);
            }
        };

        if !verify_password(&credentials.password, &request.password) {
            failed_login_delay().await;
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        tracing::info!(employee_id = %credentials.id, "Employee logged in");

        self.session.issue(credentials.id).await
    }

    /// Exchange a refresh token for a new session
    pub async fn refresh(&self, signed_refresh: &str) -> AppResult<SessionPair> {
        let employee_id = self.session.consume(signed_refresh).await?;

        if !self.repository.employees.exists(employee_id).await? {
            return Err(AppError::Authentication("employee no longer exists".to_string()));
        }

        self.session.issue(employee_id).await
    }

    /// End a session
    pub async fn logout(&self, signed_refresh: Option<&str>) -> AppResult<()> {
        if let Some(token) = signed_refresh {
            self.session.revoke(token).await?;
        }
        Ok(())
    }
}

/// Sleep for a random 100-500 ms so failed logins take about as long as successful ones
async fn failed_login_delay() {
    let millis = rand::thread_rng().gen_range(100..500);
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
///
/// A stored hash that cannot be parsed never verifies.
pub fn verify_password(hash: &str, password: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed_hash) => parsed_hash,
        Err(e) => {
            tracing::warn!("Stored password hash is unreadable: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
