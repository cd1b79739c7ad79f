//! Session tokens.
//!
//! Access tokens are branca tokens whose payload is the employee id; their
//! age is checked against a per-route TTL when they are validated. Refresh
//! tokens are random opaque values stored server-side (see
//! [`RefreshTokenStore`]) and handed to clients as `<raw>.<hmac>`, so a
//! forged token is rejected before the store is ever consulted.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use branca::errors::Error as BrancaError;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{SessionConfig, SESSION_KEY_LEN},
    error::{AppError, AppResult},
    services::redis::RefreshTokenStore,
};

type HmacSha256 = Hmac<Sha256>;

/// Random bytes in a raw refresh token
const REFRESH_TOKEN_BYTES: usize = 16;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
    #[error("unable to create token: {0}")]
    Encode(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Invalid | SessionError::Expired => AppError::Authentication(err.to_string()),
            SessionError::Encode(msg) => AppError::Internal(msg),
        }
    }
}

/// Encodes and verifies access and refresh tokens
#[derive(Clone)]
pub struct SessionCodec {
    session_key: [u8; SESSION_KEY_LEN],
    refresh_secret: Vec<u8>,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec").finish_non_exhaustive()
    }
}

impl SessionCodec {
    pub fn new(session_key: &[u8], refresh_secret: &[u8]) -> AppResult<Self> {
        let session_key: [u8; SESSION_KEY_LEN] = session_key.try_into().map_err(|_| {
            AppError::Internal(format!("session key must be exactly {} bytes", SESSION_KEY_LEN))
        })?;

        if refresh_secret.is_empty() {
            return Err(AppError::Internal("refresh secret is empty".to_string()));
        }

        Ok(Self {
            session_key,
            refresh_secret: refresh_secret.to_vec(),
        })
    }

    pub fn from_config(config: &SessionConfig) -> AppResult<Self> {
        Self::new(config.key.as_bytes(), config.refresh_key.as_bytes())
    }

    /// Create an access token for an employee, stamped with the current time
    pub fn create_session_token(&self, employee_id: Uuid) -> Result<String, SessionError> {
        self.create_session_token_at(employee_id, branca_timestamp(Utc::now().timestamp())?)
    }

    pub(crate) fn create_session_token_at(
        &self,
        employee_id: Uuid,
        timestamp: u32,
    ) -> Result<String, SessionError> {
        branca::encode(employee_id.to_string().as_bytes(), &self.session_key, timestamp)
            .map_err(|e| SessionError::Encode(format!("{:?}", e)))
    }

    /// Decode an access token and return the employee id it carries.
    ///
    /// A `ttl_secs` of zero disables the age check.
    pub fn validate_session_token(&self, token: &str, ttl_secs: u32) -> Result<Uuid, SessionError> {
        let payload = match branca::decode(token, &self.session_key, ttl_secs) {
            Ok(payload) => payload,
            Err(BrancaError::ExpiredToken) => return Err(SessionError::Expired),
            Err(_) => return Err(SessionError::Invalid),
        };

        std::str::from_utf8(&payload)
            .ok()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or(SessionError::Invalid)
    }

    /// Create an unsigned, opaque refresh token
    pub fn create_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::thread_rng().fill(&mut bytes);
        URL_SAFE.encode(bytes)
    }

    /// Append an HMAC-SHA256 signature to a raw refresh token
    pub fn sign_refresh_token(&self, token: &str) -> Result<String, SessionError> {
        let signature = self.mac(token)?.finalize().into_bytes();
        Ok(format!("{}.{}", token, URL_SAFE.encode(signature)))
    }

    /// Check the signature of a refresh token and return the raw token
    pub fn verify_refresh_token<'a>(&self, signed: &'a str) -> Result<&'a str, SessionError> {
        let mut parts = signed.split('.');
        let (token, signature) = match (parts.next(), parts.next(), parts.next()) {
            (Some(token), Some(signature), None) => (token, signature),
            _ => return Err(SessionError::Invalid),
        };

        let signature = URL_SAFE.decode(signature).map_err(|_| SessionError::Invalid)?;

        self.mac(token)?
            .verify_slice(&signature)
            .map_err(|_| SessionError::Invalid)?;

        Ok(token)
    }

    fn mac(&self, token: &str) -> Result<HmacSha256, SessionError> {
        let mut mac = HmacSha256::new_from_slice(&self.refresh_secret)
            .map_err(|e| SessionError::Encode(e.to_string()))?;
        mac.update(token.as_bytes());
        Ok(mac)
    }
}

/// Branca stamps tokens with a 32-bit unix time
fn branca_timestamp(unix_secs: i64) -> Result<u32, SessionError> {
    u32::try_from(unix_secs)
        .map_err(|_| SessionError::Encode(format!("timestamp {} out of range", unix_secs)))
}

/// Access token plus signed refresh token handed to a client
#[derive(Debug, Clone)]
pub struct SessionPair {
    pub access: String,
    pub refresh: String,
}

/// Issues, consumes and revokes sessions
#[derive(Clone)]
pub struct SessionService {
    codec: SessionCodec,
    store: Arc<dyn RefreshTokenStore>,
    refresh_ttl_secs: u64,
}

impl SessionService {
    pub fn new(codec: SessionCodec, store: Arc<dyn RefreshTokenStore>, refresh_ttl_secs: u64) -> Self {
        Self {
            codec,
            store,
            refresh_ttl_secs,
        }
    }

    pub fn refresh_ttl_secs(&self) -> u64 {
        self.refresh_ttl_secs
    }

    /// Validate an access token against a route TTL
    pub fn validate(&self, token: &str, ttl_secs: u32) -> AppResult<Uuid> {
        Ok(self.codec.validate_session_token(token, ttl_secs)?)
    }

    /// Start a session for an authenticated employee
    pub async fn issue(&self, employee_id: Uuid) -> AppResult<SessionPair> {
        let access = self.codec.create_session_token(employee_id)?;
        let refresh = self.codec.create_refresh_token();

        // The store only ever sees the raw token.
        self.store
            .save(&refresh, employee_id, self.refresh_ttl_secs)
            .await?;

        let refresh = self.codec.sign_refresh_token(&refresh)?;

        Ok(SessionPair { access, refresh })
    }

    /// Verify and consume a refresh token, returning the employee it belongs to.
    ///
    /// Replaying a consumed token fails.
    pub async fn consume(&self, signed_refresh: &str) -> AppResult<Uuid> {
        let raw = self
            .codec
            .verify_refresh_token(signed_refresh)
            .map_err(|_| AppError::Authentication("invalid refresh token".to_string()))?;

        let employee_id = self
            .store
            .take(raw)
            .await?
            .ok_or_else(|| AppError::Authentication("refresh token expired or revoked".to_string()))?;

        Ok(employee_id)
    }

    /// Revoke a refresh token. Tokens with a bad signature are ignored.
    pub async fn revoke(&self, signed_refresh: &str) -> AppResult<()> {
        match self.codec.verify_refresh_token(signed_refresh) {
            Ok(raw) => self.store.revoke(raw).await,
            Err(_) => {
                tracing::debug!("Ignoring revoke of refresh token with bad signature");
                Ok(())
            }
        }
    }
}
