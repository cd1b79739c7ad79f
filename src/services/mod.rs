//! Business logic services

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod employees;
pub mod redis;
pub mod session;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

use self::{
    redis::RefreshTokenStore,
    session::{SessionCodec, SessionService},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub session: SessionService,
    pub catalog: catalog::CatalogService,
    pub bookings: bookings::BookingsService,
    pub employees: employees::EmployeesService,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository and refresh token store
    pub fn new(
        repository: Repository,
        config: &AppConfig,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
    ) -> AppResult<Self> {
        let codec = SessionCodec::from_config(&config.session)?;
        let session = SessionService::new(
            codec,
            refresh_tokens.clone(),
            config.session.refresh_ttl_secs,
        );

        Ok(Self {
            auth: auth::AuthService::new(repository.clone(), session.clone()),
            session,
            catalog: catalog::CatalogService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone(), config.bookings.clone()),
            employees: employees::EmployeesService::new(repository.clone()),
            refresh_tokens,
            repository,
        })
    }
}
