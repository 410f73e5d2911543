//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use acquisitions::domain::AccountService;
use acquisitions::domain::ports::AccountRepository;
use acquisitions::inbound::http::state::HttpState;
use acquisitions::outbound::crypto::Argon2CredentialHasher;
use acquisitions::outbound::memory::InMemoryAccountRepository;
use acquisitions::outbound::persistence::DieselAccountRepository;
use acquisitions::outbound::token::JwtTokenService;

use super::ServerConfig;

/// Select the account store: PostgreSQL when a pool is configured,
/// otherwise an in-process map.
fn build_account_repository(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> Arc<dyn AccountRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselAccountRepository::new(pool.clone(), clock)),
        None => {
            info!("using in-memory account store; accounts are lost on restart");
            Arc::new(InMemoryAccountRepository::new(clock))
        }
    }
}

/// Build the shared HTTP state from server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let accounts = build_account_repository(config, clock.clone());
    let tokens = JwtTokenService::new(config.jwt_secret.as_bytes(), config.token_ttl, clock);
    let service = Arc::new(AccountService::new(
        accounts,
        Arc::new(Argon2CredentialHasher::new()),
        Arc::new(tokens),
    ));

    web::Data::new(HttpState::new(service.clone(), service, config.session))
}
