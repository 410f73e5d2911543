//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountsService, AuthService};
use crate::inbound::http::session::SessionCarrier;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub accounts: Arc<dyn AccountsService>,
    pub session: SessionCarrier,
}

impl HttpState {
    /// Construct state from the driving ports and cookie settings.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use acquisitions::domain::AccountService;
    /// use acquisitions::inbound::http::session::SessionCarrier;
    /// use acquisitions::inbound::http::state::HttpState;
    /// use acquisitions::outbound::crypto::Argon2CredentialHasher;
    /// use acquisitions::outbound::memory::InMemoryAccountRepository;
    /// use acquisitions::outbound::token::JwtTokenService;
    /// use mockable::DefaultClock;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let service = Arc::new(AccountService::new(
    ///     Arc::new(InMemoryAccountRepository::new(clock.clone())),
    ///     Arc::new(Argon2CredentialHasher::new()),
    ///     Arc::new(JwtTokenService::new(&[7; 32], Duration::from_secs(60), clock)),
    /// ));
    /// let state = HttpState::new(
    ///     service.clone(),
    ///     service,
    ///     SessionCarrier::new(false, Duration::from_secs(60)),
    /// );
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(
        auth: Arc<dyn AuthService>,
        accounts: Arc<dyn AccountsService>,
        session: SessionCarrier,
    ) -> Self {
        Self {
            auth,
            accounts,
            session,
        }
    }
}
