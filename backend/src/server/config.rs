//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use acquisitions::inbound::http::session::SessionCarrier;
use acquisitions::outbound::persistence::DbPool;
use acquisitions::settings::{AppSettings, JwtSecret};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionCarrier,
    pub(crate) jwt_secret: JwtSecret,
    pub(crate) token_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from validated settings.
    #[must_use]
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            session: SessionCarrier::new(settings.cookie_secure, settings.cookie_max_age),
            jwt_secret: settings.jwt_secret.clone(),
            token_ttl: settings.token_ttl,
            bind_addr: settings.bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server keeps accounts in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the listen address.
    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
