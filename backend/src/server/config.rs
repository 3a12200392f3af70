//! HTTP server configuration object.

use std::net::SocketAddr;

use super::state_builders::AppServices;

/// Listener address and the services the handlers run against.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) services: AppServices,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, services: AppServices) -> Self {
        Self {
            bind_addr,
            services,
        }
    }
}
