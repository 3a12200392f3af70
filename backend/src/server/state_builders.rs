//! Builders wiring Diesel adapters into the domain services and HTTP state.

use std::sync::Arc;

use bookshelf::domain::ports::PasswordHashError;
use bookshelf::domain::{AccountService, BookService};
use bookshelf::inbound::http::health::HealthState;
use bookshelf::inbound::http::state::HttpState;
use bookshelf::outbound::hashing::{Argon2Config, Argon2PasswordHasher};
use bookshelf::outbound::persistence::{
    DbPool, DieselBookRepository, DieselStoreProbe, DieselUserRepository,
};

pub type DieselAccountService = AccountService<DieselUserRepository, Argon2PasswordHasher>;
pub type DieselBookService = BookService<DieselBookRepository>;

/// Domain services backed by PostgreSQL.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: DieselAccountService,
    pub catalogue: DieselBookService,
}

/// Build the account and catalogue services over `pool`.
///
/// # Errors
/// Returns [`PasswordHashError`] when the Argon2 cost parameters are rejected.
pub fn build_services(
    pool: &DbPool,
    argon2: Argon2Config,
) -> Result<AppServices, PasswordHashError> {
    let hasher = Arc::new(Argon2PasswordHasher::new(argon2)?);
    Ok(AppServices {
        accounts: AccountService::new(Arc::new(DieselUserRepository::new(pool.clone())), hasher),
        catalogue: BookService::new(Arc::new(DieselBookRepository::new(pool.clone()))),
    })
}

pub(crate) fn build_http_state(services: &AppServices) -> HttpState {
    let accounts = Arc::new(services.accounts.clone());
    let catalogue = Arc::new(services.catalogue.clone());
    HttpState::new(accounts.clone(), accounts, catalogue.clone(), catalogue)
}

pub fn build_health_state(pool: &DbPool) -> HealthState {
    HealthState::new(Arc::new(DieselStoreProbe::new(pool.clone())))
}
