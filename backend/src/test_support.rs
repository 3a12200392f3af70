//! In-memory adapters for integration tests.
//!
//! Compiled with the `test-support` feature. The repositories honour the same
//! contracts as the Diesel adapters, including atomic username uniqueness, so
//! HTTP tests can drive the real domain services without a database.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;

use crate::Trace;
use crate::domain::ports::{
    BookPersistenceError, BookRepository, FixtureStoreProbe, PasswordHashError, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AccountService, Book, BookChanges, BookId, BookService, Error, NewBook, NewUserAccount,
    Password, PasswordDigest, User, UserAccount, UserId, Username,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure, not_found};
use crate::outbound::hashing::{Argon2Config, Argon2PasswordHasher};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct UserTable {
    last_id: i32,
    accounts: BTreeMap<i32, UserAccount>,
}

impl UserTable {
    fn holder_of(&self, username: &Username) -> Option<&UserAccount> {
        self.accounts
            .values()
            .find(|account| account.user().username() == username)
    }
}

/// Credential store backed by a mutex-guarded map.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        lock(&self.table).accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(lock(&self.table).holder_of(username).cloned())
    }

    async fn insert(&self, account: &NewUserAccount) -> Result<User, UserPersistenceError> {
        let mut table = lock(&self.table);
        if table.holder_of(&account.username).is_some() {
            return Err(UserPersistenceError::duplicate_username(
                account.username.as_ref(),
            ));
        }
        table.last_id += 1;
        let id = table.last_id;
        let user = User::new(UserId::new(id), account.username.clone(), account.role);
        table.accounts.insert(
            id,
            UserAccount::new(user.clone(), account.password_digest.clone()),
        );
        Ok(user)
    }

    async fn update_credentials(
        &self,
        id: UserId,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut table = lock(&self.table);
        if table
            .holder_of(username)
            .is_some_and(|holder| holder.user().id() != id)
        {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        let Some(account) = table.accounts.get_mut(&id.get()) else {
            return Ok(None);
        };
        let user = User::new(id, username.clone(), account.user().role());
        *account = UserAccount::new(user.clone(), password_digest.clone());
        Ok(Some(user))
    }
}

#[derive(Default)]
struct BookTable {
    last_id: i32,
    books: BTreeMap<i32, Book>,
}

/// Book catalogue backed by a mutex-guarded ordered map.
#[derive(Default)]
pub struct InMemoryBookRepository {
    table: Mutex<BookTable>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookPersistenceError> {
        Ok(lock(&self.table).books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookPersistenceError> {
        Ok(lock(&self.table).books.get(&id.get()).cloned())
    }

    async fn insert(&self, book: &NewBook) -> Result<Book, BookPersistenceError> {
        let mut table = lock(&self.table);
        table.last_id += 1;
        let id = table.last_id;
        let created = Book::new(BookId::new(id), book.title.clone(), book.author.clone());
        table.books.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: BookId,
        changes: &BookChanges,
    ) -> Result<Option<Book>, BookPersistenceError> {
        let mut table = lock(&self.table);
        let Some(stored) = table.books.remove(&id.get()) else {
            return Ok(None);
        };
        let updated = stored.with_changes(changes.clone());
        table.books.insert(id.get(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: BookId) -> Result<bool, BookPersistenceError> {
        Ok(lock(&self.table).books.remove(&id.get()).is_some())
    }
}

/// Argon2 hasher with minimal cost parameters.
pub fn fast_hasher() -> Result<Arc<Argon2PasswordHasher>, PasswordHashError> {
    Argon2PasswordHasher::new(Argon2Config::fast_insecure()).map(Arc::new)
}

/// Real domain services over in-memory stores.
#[derive(Clone)]
pub struct TestServices {
    pub users: Arc<InMemoryUserRepository>,
    pub books: Arc<InMemoryBookRepository>,
    pub accounts: AccountService<InMemoryUserRepository, Argon2PasswordHasher>,
    pub catalogue: BookService<InMemoryBookRepository>,
}

impl TestServices {
    pub fn new() -> Result<Self, PasswordHashError> {
        let users = Arc::new(InMemoryUserRepository::new());
        let books = Arc::new(InMemoryBookRepository::new());
        Ok(Self {
            accounts: AccountService::new(Arc::clone(&users), fast_hasher()?),
            catalogue: BookService::new(Arc::clone(&books)),
            users,
            books,
        })
    }

    /// Provision an admin account the way startup does.
    pub async fn with_admin(self, username: &str, password: &str) -> Result<Self, Error> {
        let username = Username::new(username)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let password =
            Password::new(password).map_err(|err| Error::invalid_request(err.to_string()))?;
        self.accounts.ensure_admin(username, password).await?;
        Ok(self)
    }

    pub fn http_state(&self) -> HttpState {
        let accounts = Arc::new(self.accounts.clone());
        let catalogue = Arc::new(self.catalogue.clone());
        HttpState::new(accounts.clone(), accounts, catalogue.clone(), catalogue)
    }

    /// Application wired like the production server, minus Swagger UI.
    ///
    /// The returned app owns its state and does not borrow `self`.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let health = HealthState::new(Arc::new(FixtureStoreProbe));
        health.mark_ready();
        App::new()
            .app_data(web::Data::new(health))
            .app_data(web::Data::new(self.http_state()))
            .wrap(Trace)
            .service(ready)
            .service(live)
            .configure(configure)
            .default_service(web::to(not_found))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    use super::*;
    use crate::domain::{BookAuthor, BookTitle, Role};

    fn new_account(name: &str) -> NewUserAccount {
        NewUserAccount {
            username: Username::new(name).expect("valid username"),
            password_digest: PasswordDigest::new(format!("digest:{name}")),
            role: Role::User,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn user_ids_are_assigned_in_sequence() {
        let repo = InMemoryUserRepository::new();
        let first = repo.insert(&new_account("alice")).await.expect("insert");
        let second = repo.insert(&new_account("bob")).await.expect("insert");

        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
        assert_eq!(repo.len(), 2);
        assert!(matches!(
            repo.insert(&new_account("bob")).await,
            Err(UserPersistenceError::DuplicateUsername { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn book_ids_are_assigned_in_sequence() {
        let repo = InMemoryBookRepository::new();
        let book = NewBook {
            title: BookTitle::new("Dune").expect("title"),
            author: BookAuthor::new("Herbert").expect("author"),
        };
        let first = repo.insert(&book).await.expect("insert");
        let second = repo.insert(&book).await.expect("insert");

        assert_eq!(first.id(), BookId::new(1));
        assert_eq!(second.id(), BookId::new(2));
        assert_eq!(repo.list().await.expect("list").len(), 2);
    }

    #[rstest]
    #[actix_web::test]
    async fn app_outlives_the_services_that_built_it() {
        let app = {
            let services = TestServices::new().expect("test hasher");
            test::init_service(services.app()).await
        };

        let res = test::call_service(&app, test::TestRequest::get().uri("/books").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
