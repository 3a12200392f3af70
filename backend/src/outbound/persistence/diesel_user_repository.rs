//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Writes run inside a transaction that checks username uniqueness before
//! touching the table. The unique index on `users.username` still backs this
//! up; a violation from a concurrent writer surfaces as
//! [`UserPersistenceError::DuplicateUsername`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUserAccount, PasswordDigest, User, UserAccount, UserId, Username};

use super::diesel_error_mapping::map_user_diesel_error;
use super::models::{NewUserRow, UserCredentialsUpdate, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Failure inside a user write transaction.
enum WriteError {
    Taken,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for WriteError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl WriteError {
    fn into_persistence(self, username: &str) -> UserPersistenceError {
        match self {
            Self::Taken => UserPersistenceError::duplicate_username(username),
            Self::Diesel(error) => map_user_diesel_error(error, username),
        }
    }
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    UserAccount::try_from(row).map_err(UserPersistenceError::query)
}

/// Diesel-backed credential store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await?;

        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_user_diesel_error(err, username.as_ref()))?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &NewUserAccount) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await?;
        let username = account.username.as_ref();
        let new_row = NewUserRow {
            username,
            password_hash: account.password_digest.as_str(),
            role: account.role.as_str(),
        };

        let row = conn
            .transaction::<_, WriteError, _>(|conn| {
                async move {
                    let taken: i64 = users::table
                        .filter(users::username.eq(username))
                        .count()
                        .get_result(conn)
                        .await?;
                    if taken > 0 {
                        return Err(WriteError::Taken);
                    }

                    let row = diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result::<UserRow>(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| err.into_persistence(username))?;

        row_to_account(row).map(UserAccount::into_user)
    }

    async fn update_credentials(
        &self,
        id: UserId,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await?;
        let name = username.as_ref();
        let changes = UserCredentialsUpdate {
            username: name,
            password_hash: password_digest.as_str(),
        };

        let row = conn
            .transaction::<_, WriteError, _>(|conn| {
                async move {
                    let held_elsewhere: i64 = users::table
                        .filter(users::username.eq(name))
                        .filter(users::id.ne(id.get()))
                        .count()
                        .get_result(conn)
                        .await?;
                    if held_elsewhere > 0 {
                        return Err(WriteError::Taken);
                    }

                    let row = diesel::update(users::table.find(id.get()))
                        .set(&changes)
                        .returning(UserRow::as_returning())
                        .get_result::<UserRow>(conn)
                        .await
                        .optional()?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| err.into_persistence(name))?;

        row.map(|row| row_to_account(row).map(UserAccount::into_user))
            .transpose()
    }
}
