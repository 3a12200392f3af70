//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! validated domain types and treat a row that fails validation as a query
//! error.

use diesel::prelude::*;

use crate::domain::{
    Book, BookAuthor, BookChanges, BookId, BookTitle, PasswordDigest, Role, User, UserAccount,
    UserId, Username,
};

use super::schema::{books, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(|err| format!("stored user {} is invalid: {err}", row.id))?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|err| format!("stored user {} is invalid: {err}", row.id))?;
        Ok(UserAccount::new(
            User::new(UserId::new(row.id), username, role),
            PasswordDigest::new(row.password_hash),
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserCredentialsUpdate<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: i32,
    pub title: String,
    pub author: String,
}

impl TryFrom<BookRow> for Book {
    type Error = String;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let title = BookTitle::new(&row.title)
            .map_err(|err| format!("stored book {} is invalid: {err}", row.id))?;
        let author = BookAuthor::new(&row.author)
            .map_err(|err| format!("stored book {} is invalid: {err}", row.id))?;
        Ok(Book::new(BookId::new(row.id), title, author))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub title: &'a str,
    pub author: &'a str,
}

/// Partial update; `None` columns are left out of the `SET` clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books)]
pub(crate) struct BookChangeset<'a> {
    pub title: Option<&'a str>,
    pub author: Option<&'a str>,
}

impl<'a> From<&'a BookChanges> for BookChangeset<'a> {
    fn from(changes: &'a BookChanges) -> Self {
        Self {
            title: changes.title.as_ref().map(AsRef::as_ref),
            author: changes.author.as_ref().map(AsRef::as_ref),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn user_rows_with_unknown_roles_are_rejected() {
        let row = UserRow {
            id: 4,
            username: "mallory".to_owned(),
            password_hash: "x".to_owned(),
            role: "root".to_owned(),
        };
        let err = UserAccount::try_from(row).expect_err("unknown role");
        assert!(err.contains("stored user 4"));
    }

    #[rstest]
    fn user_rows_convert_to_accounts() {
        let row = UserRow {
            id: 1,
            username: "admin".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            role: "admin".to_owned(),
        };
        let account = UserAccount::try_from(row).expect("valid row");
        assert!(account.user().is_admin());
        assert_eq!(account.password_digest().as_str(), "$argon2id$stub");
    }

    #[rstest]
    fn changeset_skips_absent_fields() {
        let changes = BookChanges::from_raw(None, Some("Le Guin")).expect("valid");
        let changeset = BookChangeset::from(&changes);
        assert_eq!(changeset.title, None);
        assert_eq!(changeset.author, Some("Le Guin"));
    }
}
