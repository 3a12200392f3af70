//! Book catalogue entries.

use std::fmt;

use serde::Serialize;

/// Maximum title and author length accepted by the store.
pub const BOOK_FIELD_MAX: usize = 100;

/// Validation errors raised while building book values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    TitleTooLong { max: usize },
    AuthorTooLong { max: usize },
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyAuthor => write!(f, "author must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::AuthorTooLong { max } => write!(f, "author must be at most {max} characters"),
        }
    }
}

impl std::error::Error for BookValidationError {}

/// Store-assigned book identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BookId(i32);

impl BookId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn bounded_text(
    raw: &str,
    empty: BookValidationError,
    too_long: BookValidationError,
) -> Result<String, BookValidationError> {
    if raw.trim().is_empty() {
        return Err(empty);
    }
    if raw.chars().count() > BOOK_FIELD_MAX {
        return Err(too_long);
    }
    Ok(raw.to_owned())
}

/// Book title. Non-blank, at most [`BOOK_FIELD_MAX`] characters.
///
/// The value is stored as supplied; blank detection ignores whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(raw: &str) -> Result<Self, BookValidationError> {
        bounded_text(
            raw,
            BookValidationError::EmptyTitle,
            BookValidationError::TitleTooLong {
                max: BOOK_FIELD_MAX,
            },
        )
        .map(Self)
    }
}

impl AsRef<str> for BookTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Book author. Same rules as [`BookTitle`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookAuthor(String);

impl BookAuthor {
    pub fn new(raw: &str) -> Result<Self, BookValidationError> {
        bounded_text(
            raw,
            BookValidationError::EmptyAuthor,
            BookValidationError::AuthorTooLong {
                max: BOOK_FIELD_MAX,
            },
        )
        .map(Self)
    }
}

impl AsRef<str> for BookAuthor {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BookAuthor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted book record, serialised as `{id, title, author}`.
///
/// # Examples
/// ```
/// use bookshelf::domain::{Book, BookAuthor, BookId, BookTitle};
///
/// let book = Book::new(
///     BookId::new(1),
///     BookTitle::new("Dune").unwrap(),
///     BookAuthor::new("Herbert").unwrap(),
/// );
/// assert_eq!(
///     serde_json::to_value(&book).unwrap(),
///     serde_json::json!({"id": 1, "title": "Dune", "author": "Herbert"}),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
}

impl Book {
    pub fn new(id: BookId, title: BookTitle, author: BookAuthor) -> Self {
        Self { id, title, author }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &BookTitle {
        &self.title
    }

    pub fn author(&self) -> &BookAuthor {
        &self.author
    }

    /// Apply `changes`, keeping current values for absent fields.
    #[must_use]
    pub fn with_changes(self, changes: BookChanges) -> Self {
        Self {
            id: self.id,
            title: changes.title.unwrap_or(self.title),
            author: changes.author.unwrap_or(self.author),
        }
    }
}

/// Book awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: BookTitle,
    pub author: BookAuthor,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<BookTitle>,
    pub author: Option<BookAuthor>,
}

impl BookChanges {
    /// Build changes from raw optional inputs.
    ///
    /// Absent and blank values keep the stored field. Over-long values are
    /// rejected.
    pub fn from_raw(
        title: Option<&str>,
        author: Option<&str>,
    ) -> Result<Self, BookValidationError> {
        let title = match title.filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => Some(BookTitle::new(raw)?),
            None => None,
        };
        let author = match author.filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => Some(BookAuthor::new(raw)?),
            None => None,
        };
        Ok(Self { title, author })
    }

    /// True when applying the changes would not modify anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}
