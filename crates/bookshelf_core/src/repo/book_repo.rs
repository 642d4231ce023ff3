//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert-if-absent and read APIs over the `books` table.
//! - Own the equality-filter query builder.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Book::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Filter values are always bound as parameters; only the fixed column
//!   skeleton is rendered into SQL text.

use crate::db::DbError;
use crate::model::book::{Book, BookId, BookValidationError};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    first_sentence,
    year_published
FROM books";

const BOOK_ORDER_SQL: &str = " ORDER BY id ASC;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Optional equality filters accepted by the filtered listing.
///
/// A field is `Some` only when the caller supplied a non-empty value.
/// Values are kept as text and bound verbatim; SQLite column affinity
/// handles integer-ish input for `id` and `year_published`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Matches `books.id`.
    pub id: Option<String>,
    /// Matches `books.year_published`.
    pub published: Option<String>,
    /// Matches `books.author` exactly.
    pub author: Option<String>,
}

impl BookFilter {
    /// Builds a filter from raw query-string pairs.
    ///
    /// Unknown keys are ignored, empty values count as absent and the first
    /// occurrence of a repeated key wins.
    pub fn from_query_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "id" => &mut filter.id,
                "published" => &mut filter.published,
                "author" => &mut filter.author,
                _ => continue,
            };
            if slot.is_some() {
                continue;
            }
            let value = value.into();
            if !value.is_empty() {
                *slot = Some(value);
            }
        }
        filter
    }

    /// Returns `true` when no filter parameter was supplied.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.published.is_none() && self.author.is_none()
    }

    /// Names of the supplied parameters, in predicate order.
    ///
    /// Used for logging without echoing user-supplied values.
    pub fn present_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.id.is_some() {
            keys.push("id");
        }
        if self.published.is_some() {
            keys.push("published");
        }
        if self.author.is_some() {
            keys.push("author");
        }
        keys
    }

    /// Translates the supplied parameters into a bound predicate.
    ///
    /// Conditions are added in the fixed order id, published, author.
    pub fn to_predicate(&self) -> BookPredicate {
        let mut predicate = BookPredicate::default();
        if let Some(id) = &self.id {
            predicate.push_eq("id", id);
        }
        if let Some(published) = &self.published {
            predicate.push_eq("year_published", published);
        }
        if let Some(author) = &self.author {
            predicate.push_eq("author", author);
        }
        predicate
    }
}

/// Conjunction of `column = ?` conditions with their bound values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPredicate {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl BookPredicate {
    /// Appends an equality condition on a known column.
    pub fn push_eq(&mut self, column: &'static str, value: &str) {
        self.columns.push(column);
        self.values.push(Value::Text(value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Renders ` WHERE a = ?1 AND b = ?2`, or an empty string.
    pub fn where_clause(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let conditions = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>();
        format!(" WHERE {}", conditions.join(" AND "))
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Repository interface for the book catalog.
pub trait BookRepository {
    /// Inserts a book unless a row with the same id exists.
    ///
    /// Returns `true` when a row was written.
    fn insert_if_absent(&self, book: &Book) -> RepoResult<bool>;
    /// Lists every book ordered by id.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Lists books matching every condition of `predicate`, ordered by id.
    fn filter_books(&self, predicate: &BookPredicate) -> RepoResult<Vec<Book>>;
    /// Counts rows in the catalog.
    fn count_books(&self) -> RepoResult<u64>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_books(&self, sql: &str, values: &[Value]) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(values.iter()))?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn insert_if_absent(&self, book: &Book) -> RepoResult<bool> {
        book.validate()?;

        let changed = self.conn.execute(
            "INSERT INTO books (
                id,
                title,
                author,
                first_sentence,
                year_published
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO NOTHING;",
            params![
                book.id,
                book.title.as_str(),
                book.author.as_str(),
                book.first_sentence.as_str(),
                book.year_published,
            ],
        )?;

        Ok(changed == 1)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.query_books(&format!("{BOOK_SELECT_SQL}{BOOK_ORDER_SQL}"), &[])
    }

    fn filter_books(&self, predicate: &BookPredicate) -> RepoResult<Vec<Book>> {
        let sql = format!(
            "{BOOK_SELECT_SQL}{}{BOOK_ORDER_SQL}",
            predicate.where_clause()
        );
        self.query_books(&sql, predicate.values())
    }

    fn count_books(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get::<_, i64>(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id: BookId = row.get("id")?;
    let year_published = parse_year(id, row.get_ref("year_published")?)?;

    let book = Book {
        id,
        title: row.get("title")?,
        author: row.get("author")?,
        first_sentence: row.get("first_sentence")?,
        year_published,
    };
    book.validate()?;
    Ok(book)
}

// INTEGER affinity stores integer-looking text as integers, but a legacy
// file may still hold text such as '1992 AD'.
fn parse_year(id: BookId, value: ValueRef<'_>) -> RepoResult<Option<i64>> {
    match value {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(year) => Ok(Some(year)),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            text.trim().parse::<i64>().map(Some).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid year `{text}` in books.year_published for id {id}"
                ))
            })
        }
        other => Err(RepoError::InvalidData(format!(
            "unexpected {:?} value in books.year_published for id {id}",
            other.data_type()
        ))),
    }
}
