//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record and its JSON wire shape.
//! - Validate mandatory text fields before persistence.
//!
//! # Invariants
//! - `id` is non-negative and unique within the catalog.
//! - `title`, `author` and `first_sentence` are never blank.
//! - `year_published` is an integer year when present.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a catalog row (`books.id`).
pub type BookId = i64;

/// One row of the `books` table.
///
/// Serializes to an object with keys `id`, `title`, `author`,
/// `first_sentence` and `year_published`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Opening sentence of the work.
    pub first_sentence: String,
    /// Nullable in storage; seeded rows always carry a year.
    pub year_published: Option<i64>,
}

/// Validation failures for [`Book`] fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    NegativeId(BookId),
    BlankField { id: BookId, field: &'static str },
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeId(id) => write!(f, "book id must be non-negative, got {id}"),
            Self::BlankField { id, field } => {
                write!(f, "book {id} has blank required field `{field}`")
            }
        }
    }
}

impl Error for BookValidationError {}

impl Book {
    /// Creates a book record with every column populated.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        first_sentence: impl Into<String>,
        year_published: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            first_sentence: first_sentence.into(),
            year_published: Some(year_published),
        }
    }

    /// Checks the record invariants.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.id < 0 {
            return Err(BookValidationError::NegativeId(self.id));
        }

        let required = [
            ("title", self.title.as_str()),
            ("author", self.author.as_str()),
            ("first_sentence", self.first_sentence.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(BookValidationError::BlankField { id: self.id, field });
            }
        }

        Ok(())
    }
}
