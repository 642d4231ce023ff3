//! Catalog domain model.
//!
//! # Responsibility
//! - Define the book record shared by storage and the HTTP surface.
//!
//! # Invariants
//! - Every book is identified by a stable, unique `BookId`.
//! - Books are never updated or deleted once persisted.

pub mod book;
