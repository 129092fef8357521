//! Shared domain types for GameStringer.
//!
//! These types cross crate boundaries: the library pipeline produces
//! [`LibraryGame`] values, the persistence layer stores them, and the HTTP
//! API serializes them. Translation entries are the exchange format between
//! the database rows and the export/import formatters.

pub mod game;
pub mod translation;

pub use game::{LibraryGame, Platform};
pub use translation::{TranslationEntry, TranslationStatus};
