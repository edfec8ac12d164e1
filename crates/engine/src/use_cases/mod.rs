//! Use cases - user story orchestration.
//!
//! Each use case owns the port traits it needs and is wired in `App`.

pub mod catalog;
pub mod spellbook;

pub use catalog::CatalogUseCases;
pub use spellbook::{SpellbookError, SpellbookUseCases};
