//! Roleplay rules reference
//!
//! The server's rule concepts are fixed content shipped with the site, so the
//! catalog is a static table rather than a repository.

pub mod catalog;
pub mod entities;

pub use catalog::ConceptCatalog;
pub use entities::{Concept, ConceptSection, ConceptSummary};
