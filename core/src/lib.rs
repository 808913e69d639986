//! Normalization, tokenization and inverted indexing of comic documents.

pub mod catalog;
pub mod document;
pub mod index;
pub mod normalize;
pub mod report;
pub mod tokenizer;

pub type DocId = u32;

pub use catalog::{Catalog, TermPolicy};
pub use document::{Collection, Document};
pub use index::InvertedIndex;
