//! Terms.
//!
//! Term tries, term lists and the inference of term occurrences in vertical documents.
mod annotate;
pub mod inference;
pub mod list;
pub mod trie;

pub use annotate::Annotate;
pub use inference::{InferenceOptions, TermOccurrenceInferer};
pub use list::{load_terms, write_terms};
pub use trie::{TermEntry, TermTrie, TrieCursor};
