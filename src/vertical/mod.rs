//! Vertical files.
//!
//! Tagged (one token per line) documents, as produced by the external taggers
//! from a prevertical file.
pub mod document;
pub mod tag;
pub mod tagset;
pub mod token;

pub use document::{Line, VerticalDocument};
pub use tag::{Tag, TagKind};
pub use tagset::Tagset;
pub use token::Token;
