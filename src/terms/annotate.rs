//! Annotate trait
use crate::vertical::VerticalDocument;

/// Annotations add contextual information to a document, in place.
pub trait Annotate<T = VerticalDocument> {
    fn annotate(&self, doc: &mut T);
}
