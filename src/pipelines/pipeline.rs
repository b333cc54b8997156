//! Pipeline trait.
use crate::error::Error;

/// Implemented by each pipeline.
///
/// Generic over the return type, so that pipelines can report
/// what they did ([super::Report]) or return nothing.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
