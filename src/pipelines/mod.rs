//! Pipelines.
//!
//! Each processing step over whole files is a pipeline, implementing the light
//! [pipeline::Pipeline] trait.
//!
//! * [PreverticalPipeline]: article dump to prevertical.
//! * [SamplePipeline]: smaller article dump, for trial runs.
//! * [Verticalizer]: external tagger, prevertical to vertical.
//! * [TermsPipeline]: explicit terms of a vertical to a term list.
//! * [AnnotatePipeline]: term occurrence inference over a vertical.
pub mod annotate;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod prevertical;
mod report;
pub mod sample;
pub mod tagger;
pub mod terms;

pub use annotate::AnnotatePipeline;
pub use pipeline::Pipeline;
pub use prevertical::PreverticalPipeline;
pub use report::Report;
pub use sample::SamplePipeline;
pub use tagger::Verticalizer;
pub use terms::TermsPipeline;

/// Default number of documents processed at once.
pub const DEFAULT_BUFSIZE: usize = 500;
