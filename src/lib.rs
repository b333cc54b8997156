/*! # wikicorpus

Wiki markup extraction and term annotation.

1. [markup]: raw article markup to prevertical documents, with links kept as terms.
1. [pipelines::Verticalizer]: external taggers turn prevertical files into vertical ones.
1. [vertical]: vertical documents, decoded according to their [vertical::Tagset].
1. [terms]: term tries and longest-match inference of term occurrences.
!*/
pub mod error;
pub mod io;
pub mod markup;
pub mod pipelines;
pub mod terms;
pub mod vertical;
