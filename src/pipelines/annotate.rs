//! Term occurrence annotation of a vertical file.
//!
//! Documents are parsed and annotated in parallel, in chunks, and written in input order.
//! Lines outside of documents are copied as-is.
use std::path::PathBuf;
use std::sync::Arc;

use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use super::{Pipeline, Report, DEFAULT_BUFSIZE};
use crate::error::Error;
use crate::io::{Chunk, DocumentReader, RawDocument, TextWriter};
use crate::terms::{load_terms, Annotate, InferenceOptions, TermOccurrenceInferer};
use crate::vertical::{Tagset, VerticalDocument};

pub struct AnnotatePipeline {
    src: PathBuf,
    dst: PathBuf,
    tagset: Tagset,
    terms: Option<PathBuf>,
    options: InferenceOptions,
    chunk_size: usize,
}

/// Annotated document, or line passed through.
enum Output {
    Document(String),
    Line(String),
}

impl AnnotatePipeline {
    pub fn new(src: PathBuf, dst: PathBuf, tagset: Tagset) -> Self {
        Self {
            src,
            dst,
            tagset,
            terms: None,
            options: InferenceOptions::default(),
            chunk_size: DEFAULT_BUFSIZE,
        }
    }

    /// External term list, shared by all documents.
    pub fn with_terms(mut self, terms: Option<PathBuf>) -> Self {
        self.terms = terms;
        self
    }

    pub fn with_options(mut self, options: InferenceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    fn annotate(
        inferer: &TermOccurrenceInferer,
        tagset: Tagset,
        chunk: Chunk,
    ) -> Result<Output, (String, Error)> {
        match chunk {
            Chunk::Document(RawDocument { id, text }) => {
                let text = text.map_err(|e| (id, e))?;
                let mut doc = VerticalDocument::parse(&text, tagset);
                inferer.annotate(&mut doc);
                Ok(Output::Document(doc.to_string()))
            }
            Chunk::Other(line) => Ok(Output::Line(line)),
        }
    }
}

impl Pipeline<Report> for AnnotatePipeline {
    fn run(&self) -> Result<Report, Error> {
        let external = match &self.terms {
            Some(path) => Some(Arc::new(load_terms(path)?)),
            None => None,
        };
        let inferer = TermOccurrenceInferer::new(external, self.options.clone());

        info!("annotating {:?} into {:?}", self.src, self.dst);
        let documents = DocumentReader::from_path(&self.src)?;
        let mut writer = TextWriter::new(&self.dst)?;
        let mut report = Report::default();

        for (idx, chunk) in (&documents.chunks(self.chunk_size)).into_iter().enumerate() {
            let chunk: Vec<Chunk> = chunk.collect::<Result<_, _>>()?;
            let outputs: Vec<_> = chunk
                .into_par_iter()
                .map(|chunk| Self::annotate(&inferer, self.tagset, chunk))
                .collect();

            for output in outputs {
                match output {
                    Ok(Output::Document(doc)) => {
                        writer.write(&doc)?;
                        report.processed += 1;
                    }
                    Ok(Output::Line(line)) => writer.write(&line)?,
                    Err((id, e)) => report.fail(id, e),
                }
            }
            info!("chunk {}: {} documents annotated", idx, report.processed);
        }

        writer.close()?;
        Ok(report)
    }
}
