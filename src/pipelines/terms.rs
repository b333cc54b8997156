//! Explicit terms of a vertical file to a term list.
use std::path::PathBuf;

use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use super::{Pipeline, Report, DEFAULT_BUFSIZE};
use crate::error::Error;
use crate::io::{Chunk, DocumentReader, RawDocument};
use crate::terms::{write_terms, TermTrie};
use crate::vertical::{Tagset, VerticalDocument};

pub struct TermsPipeline {
    src: PathBuf,
    dst: PathBuf,
    tagset: Tagset,
    bufsize: usize,
}

impl TermsPipeline {
    pub fn new(src: PathBuf, dst: PathBuf, tagset: Tagset) -> Self {
        Self {
            src,
            dst,
            tagset,
            bufsize: DEFAULT_BUFSIZE,
        }
    }

    pub fn with_bufsize(mut self, bufsize: usize) -> Self {
        self.bufsize = bufsize.max(1);
        self
    }
}

impl Pipeline<Report> for TermsPipeline {
    /// Collects terms in document order: for terms sharing lemmas, the first one is kept.
    fn run(&self) -> Result<Report, Error> {
        info!("collecting terms of {:?}", self.src);
        let documents = DocumentReader::from_path(&self.src)?;
        let mut terms = TermTrie::default();
        let mut report = Report::default();

        for batch in &documents.chunks(self.bufsize) {
            // io errors are fatal
            let batch: Vec<Chunk> = batch.collect::<Result<_, _>>()?;
            let tries: Vec<Option<Result<TermTrie, (String, Error)>>> = batch
                .into_par_iter()
                .map(|chunk| match chunk {
                    Chunk::Document(RawDocument { id, text }) => Some(
                        text.map(|text| VerticalDocument::parse(&text, self.tagset).into_terms())
                            .map_err(|e| (id, e)),
                    ),
                    Chunk::Other(_) => None,
                })
                .collect();

            for trie in tries.into_iter().flatten() {
                match trie {
                    Ok(trie) if trie.is_empty() => report.skipped += 1,
                    Ok(trie) => {
                        terms.extend(&trie);
                        report.processed += 1;
                    }
                    Err((id, e)) => report.fail(id, e),
                }
            }
            debug!("{} terms so far", terms.len());
        }

        info!("writing {} terms to {:?}", terms.len(), self.dst);
        write_terms(&terms, &self.dst)?;
        Ok(report)
    }
}
