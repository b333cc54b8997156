//! Articles to prevertical documents.
//!
//! Articles are read in batches, extracted in parallel, and written in input order.
use std::path::PathBuf;

use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use super::{Pipeline, Report, DEFAULT_BUFSIZE};
use crate::error::Error;
use crate::io::{ArticleReader, TextWriter};
use crate::markup::{parse_wikimarkup, Article, MarkupOptions};

pub struct PreverticalPipeline {
    src: PathBuf,
    dst: PathBuf,
    url_prefix: String,
    options: MarkupOptions,
    bufsize: usize,
}

impl PreverticalPipeline {
    pub fn new(src: PathBuf, dst: PathBuf, url_prefix: String, options: MarkupOptions) -> Self {
        Self {
            src,
            dst,
            url_prefix,
            options,
            bufsize: DEFAULT_BUFSIZE,
        }
    }

    /// Number of articles processed at once.
    pub fn with_bufsize(mut self, bufsize: usize) -> Self {
        self.bufsize = bufsize.max(1);
        self
    }
}

impl Pipeline<Report> for PreverticalPipeline {
    fn run(&self) -> Result<Report, Error> {
        info!("extracting articles of {:?} into {:?}", self.src, self.dst);
        let mut articles = ArticleReader::from_path(&self.src)?;
        let mut writer = TextWriter::new(&self.dst)?;
        let mut report = Report::default();

        {
            let batches = articles.by_ref().chunks(self.bufsize);
            for (idx, batch) in (&batches).into_iter().enumerate() {
                // read errors are fatal, article errors are reported
                let batch: Vec<(usize, Result<Article, Error>)> =
                    batch.collect::<Result<_, _>>()?;
                let documents: Vec<Result<String, (String, Error)>> = batch
                    .into_par_iter()
                    .map(|(line, article)| match article {
                        Ok(article) => Ok(parse_wikimarkup(
                            article.id.unwrap_or_default(),
                            &article.title,
                            &self.url_prefix,
                            &article.text,
                            &self.options,
                        )),
                        Err(e) => Err((format!("line {}", line), e)),
                    })
                    .collect();

                for document in documents {
                    match document {
                        Ok(document) => {
                            writer.write(&document)?;
                            report.processed += 1;
                        }
                        Err((id, e)) => report.fail(id, e),
                    }
                }
                info!("batch {}: {} documents written", idx, writer.written());
            }
        }

        report.skipped = articles.skipped();
        writer.close()?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};

    use super::PreverticalPipeline;
    use crate::error::Error;
    use crate::markup::MarkupOptions;
    use crate::pipelines::Pipeline;

    #[test]
    fn batches_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("articles.jsonl");
        let dst = dir.path().join("prevert.txt");

        let mut f = std::fs::File::create(&src).unwrap();
        for i in 0..7 {
            writeln!(f, r#"{{"title": "T{}", "text": "Text {}."}}"#, i, i).unwrap();
        }
        writeln!(f, "{{broken").unwrap();
        writeln!(f, r#"{{"title": "R", "text": "", "redirect": true}}"#).unwrap();

        let pipeline = PreverticalPipeline::new(
            src,
            dst.clone(),
            "http://en.wikipedia.org/wiki".to_string(),
            MarkupOptions::default(),
        )
        .with_bufsize(3);
        let report = pipeline.run().unwrap();

        assert_eq!(report.processed, 7);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "line 8");

        let output = std::fs::read_to_string(&dst).unwrap();
        let ids: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("<doc "))
            .collect();
        assert_eq!(ids.len(), 7);
        for (i, header) in ids.iter().enumerate() {
            assert_eq!(
                *header,
                format!(
                    "<doc id=\"{}\" url=\"http://en.wikipedia.org/wiki/T{}\" title=\"T{}\">",
                    i + 1,
                    i,
                    i
                )
            );
        }
    }

    #[test]
    fn truncated_dump_fails() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("articles.jsonl.gz");
        let dst = dir.path().join("prevert.txt");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        for i in 0..200 {
            writeln!(encoder, r#"{{"title": "T{}", "text": "Text number {}."}}"#, i, i).unwrap();
        }
        let compressed = encoder.finish().unwrap();
        std::fs::write(&src, &compressed[..compressed.len() / 2]).unwrap();

        let result = PreverticalPipeline::new(
            src,
            dst,
            "http://en.wikipedia.org/wiki".to_string(),
            MarkupOptions::default(),
        )
        .with_bufsize(10)
        .run();
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
