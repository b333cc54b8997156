/*! Sample dumps.

Takes the first `size` articles of a dump, or only the articles whose titles are listed,
and writes them back as JSON lines. Pages that are not articles are never sampled.
!*/
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::{Pipeline, Report};
use crate::error::Error;
use crate::io::{ArticleReader, TextWriter};

/// Reads a title list, one title per line. Blank lines are ignored.
pub fn load_titles<P: AsRef<Path>>(path: P) -> Result<HashSet<String>, Error> {
    let titles = std::fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(String::from)
        .collect();
    Ok(titles)
}

pub struct SamplePipeline {
    src: PathBuf,
    dst: PathBuf,
    size: usize,
    titles: Option<HashSet<String>>,
}

impl SamplePipeline {
    pub fn new(src: PathBuf, dst: PathBuf, size: usize) -> Self {
        Self {
            src,
            dst,
            size,
            titles: None,
        }
    }

    /// Restricts the sample to these titles.
    pub fn with_titles(mut self, titles: Option<HashSet<String>>) -> Self {
        self.titles = titles;
        self
    }
}

impl Pipeline<Report> for SamplePipeline {
    fn run(&self) -> Result<Report, Error> {
        if self.size == 0 {
            return Err(Error::Custom("sample size has to be positive".to_string()));
        }
        info!(
            "sampling {} articles of {:?} into {:?}",
            self.size, self.src, self.dst
        );

        let mut articles = ArticleReader::from_path(&self.src)?;
        let mut writer = TextWriter::new(&self.dst)?;
        let mut wanted = self.titles.clone();
        let mut report = Report::default();

        for item in articles.by_ref() {
            let (line, article) = item?;
            let article = match article {
                Ok(article) => article,
                Err(e) => {
                    report.fail(format!("line {}", line), e);
                    continue;
                }
            };
            if let Some(titles) = wanted.as_mut() {
                if !titles.remove(&article.title) {
                    continue;
                }
            }

            writer.write(&serde_json::to_string(&article)?)?;
            report.processed += 1;
            if report.processed == self.size {
                break;
            }
        }
        report.skipped = articles.skipped();
        writer.close()?;

        if report.processed < self.size {
            warn!(
                "sample of {} articles requested, only {} found",
                self.size, report.processed
            );
            if let Some(titles) = wanted {
                let mut missing: Vec<_> = titles.into_iter().collect();
                missing.sort();
                for title in missing {
                    warn!("article {:?} not found", title);
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use super::{load_titles, SamplePipeline};
    use crate::error::Error;
    use crate::markup::Article;
    use crate::pipelines::Pipeline;

    const DUMP: &str = r#"{"title": "A", "text": "a"}
{"title": "Talk:A", "text": "", "ns": 1}
{"title": "B", "text": "", "redirect": true}
{"title": "C", "text": "c"}
{"title": "D", "text": "d"}
{"title": "E", "text": "e"}
"#;

    fn dump(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("dump.jsonl");
        std::fs::write(&path, DUMP).unwrap();
        path
    }

    fn sampled(path: &PathBuf) -> Vec<Article> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn first_articles() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("sample.jsonl");

        let report = SamplePipeline::new(dump(&dir), dst.clone(), 3)
            .run()
            .unwrap();
        assert_eq!(report.processed, 3);
        assert_eq!(report.skipped, 2);

        let titles: Vec<_> = sampled(&dst).into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["A", "C", "D"]);
    }

    #[test]
    fn listed_titles() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("sample.jsonl");
        let titles: HashSet<String> = ["E", "B", "Missing", "A"]
            .iter()
            .map(|t| t.to_string())
            .collect();

        let report = SamplePipeline::new(dump(&dir), dst.clone(), 10)
            .with_titles(Some(titles))
            .run()
            .unwrap();
        assert_eq!(report.processed, 2);

        let articles = sampled(&dst);
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "E"]);
        // ids are positions among all the articles of the dump
        assert_eq!(articles[1].id, Some(4));
    }

    #[test]
    fn empty_sample() {
        let dir = tempfile::tempdir().unwrap();
        let result = SamplePipeline::new(dump(&dir), dir.path().join("sample.jsonl"), 0).run();
        assert!(matches!(result, Err(Error::Custom(_))));
    }

    #[test]
    fn titles_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.txt");
        std::fs::write(&path, "Prague\n\n  New York \n").unwrap();

        let titles = load_titles(&path).unwrap();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains("New York"));
    }
}
