//! Article dumps reader.
use std::io::BufRead;
use std::path::Path;

use log::debug;

use crate::error::Error;
use crate::markup::Article;

/// Iterator over the articles of a JSON lines dump.
///
/// Yields `(line number, article)`. Pages that are not articles (other namespaces, redirects)
/// are skipped, and articles without id are numbered by their position in the output, from 1.
/// Lines that aren't valid UTF-8 or valid JSON are yielded as article errors,
/// while a failing read (e.g. a truncated gzip stream) ends the iteration with an `Err`.
pub struct ArticleReader<R> {
    reader: R,
    line: usize,
    emitted: u64,
    skipped: usize,
    done: bool,
}

impl ArticleReader<Box<dyn BufRead + Send>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::new(super::open(path)?))
    }
}

impl<R: BufRead> ArticleReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            emitted: 0,
            skipped: 0,
            done: false,
        }
    }

    /// Number of pages skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for ArticleReader<R> {
    type Item = Result<(usize, Result<Article, Error>), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let mut buf = Vec::new();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let line = match String::from_utf8(buf) {
                        Ok(line) => line,
                        Err(e) => return Some(Ok((self.line, Err(e.into())))),
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    let mut article: Article = match serde_json::from_str(&line) {
                        Ok(article) => article,
                        Err(e) => return Some(Ok((self.line, Err(e.into())))),
                    };
                    if !article.is_content() {
                        debug!(
                            "skipping {:?} (namespace {}, redirect: {})",
                            article.title, article.ns, article.redirect
                        );
                        self.skipped += 1;
                        continue;
                    }

                    self.emitted += 1;
                    article.id.get_or_insert(self.emitted);
                    return Some(Ok((self.line, Ok(article))));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}
