/*! Readers

* [ArticleReader]: articles from JSON lines dumps.
* [DocumentReader]: documents of vertical (or prevertical) files.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Error;

mod article;
mod document;

pub use article::ArticleReader;
pub use document::{Chunk, DocumentReader, RawDocument};

/// Buffered reader over a file, decompressing it when its name ends with `.gz`.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead + Send>, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if super::is_gzip(path) {
        // dumps may be concatenated gzip members
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
