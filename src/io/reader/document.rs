/*! Vertical files reader.

Splits a file into documents (from a `<doc ...>` line to the next `</doc>` line).
Documents are checked for UTF-8 validity independently, so that an invalid document
doesn't prevent reading the others.
!*/
use std::io::BufRead;
use std::path::Path;

use lazy_static::lazy_static;
use log::warn;
use regex::bytes::Regex;

use crate::error::Error;

lazy_static! {
    static ref DOC_ID: Regex = Regex::new(r#"\bid="([^"]*)""#).unwrap();
}

/// A document, as read from a file.
#[derive(Debug)]
pub struct RawDocument {
    /// `id` attribute of the document, or its first line number when there is none.
    pub id: String,
    pub text: Result<String, Error>,
}

impl RawDocument {
    fn new(id: String, bytes: Vec<u8>) -> Self {
        Self {
            id,
            text: String::from_utf8(bytes).map_err(Error::from),
        }
    }
}

#[derive(Debug)]
pub enum Chunk {
    Document(RawDocument),
    /// Non-blank line outside of any document.
    Other(String),
}

pub struct DocumentReader<R> {
    reader: R,
    line: usize,
    /// line read but belonging to the next chunk
    carry: Option<Vec<u8>>,
}

impl DocumentReader<Box<dyn BufRead + Send>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::new(super::open(path)?))
    }
}

impl<R: BufRead> DocumentReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            carry: None,
        }
    }

    fn read_line(&mut self) -> Option<Result<Vec<u8>, Error>> {
        if let Some(line) = self.carry.take() {
            return Some(Ok(line));
        }
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                Some(Ok(buf))
            }
            Err(e) => Some(Err(e.into())),
        }
    }

    fn document_id(&self, header: &[u8]) -> String {
        DOC_ID
            .captures(header)
            .map(|caps| String::from_utf8_lossy(&caps[1]).into_owned())
            .unwrap_or_else(|| format!("line {}", self.line))
    }
}

fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |end| end + 1);
    &line[start..end]
}

fn opens_document(line: &[u8]) -> bool {
    line.starts_with(b"<doc ") || line == b"<doc>"
}

impl<R: BufRead> Iterator for DocumentReader<R> {
    type Item = Result<Chunk, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let finish = |(id, bytes): (String, Vec<u8>)| -> Result<Chunk, Error> {
            Ok(Chunk::Document(RawDocument::new(id, bytes)))
        };
        let mut document: Option<(String, Vec<u8>)> = None;

        loop {
            let line = match self.read_line() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    if let Some((id, _)) = &document {
                        warn!("document {} is not closed", id);
                    }
                    return document.map(finish);
                }
            };

            let trimmed = trim(&line);
            let opens = opens_document(trimmed);
            let closes = trimmed == b"</doc>";

            if document.is_none() {
                if opens {
                    document = Some((self.document_id(trimmed), line));
                } else if !trimmed.is_empty() {
                    return Some(Ok(Chunk::Other(
                        String::from_utf8_lossy(trimmed).into_owned(),
                    )));
                }
                continue;
            }

            if opens {
                if let Some((id, _)) = &document {
                    warn!("document {} is not closed", id);
                }
                self.carry = Some(line);
                return document.map(finish);
            }

            if let Some((_, bytes)) = document.as_mut() {
                bytes.extend_from_slice(&line);
            }
            if closes {
                return document.map(finish);
            }
        }
    }
}
