/*!
# Text writing

[TextWriter] writes documents (or any text) to a file, gzipping it when its name ends with `.gz`.

The writer has to be [TextWriter::close]d in order to finish the gzip stream and catch write errors.
!*/
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::{write::GzEncoder, Compression};

use crate::error::Error;

enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

pub struct TextWriter {
    sink: Sink,
    written: usize,
}

impl TextWriter {
    /// Creates (or truncates) the file at `dst`.
    pub fn new<P: AsRef<Path>>(dst: P) -> Result<Self, Error> {
        let dst = dst.as_ref();
        let file = BufWriter::new(File::create(dst)?);
        let sink = if super::is_gzip(dst) {
            Sink::Gzip(GzEncoder::new(file, Compression::default()))
        } else {
            Sink::Plain(file)
        };
        Ok(Self { sink, written: 0 })
    }

    /// Writes `text`, adding a trailing newline if there's none.
    pub fn write(&mut self, text: &str) -> Result<(), Error> {
        let sink: &mut dyn Write = match &mut self.sink {
            Sink::Plain(w) => w,
            Sink::Gzip(w) => w,
        };
        sink.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            sink.write_all(b"\n")?;
        }
        self.written += 1;
        Ok(())
    }

    /// Number of texts written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and closes the file.
    pub fn close(self) -> Result<(), Error> {
        let mut file = match self.sink {
            Sink::Plain(w) => w,
            Sink::Gzip(w) => w.finish()?,
        };
        file.flush()?;
        Ok(())
    }
}
