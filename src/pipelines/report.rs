//! Batch run reports.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::Error;

/// What a batch pipeline did.
///
/// Per-document failures don't stop a run: they are logged and kept here.
#[derive(Debug, Default)]
pub struct Report {
    pub processed: usize,
    pub skipped: usize,
    /// (document id, error)
    pub failed: Vec<(String, Error)>,
}

impl Report {
    pub fn fail(&mut self, id: String, e: Error) {
        error!("{}: {}", id, e);
        self.failed.push((id, e));
    }

    /// `<dst>.errors`
    pub fn errors_path(dst: &Path) -> PathBuf {
        let mut path = dst.as_os_str().to_owned();
        path.push(".errors");
        PathBuf::from(path)
    }

    /// Writes failures (`id\terror` lines) to `path`.
    /// Nothing is written when there are no failures.
    pub fn write_errors(&self, path: &Path) -> Result<(), Error> {
        if self.failed.is_empty() {
            return Ok(());
        }
        let mut w = BufWriter::new(File::create(path)?);
        for (id, e) in &self.failed {
            writeln!(w, "{}\t{}", id, e)?;
        }
        w.flush()?;
        info!("{} failures written to {:?}", self.failed.len(), path);
        Ok(())
    }

    pub fn log(&self, name: &str) {
        info!(
            "{}: {} processed, {} skipped, {} failed",
            name,
            self.processed,
            self.skipped,
            self.failed.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::Report;
    use crate::error::Error;

    #[test]
    fn errors_path() {
        assert_eq!(
            Report::errors_path(Path::new("out/en.vert.gz")),
            Path::new("out/en.vert.gz.errors")
        );
    }

    #[test]
    fn write_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors");

        let mut report = Report::default();
        report.write_errors(&path).unwrap();
        assert!(!path.exists());

        report.fail("42".to_string(), Error::Custom("boom".to_string()));
        report.write_errors(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "42\tboom\n");
    }
}
