/*!
# IO utilities

Reading of article dumps and vertical files, writing of text outputs.

Files ending with `.gz` are transparently (de)compressed.
!*/
use std::path::Path;

pub mod reader;
pub mod writer;

pub use reader::{ArticleReader, Chunk, DocumentReader, RawDocument};
pub use writer::TextWriter;

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}
