//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "wikicorpus", about = "wiki corpus building tool.")]
/// Holds every command that is callable by the `wikicorpus` command.
pub enum Wikicorpus {
    #[structopt(about = "Extract articles into a prevertical file")]
    Prevertical(Prevertical),
    #[structopt(about = "Take a sample of an article dump")]
    Sample(Sample),
    #[structopt(about = "Run the tagger of a language over a prevertical file")]
    Verticalize(Verticalize),
    #[structopt(about = "Collect the explicit terms of a vertical file")]
    Terms(Terms),
    #[structopt(about = "Annotate term occurrences in a vertical file")]
    Annotate(Annotate),
}

#[derive(Debug, StructOpt)]
/// Prevertical command and parameters.
///
/// ```sh
/// wikicorpus-prevertical 0.3.0
/// Extract articles into a prevertical file
///
/// USAGE:
///     wikicorpus prevertical [FLAGS] [OPTIONS] <src> <dst>
///
/// FLAGS:
///         --no-links       keep the text of links only
///         --no-sections    don't keep sections (lists are kept)
///
/// OPTIONS:
///     -l, --lang <lang>                wiki language [default: en]
///         --url-prefix <url-prefix>    article url prefix (defaults to the wiki of --lang)
///     -s, --chunk_size <bufsize>       number of articles processed at once [default: 500]
///
/// ARGS:
///     <src>    articles (JSON lines, optionally gzipped)
///     <dst>    prevertical destination
/// ```
pub struct Prevertical {
    #[structopt(parse(from_os_str), help = "articles (JSON lines, optionally gzipped)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "prevertical destination")]
    pub dst: PathBuf,
    #[structopt(short = "l", long = "lang", default_value = "en", help = "wiki language")]
    pub lang: String,
    #[structopt(
        long = "url-prefix",
        help = "article url prefix (defaults to the wiki of --lang)"
    )]
    pub url_prefix: Option<String>,
    #[structopt(long = "no-links", help = "keep the text of links only")]
    pub no_links: bool,
    #[structopt(long = "no-sections", help = "don't keep sections (lists are kept)")]
    pub no_sections: bool,
    #[structopt(
        help = "number of articles processed at once",
        long = "chunk_size",
        default_value = "500",
        short = "s"
    )]
    pub bufsize: usize,
}

#[derive(Debug, StructOpt)]
pub struct Sample {
    #[structopt(parse(from_os_str), help = "articles (JSON lines, optionally gzipped)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "sample destination (JSON lines)")]
    pub dst: PathBuf,
    #[structopt(short = "n", long = "size", help = "number of articles")]
    pub size: usize,
    #[structopt(
        parse(from_os_str),
        long = "titles",
        help = "only sample the articles listed in this file (one title per line)"
    )]
    pub titles: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct Verticalize {
    #[structopt(parse(from_os_str), help = "prevertical file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "vertical destination")]
    pub dst: PathBuf,
    #[structopt(short = "l", long = "lang", default_value = "en", help = "wiki language")]
    pub lang: String,
    #[structopt(
        long = "command",
        help = "tagger command line (defaults to the tagger of --lang)"
    )]
    pub command: Option<String>,
}

#[derive(Debug, StructOpt)]
pub struct Terms {
    #[structopt(parse(from_os_str), help = "vertical file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "term list destination (TSV)")]
    pub dst: PathBuf,
    #[structopt(
        short = "t",
        long = "tagset",
        help = "tagset of the vertical (basic, desamb, treetagger)"
    )]
    pub tagset: String,
    #[structopt(
        help = "number of documents processed at once",
        long = "chunk_size",
        default_value = "500",
        short = "s"
    )]
    pub bufsize: usize,
}

#[derive(Debug, StructOpt)]
pub struct Annotate {
    #[structopt(parse(from_os_str), help = "vertical file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "annotated vertical destination")]
    pub dst: PathBuf,
    #[structopt(
        short = "t",
        long = "tagset",
        help = "tagset of the vertical (basic, desamb, treetagger)"
    )]
    pub tagset: String,
    #[structopt(
        parse(from_os_str),
        long = "terms",
        help = "term list (TSV) shared by all documents"
    )]
    pub terms: Option<PathBuf>,
    #[structopt(
        long = "no-document-terms",
        help = "don't look for the explicit terms of each document"
    )]
    pub no_document_terms: bool,
    #[structopt(
        help = "number of documents processed at once",
        long = "chunk_size",
        default_value = "500",
        short = "s"
    )]
    pub chunk_size: usize,
}
