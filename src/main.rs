//! # wikicorpus
//!
//! Builds annotated corpora out of Wikipedia dumps.
//!
//! ## Getting started
//!
//! ```sh
//! wikicorpus 0.3.0
//! wiki corpus building tool.
//!
//! USAGE:
//!     wikicorpus <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     annotate       Annotate term occurrences in a vertical file
//!     help           Prints this message or the help of the given subcommand(s)
//!     prevertical    Extract articles into a prevertical file
//!     sample         Take a sample of an article dump
//!     terms          Collect the explicit terms of a vertical file
//!     verticalize    Run the tagger of a language over a prevertical file
//! ```
//!
//! A typical run goes `prevertical` → `verticalize` → `annotate`.
use std::path::Path;

use structopt::StructOpt;
use wikicorpus::error::Error;
use wikicorpus::markup::MarkupOptions;
use wikicorpus::pipelines::{
    sample, tagger, AnnotatePipeline, Pipeline, PreverticalPipeline, Report, SamplePipeline,
    TermsPipeline, Verticalizer,
};
use wikicorpus::terms::InferenceOptions;
use wikicorpus::vertical::Tagset;

#[macro_use]
extern crate log;

mod cli;

/// Logs the report and writes its failures next to `dst`.
fn finish(name: &str, report: Report, dst: &Path) -> Result<(), Error> {
    report.log(name);
    report.write_errors(&Report::errors_path(dst))
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Wikicorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Wikicorpus::Prevertical(p) => {
            let options = MarkupOptions {
                keep_links: !p.no_links,
                keep_sections: !p.no_sections,
                ..Default::default()
            };
            let url_prefix = p.url_prefix.unwrap_or_else(|| tagger::url_prefix(&p.lang));
            let pipeline = PreverticalPipeline::new(p.src, p.dst.clone(), url_prefix, options)
                .with_bufsize(p.bufsize);
            finish("prevertical", pipeline.run()?, &p.dst)?;
        }

        cli::Wikicorpus::Sample(s) => {
            let titles = match &s.titles {
                Some(path) => Some(sample::load_titles(path)?),
                None => None,
            };
            let pipeline = SamplePipeline::new(s.src, s.dst.clone(), s.size).with_titles(titles);
            finish("sample", pipeline.run()?, &s.dst)?;
        }

        cli::Wikicorpus::Verticalize(v) => {
            let verticalizer = match v.command {
                Some(command) => Verticalizer::new(v.src, v.dst, command),
                None => Verticalizer::for_language(v.src, v.dst, &v.lang),
            };
            verticalizer.run()?;
        }

        cli::Wikicorpus::Terms(t) => {
            let tagset: Tagset = t.tagset.parse()?;
            let pipeline =
                TermsPipeline::new(t.src, t.dst.clone(), tagset).with_bufsize(t.bufsize);
            finish("terms", pipeline.run()?, &t.dst)?;
        }

        cli::Wikicorpus::Annotate(a) => {
            let tagset: Tagset = a.tagset.parse()?;
            let options = InferenceOptions {
                use_document_terms: !a.no_document_terms,
            };
            let pipeline = AnnotatePipeline::new(a.src, a.dst.clone(), tagset)
                .with_terms(a.terms)
                .with_options(options)
                .with_chunk_size(a.chunk_size);
            finish("annotate", pipeline.run()?, &a.dst)?;
        }
    };
    Ok(())
}
