/*! External tagger runner.

Prevertical files are turned into vertical ones by external, per-language tools
(tokenizers, taggers, lemmatizers) that read the prevertical on their standard input
and write the vertical on their standard output.

The output is first written to `<dst>.tmp` and only moved to `<dst>` once the command succeeded.
!*/
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use lazy_static::lazy_static;
use log::{debug, info, warn};

use super::Pipeline;
use crate::error::Error;
use crate::vertical::Tagset;

/// Tagger command line and the tagset of its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggerConfig {
    pub command: &'static str,
    pub tagset: Tagset,
}

const fn treetagger(command: &'static str) -> TaggerConfig {
    TaggerConfig {
        command,
        tagset: Tagset::TreeTagger,
    }
}

/// Tokenization only, for languages without a dedicated tagger.
static DEFAULT_TAGGER: TaggerConfig = TaggerConfig {
    command: "unitok_and_sentences -l other",
    tagset: Tagset::Basic,
};

lazy_static! {
    static ref TAGGERS: HashMap<&'static str, TaggerConfig> = [
        ("bg", treetagger("/opt/TreeTagger/tools/tt-bulgarian.sh")),
        (
            "cs",
            TaggerConfig {
                command: "/opt/majka_pipe/majka-czech.sh",
                tagset: Tagset::Desamb,
            }
        ),
        ("de", treetagger("/opt/RFTagger/tools/rft-tt-german.sh")),
        ("en", treetagger("/opt/TreeTagger/tools/tt-english.sh")),
        ("et", treetagger("/opt/TreeTagger/tools/tt-estonian.sh")),
        ("fi", treetagger("/opt/TreeTagger/tools/tt-finnish.sh")),
        ("fr", treetagger("/opt/TreeTagger/tools/tt-french.sh")),
        ("it", treetagger("/opt/TreeTagger/tools/tt-italian-mb.sh")),
        ("nl", treetagger("/opt/TreeTagger/tools/tt-dutch.sh")),
        ("ru", treetagger("/opt/RFTagger/tools/rft-tt-russian.sh")),
        (
            "yo",
            TaggerConfig {
                command: "unitok_and_sentences -l yoruba -a",
                tagset: Tagset::Basic,
            }
        ),
        (
            "ne",
            TaggerConfig {
                command: "unitok_and_sentences -l devanagari -a",
                tagset: Tagset::Basic,
            }
        ),
    ]
    .into_iter()
    .collect();
}

/// Tagger used for `lang`, defaulting to plain tokenization.
pub fn tagger_for(lang: &str) -> &'static TaggerConfig {
    TAGGERS.get(lang).unwrap_or(&DEFAULT_TAGGER)
}

/// Article url prefix of the Wikipedia of `lang`.
pub fn url_prefix(lang: &str) -> String {
    format!("http://{}.wikipedia.org/wiki", lang)
}

/// Runs a tagger command over a prevertical file.
pub struct Verticalizer {
    src: PathBuf,
    dst: PathBuf,
    command: String,
}

impl Verticalizer {
    pub fn new(src: PathBuf, dst: PathBuf, command: String) -> Self {
        Self { src, dst, command }
    }

    /// Uses the default tagger of `lang`.
    pub fn for_language(src: PathBuf, dst: PathBuf, lang: &str) -> Self {
        let tagger = tagger_for(lang);
        info!(
            "[{}] tagging with {:?} ({} tagset)",
            lang, tagger.command, tagger.tagset
        );
        Self::new(src, dst, tagger.command.to_string())
    }

    fn tmp_path(dst: &Path) -> PathBuf {
        let mut path = dst.as_os_str().to_owned();
        path.push(".tmp");
        PathBuf::from(path)
    }
}

impl Pipeline<()> for Verticalizer {
    fn run(&self) -> Result<(), Error> {
        let tmp = Self::tmp_path(&self.dst);
        debug!("running {:?} on {:?} into {:?}", self.command, self.src, tmp);

        let input = File::open(&self.src)?;
        let output = File::create(&tmp)?;
        let status = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::from(input))
            .stdout(Stdio::from(output))
            .status()?;

        if !status.success() {
            if let Err(e) = fs::remove_file(&tmp) {
                warn!("could not remove {:?}: {}", tmp, e);
            }
            return Err(Error::Tagger(format!(
                "{:?} exited with {}",
                self.command, status
            )));
        }

        fs::rename(&tmp, &self.dst)?;
        info!("vertical written to {:?}", self.dst);
        Ok(())
    }
}
