//! Error enum
use std::fmt;
use std::string::FromUtf8Error;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Tagset name that is not one of `basic`, `desamb`, `treetagger`.
    UnknownTagset(String),
    /// Article or document that is not valid UTF-8.
    Encoding(FromUtf8Error),
    Serde(serde_json::Error),
    Csv(csv::Error),
    /// External tagger pipeline failure.
    Tagger(String),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::UnknownTagset(name) => write!(f, "unknown tagset: {:?}", name),
            Error::Encoding(e) => write!(f, "invalid utf-8: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Csv(e) => write!(f, "term list error: {}", e),
            Error::Tagger(msg) => write!(f, "tagger failed: {}", msg),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(e: FromUtf8Error) -> Error {
        Error::Encoding(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}
