use std::path::PathBuf;

use thiserror::Error;

use crate::roster::Side;

/// Fatal failures of a page fetch. Any of these means no lines are returned.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("could not start WebDriver session at {url}: {source}")]
    Session {
        url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: fantoccini::error::CmdError,
    },

    #[error("play-by-play table `{selector}` did not appear within {secs}s")]
    PageLoadTimeout { selector: String, secs: u64 },

    #[error("browser command failed: {0}")]
    Browser(#[from] fantoccini::error::CmdError),
}

/// A single table row whose cells could not be read. Logged and skipped, never fatal.
#[derive(Error, Debug)]
#[error("row {index}: missing cell `{selector}`: {source}")]
pub struct RowExtractionError {
    pub index: usize,
    pub selector: String,
    #[source]
    pub source: fantoccini::error::CmdError,
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid rosters in {path}: {source}")]
    Rosters {
        path: PathBuf,
        #[source]
        source: RosterError,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RosterError {
    #[error("{side} has {len} players, expected 5")]
    WrongSize { side: Side, len: usize },

    #[error("{side} lists {name} more than once")]
    Duplicate { side: Side, name: String },
}
