//! Error taxonomy for wall operations.
//!
//! Validation failures (bad app type, out-of-bounds frame, unknown section)
//! are typed so callers can tell them apart. Remote I/O failures never show
//! up here: the `RestClient` swallows and logs them at the HTTP boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::apps::AppKind;


#[derive(Debug, Error)]
pub enum WallError {
    #[error("'{given}' is not a valid app type ({supported} are supported)")]
    InvalidAppType { given: String, supported: String },

    #[error("section not created: {w}x{h} at ({x},{y}) would extend beyond the space")]
    OutOfBounds { x: u32, y: u32, w: u32, h: u32 },

    #[error("no section with id '{0}'")]
    UnknownSection(String),

    #[error("section '{id}' hosts a {actual} app, not {expected}")]
    KindMismatch {
        id: String,
        expected: AppKind,
        actual: AppKind,
    },

    #[error("must specify either a json or a gexf source URL")]
    MissingGraphSource,

    #[error("layout parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("file does not exist: {0}")]
    MissingFile(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
