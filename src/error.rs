//! Run-level errors.
//!
//! Rows that fail validation are not errors; they are counted as skips by
//! the executor. Everything here stops the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("cannot open input file '{}': {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("cannot create output file '{}': {source}", path.display())]
    CreateOutput { path: PathBuf, source: io::Error },

    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;
