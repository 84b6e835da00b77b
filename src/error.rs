use thiserror::Error;

use crate::config::{LoadError, SchemaError, SectionError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Section(#[from] SectionError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Several sections failed; one entry per section.
    #[error("{} section(s) failed validation", .0.len())]
    Sections(Vec<SectionError>),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Vec<SectionError>> for Error {
    fn from(errors: Vec<SectionError>) -> Self {
        Error::Sections(errors)
    }
}
