use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::builders::nucleic::NucleicError;
use crate::core::io::fasta::FastaError;
use crate::core::io::pdb::PdbError;
use crate::core::models::molecule::ModelError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Molecule operation failed: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to read PDB input: {0}")]
    Pdb(#[from] PdbError),

    #[error("Failed to read FASTA input: {0}")]
    Fasta(#[from] FastaError),

    #[error("Invalid DNA input: {0}")]
    Nucleic(#[from] NucleicError),

    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "{count} existing file(s) matching '{pattern}' in '{}' would be overwritten",
        dir.display()
    )]
    OutputExists {
        dir: PathBuf,
        pattern: String,
        count: usize,
    },

    #[error("Frame {step} is out of range (the animation has {frame_count} frames)")]
    InvalidFrame { step: usize, frame_count: usize },

    #[error("Failed to build the frame worker pool: {0}")]
    Pool(String),

    #[error("Frame {step} failed: {source}")]
    Frame {
        step: usize,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}
