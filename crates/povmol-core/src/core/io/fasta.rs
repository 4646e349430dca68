use crate::core::io::traits::MoleculeFile;
use crate::core::models::sequence::{Base, Sequence};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FastaMetadata {
    pub headers: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid nucleotide '{found}' at position {position} (only A, C, G and T are allowed)")]
    InvalidNucleotide { position: usize, found: char },
    #[error("FASTA input contains no sequence")]
    Empty,
}

/// Single-record DNA FASTA reader; header lines are kept, sequence lines are joined.
pub struct FastaFile;

impl MoleculeFile for FastaFile {
    type Content = Sequence;
    type Metadata = FastaMetadata;
    type Error = FastaError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(Self::Content, Self::Metadata), Self::Error> {
        let mut metadata = FastaMetadata::default();
        let mut raw = String::new();
        for line in reader.lines() {
            let line = line?;
            if line.contains('>') {
                metadata.headers.push(line.trim().to_string());
                continue;
            }
            raw.push_str(line.trim());
        }

        let bases = raw
            .chars()
            .enumerate()
            .map(|(position, c)| match Base::try_from(c) {
                Ok(base) if base != Base::U => Ok(base),
                _ => Err(FastaError::InvalidNucleotide {
                    position,
                    found: c.to_ascii_uppercase(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if bases.is_empty() {
            return Err(FastaError::Empty);
        }

        debug!(
            length = bases.len(),
            headers = metadata.headers.len(),
            "Parsed FASTA sequence."
        );
        Ok((Sequence::new(bases), metadata))
    }
}
