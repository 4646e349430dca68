use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid nucleotide '{found}' at position {position}")]
    InvalidBase { position: usize, found: char },
    #[error("Sequence is empty")]
    Empty,
}

/// A nucleotide base. `U` only appears in transcribed (RNA) strands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
    U,
}

impl Base {
    /// The base paired with this one on the opposite DNA strand.
    pub fn complement(self) -> Self {
        match self {
            Base::A => Base::T,
            Base::T | Base::U => Base::A,
            Base::C => Base::G,
            Base::G => Base::C,
        }
    }

    /// The base as it appears in the RNA transcript.
    pub fn transcribed(self) -> Self {
        match self {
            Base::T => Base::U,
            other => other,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
            Base::U => 'U',
        }
    }
}

impl TryFrom<char> for Base {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'T' => Ok(Base::T),
            'U' => Ok(Base::U),
            _ => Err(c),
        }
    }
}

/// An ordered nucleotide sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    bases: Vec<Base>,
}

impl Sequence {
    pub fn new(bases: Vec<Base>) -> Self {
        Self { bases }
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Base> {
        self.bases.get(index).copied()
    }

    /// Position of the first occurrence of `motif`.
    pub fn find(&self, motif: &Sequence) -> Option<usize> {
        if motif.is_empty() || motif.len() > self.len() {
            return None;
        }
        self.bases
            .windows(motif.len())
            .position(|window| window == motif.bases())
    }

    /// Splits at the first occurrence of `motif`; the motif starts the second part.
    pub fn split_at_motif(&self, motif: &Sequence) -> Option<(Sequence, Sequence)> {
        let at = self.find(motif)?;
        let (pre, post) = self.bases.split_at(at);
        Some((Sequence::new(pre.to_vec()), Sequence::new(post.to_vec())))
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bases = s
            .chars()
            .enumerate()
            .map(|(position, c)| {
                Base::try_from(c).map_err(|found| SequenceError::InvalidBase { position, found })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if bases.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self { bases })
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.bases {
            write!(f, "{}", base.symbol())?;
        }
        Ok(())
    }
}
