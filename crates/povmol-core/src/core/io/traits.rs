use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading biological source files.
///
/// Implementors handle format-specific parsing and return the parsed content
/// together with whatever format metadata is worth keeping (headers, counts).
pub trait MoleculeFile {
    /// The parsed content of the file.
    type Content;

    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads the file content from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead)
    -> Result<(Self::Content, Self::Metadata), Self::Error>;

    /// Reads the file content from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Self::Content, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
