use crate::core::io::traits::MoleculeFile;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::ModelError;
use crate::core::palette;
use nalgebra::Point3;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

const MIN_ATOM_LINE_LEN: usize = 54;
const ELEMENT_LINE_LEN: usize = 78;
const CONECT_FIELD_WIDTH: usize = 5;
const CONECT_FIRST_FIELD: usize = 6;

/// Atoms and serial-resolved bonds (as atom indices) of the first model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbStructure {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    /// HEADER, TITLE, COMPND, REMARK and other non-coordinate records, verbatim.
    pub header_lines: Vec<String>,
    pub conect_records: usize,
    /// Atoms whose element had to be guessed from the atom name.
    pub guessed_elements: usize,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("CONECT record on line {line} references unknown atom serial {serial}")]
    UnknownSerial { line: usize, serial: usize },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Invalid molecule: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("CONECT line requires at least two atoms")]
    InvalidConectFormat,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

/// Element symbol for an atom name field (columns 13-16) without an element column.
///
/// Two-letter elements start in column 13 ("CA  " is calcium); otherwise the
/// symbol is the first letter of the name (" CA " is an alpha carbon).
fn guess_element(name_field: &str) -> String {
    let letters: String = name_field
        .trim()
        .chars()
        .skip_while(|c| c.is_ascii_digit())
        .take_while(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let starts_in_first_column = name_field.starts_with(|c: char| c.is_ascii_alphabetic());
    if starts_in_first_column && letters.len() >= 2 {
        let pair = &letters[..2];
        if palette::COVALENT_RADII.contains_key(pair) {
            return pair.to_string();
        }
    }
    letters.chars().take(1).collect()
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidFloat {
                columns: format!("{}-{}", start + 1, end),
                value: value.into(),
            },
        })
}

/// Serials of a CONECT record: fixed 5-column fields first, whitespace split as fallback.
fn parse_conect_serials(line: &str, line_num: usize) -> Result<Vec<usize>, PdbError> {
    let fixed: Option<Vec<usize>> = (CONECT_FIRST_FIELD..line.len())
        .step_by(CONECT_FIELD_WIDTH)
        .map(|start| slice_and_trim(line, start, start + CONECT_FIELD_WIDTH))
        .filter(|field| !field.is_empty())
        .map(|field| field.parse().ok())
        .collect();

    let serials = match fixed {
        Some(serials) => serials,
        None => line
            .split_whitespace()
            .skip(1)
            .map(|token| {
                token.parse().map_err(|_| PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::InvalidInt {
                        columns: "7-31".into(),
                        value: token.into(),
                    },
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    if serials.len() < 2 {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidConectFormat,
        });
    }
    Ok(serials)
}

pub struct PdbFile;

impl PdbFile {
    fn parse_atom(
        line: &str,
        line_num: usize,
        fallback_serial: usize,
    ) -> Result<(Atom, bool), PdbError> {
        if line.len() < MIN_ATOM_LINE_LEN {
            return Err(PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::LineTooShort,
            });
        }

        let serial_str = slice_and_trim(line, 6, 11);
        let serial = if serial_str.is_empty() {
            fallback_serial
        } else {
            serial_str.parse().map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidInt {
                    columns: "7-11".into(),
                    value: serial_str.into(),
                },
            })?
        };

        let raw_name = slice_and_trim(line, 12, 16);
        let x = parse_coordinate(line, line_num, 30, 38)?;
        let y = parse_coordinate(line, line_num, 38, 46)?;
        let z = parse_coordinate(line, line_num, 46, 54)?;

        let element_field = if line.len() >= ELEMENT_LINE_LEN {
            slice_and_trim(line, 76, 78)
        } else {
            ""
        };
        let guessed = element_field.is_empty();
        let element = if guessed {
            guess_element(line.get(12..16.min(line.len())).unwrap_or(""))
        } else {
            element_field.to_string()
        };

        let mut atom = Atom::new(raw_name, &element, Point3::new(x, y, z)).with_serial(serial);
        if guessed {
            atom.warnings.push(format!(
                "element missing on line {}; guessed '{}' from the atom name '{}'",
                line_num, element, raw_name
            ));
        }
        Ok((atom, guessed))
    }
}

impl MoleculeFile for PdbFile {
    type Content = PdbStructure;
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(Self::Content, Self::Metadata), Self::Error> {
        let mut structure = PdbStructure::default();
        let mut metadata = PdbMetadata::default();
        let mut index_of_serial: HashMap<usize, usize> = HashMap::new();
        let mut pending_conect: Vec<(usize, Vec<usize>)> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {
                    let fallback_serial = structure.atoms.len() + 1;
                    let (atom, guessed) = Self::parse_atom(&line, line_num, fallback_serial)?;
                    if index_of_serial
                        .insert(atom.serial, structure.atoms.len())
                        .is_some()
                    {
                        return Err(PdbError::Inconsistency(format!(
                            "Duplicate atom serial: {}",
                            atom.serial
                        )));
                    }
                    if guessed {
                        metadata.guessed_elements += 1;
                    }
                    structure.atoms.push(atom);
                }
                "CONECT" => {
                    pending_conect.push((line_num, parse_conect_serials(&line, line_num)?));
                    metadata.conect_records += 1;
                }
                "END" | "ENDMDL" => break,
                "" => {}
                _ => metadata.header_lines.push(line.clone()),
            }
        }

        if structure.atoms.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }

        let resolve = |line: usize, serial: usize| {
            index_of_serial
                .get(&serial)
                .copied()
                .ok_or(PdbError::UnknownSerial { line, serial })
        };
        for (line, serials) in pending_conect {
            let origin = resolve(line, serials[0])?;
            for &serial in &serials[1..] {
                let partner = resolve(line, serial)?;
                if partner == origin {
                    warn!(line, serial, "Ignoring CONECT self-reference.");
                    continue;
                }
                structure.bonds.push((origin.min(partner), origin.max(partner)));
            }
        }
        structure.bonds.sort_unstable();
        structure.bonds.dedup();

        if metadata.guessed_elements > 0 {
            warn!(
                count = metadata.guessed_elements,
                "Element columns missing; elements were guessed from atom names."
            );
        }
        debug!(
            atoms = structure.atoms.len(),
            bonds = structure.bonds.len(),
            "Parsed PDB structure."
        );
        Ok((structure, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn atom_line(record: &str, serial: usize, name: &str, xyz: [f64; 3], element: &str) -> String {
        format!(
            "{:<6}{:>5} {:<4} LIG A   1    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00          {:>2}",
            record, serial, name, xyz[0], xyz[1], xyz[2], element
        )
    }

    fn read(content: &str) -> Result<(PdbStructure, PdbMetadata), PdbError> {
        PdbFile::read_from(&mut Cursor::new(content.as_bytes()))
    }

    fn ethanol_pdb() -> String {
        [
            "HEADER    ETHANOL".to_string(),
            "COMPND    ETHANOL".to_string(),
            atom_line("HETATM", 1, "C1", [-0.748, 0.015, 0.024], "C"),
            atom_line("HETATM", 2, "C2", [0.558, 0.821, -0.044], "C"),
            atom_line("HETATM", 3, "O", [1.404, 0.424, -1.115], "O"),
            atom_line("HETATM", 4, "H1", [-1.314, 0.277, 0.915], "H"),
            "CONECT    1    2    4".to_string(),
            "CONECT    2    1    3".to_string(),
            "CONECT    3    2".to_string(),
            "END".to_string(),
        ]
        .join("\n")
    }

    #[test]
    fn reads_atoms_elements_and_coordinates() {
        let (structure, metadata) = read(&ethanol_pdb()).unwrap();
        assert_eq!(structure.atoms.len(), 4);
        let oxygen = &structure.atoms[2];
        assert_eq!(oxygen.serial, 3);
        assert_eq!(oxygen.name, "O");
        assert_eq!(oxygen.element, "O");
        assert_eq!(oxygen.position, Point3::new(1.404, 0.424, -1.115));
        assert_eq!(structure.atoms[3].name, "H");
        assert_eq!(metadata.header_lines, vec!["HEADER    ETHANOL", "COMPND    ETHANOL"]);
        assert_eq!(metadata.guessed_elements, 0);
    }

    #[test]
    fn conect_records_become_deduplicated_index_bonds() {
        let (structure, metadata) = read(&ethanol_pdb()).unwrap();
        assert_eq!(metadata.conect_records, 3);
        assert_eq!(structure.bonds, vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    fn conect_resolves_serials_not_positions() {
        let content = [
            atom_line("ATOM", 10, "N", [0.0, 0.0, 0.0], "N"),
            atom_line("ATOM", 20, "CA", [1.45, 0.0, 0.0], "C"),
            "CONECT   10   20".to_string(),
        ]
        .join("\n");
        let (structure, _) = read(&content).unwrap();
        assert_eq!(structure.bonds, vec![(0, 1)]);
    }

    #[test]
    fn conect_falls_back_to_whitespace_fields() {
        let content = [
            atom_line("ATOM", 1, "N", [0.0, 0.0, 0.0], "N"),
            atom_line("ATOM", 2, "CA", [1.45, 0.0, 0.0], "C"),
            "CONECT 1 2".to_string(),
        ]
        .join("\n");
        let (structure, _) = read(&content).unwrap();
        assert_eq!(structure.bonds, vec![(0, 1)]);
    }

    #[test]
    fn unknown_conect_serial_is_an_error() {
        let content = [
            atom_line("ATOM", 1, "N", [0.0, 0.0, 0.0], "N"),
            "CONECT    1    7".to_string(),
        ]
        .join("\n");
        assert!(matches!(
            read(&content),
            Err(PdbError::UnknownSerial { line: 2, serial: 7 })
        ));
    }

    #[test]
    fn missing_element_columns_are_guessed_with_a_warning() {
        let full = atom_line("ATOM", 1, "OH", [0.0, 0.0, 0.0], "O");
        let short = &full[..MIN_ATOM_LINE_LEN];
        let (structure, metadata) = read(short).unwrap();
        assert_eq!(structure.atoms[0].name, "OH");
        assert_eq!(structure.atoms[0].element, "O");
        assert_eq!(structure.atoms[0].warnings.len(), 1);
        assert_eq!(metadata.guessed_elements, 1);
    }

    #[test]
    fn guessed_elements_follow_name_alignment() {
        let line = |name_field: &str| {
            format!(
                "{:<6}{:>5} {} ALA A   1    {:>8.3}{:>8.3}{:>8.3}",
                "ATOM", 1, name_field, 0.0, 0.0, 0.0
            )
        };
        let content = [line(" CA "), line("CA  "), line("1HB "), line("FE  "), line(" N  ")].join("\n");
        let (structure, metadata) = read(&content).unwrap();
        let elements: Vec<_> = structure.atoms.iter().map(|a| a.element.as_str()).collect();
        assert_eq!(elements, vec!["C", "CA", "H", "FE", "N"]);
        assert_eq!(structure.atoms[0].name, "CA");
        assert_eq!(metadata.guessed_elements, 5);
    }

    #[test]
    fn short_atom_line_is_a_parse_error() {
        let full = atom_line("ATOM", 1, "N", [0.0, 0.0, 0.0], "N");
        match read(&full[..40]) {
            Err(PdbError::Parse { line, kind }) => {
                assert_eq!(line, 1);
                assert_eq!(kind, PdbParseErrorKind::LineTooShort);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn bad_coordinate_reports_columns() {
        let mut line = atom_line("ATOM", 1, "N", [0.0, 0.0, 0.0], "N");
        line.replace_range(38..46, "   abcde");
        match read(&line) {
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { columns, value },
                ..
            }) => {
                assert_eq!(columns, "39-46");
                assert_eq!(value, "abcde");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn file_without_atoms_is_missing_record() {
        assert!(matches!(
            read("HEADER    EMPTY\nEND\n"),
            Err(PdbError::MissingRecord(_))
        ));
    }

    #[test]
    fn only_first_model_is_read() {
        let content = [
            "MODEL        1".to_string(),
            atom_line("ATOM", 1, "N", [0.0, 0.0, 0.0], "N"),
            "ENDMDL".to_string(),
            "MODEL        2".to_string(),
            atom_line("ATOM", 1, "N", [9.0, 9.0, 9.0], "N"),
            "ENDMDL".to_string(),
        ]
        .join("\n");
        let (structure, _) = read(&content).unwrap();
        assert_eq!(structure.atoms.len(), 1);
        assert_eq!(structure.atoms[0].position, Point3::origin());
    }

    #[test]
    fn duplicate_serials_are_inconsistent() {
        let content = [
            atom_line("ATOM", 5, "N", [0.0, 0.0, 0.0], "N"),
            atom_line("ATOM", 5, "C", [1.0, 0.0, 0.0], "C"),
        ]
        .join("\n");
        assert!(matches!(read(&content), Err(PdbError::Inconsistency(_))));
    }

    #[test]
    fn read_from_path_reads_a_file_on_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ethanol_pdb().as_bytes()).unwrap();
        let (structure, _) = PdbFile::read_from_path(file.path()).unwrap();
        assert_eq!(structure.atoms.len(), 4);
    }
}
