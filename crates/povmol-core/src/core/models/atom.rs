use nalgebra::Point3;

/// A single atom record read from a PDB ATOM/HETATM line.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The PDB serial number, used to resolve CONECT records.
    pub serial: usize,
    /// The atom name with digits and punctuation removed (e.g. "1HG2" becomes "HG").
    pub name: String,
    /// The chemical element symbol (e.g. "C", "O"). May be guessed from the atom name.
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Cumulative factor applied by atom-distance scaling; 1.0 for unscaled coordinates.
    pub scale: f64,
    /// Non-fatal issues found while parsing this atom.
    pub warnings: Vec<String>,
}

impl Atom {
    /// Creates an unscaled atom with serial 0 and no warnings.
    pub fn new(name: &str, element: &str, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: normalize_atom_name(name),
            element: element.trim().to_string(),
            position,
            scale: 1.0,
            warnings: Vec::new(),
        }
    }

    pub fn with_serial(mut self, serial: usize) -> Self {
        self.serial = serial;
        self
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.eq_ignore_ascii_case("H")
    }
}

/// Keeps only the ASCII letters of a raw PDB atom name.
pub fn normalize_atom_name(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}
