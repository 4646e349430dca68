use super::atom::Atom;
use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::traits::MoleculeFile;
use crate::core::palette;
use crate::core::utils::geometry;
use crate::engine::timeline::Timeline;
use nalgebra::{Point3, Vector3};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Pairs closer than this are treated as overlapping atoms, never as bonds.
const MIN_BOND_DISTANCE: f64 = 0.4;
const OVERVIEW_RULE_WIDTH: usize = 54;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Rotation axis {axis:?} with angle {theta} does not define a rotation")]
    DegenerateRotation { axis: [f64; 3], theta: f64 },
    #[error("Atom index {index} is out of range for a molecule with {len} atoms")]
    AtomIndexOutOfRange { index: usize, len: usize },
    #[error("Atom {0} cannot be bonded to itself")]
    SelfBond(usize),
    #[error("Scale factor must be finite and positive (got {0})")]
    InvalidScale(f64),
}

/// Undirected bond between two atom indices, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    a: usize,
    b: usize,
}

impl Bond {
    /// Returns `None` for a self-bond.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
            std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn a(&self) -> usize {
        self.a
    }

    pub fn b(&self) -> usize {
        self.b
    }

    pub fn contains(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }
}

/// Placement applied when a molecule is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeOptions {
    /// Move the centroid to the origin after applying the offset.
    pub center: bool,
    pub offset: Vector3<f64>,
}

impl Default for MoleculeOptions {
    fn default() -> Self {
        Self {
            center: true,
            offset: Vector3::zeros(),
        }
    }
}

impl MoleculeOptions {
    pub fn uncentered() -> Self {
        Self {
            center: false,
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset: Vector3<f64>) -> Self {
        self.offset = offset;
        self
    }
}

/// A set of atoms with explicit bonds and a cached pseudo center of mass.
///
/// Atoms keep the order they were read in; bonds refer to atoms by index in
/// that order. The cached center is the unweighted centroid and is kept up to
/// date by every transform, so [`Molecule::rotate`] always pivots around the
/// molecule's current position.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    source: String,
    atoms: Vec<Atom>,
    bonds: BTreeSet<Bond>,
    center: Point3<f64>,
}

impl Molecule {
    /// Reads the first model of a PDB file.
    pub fn from_pdb_path<P: AsRef<Path>>(
        path: P,
        options: &MoleculeOptions,
    ) -> Result<Self, PdbError> {
        let path = path.as_ref();
        let (structure, _metadata) = PdbFile::read_from_path(path)?;
        let source = path.display().to_string();
        Ok(Self::from_parts(
            &source,
            structure.atoms,
            structure.bonds,
            options,
        )?)
    }

    pub fn from_parts(
        source: &str,
        atoms: Vec<Atom>,
        bonds: impl IntoIterator<Item = (usize, usize)>,
        options: &MoleculeOptions,
    ) -> Result<Self, ModelError> {
        let len = atoms.len();
        let mut bond_set = BTreeSet::new();
        for (i, j) in bonds {
            for index in [i, j] {
                if index >= len {
                    return Err(ModelError::AtomIndexOutOfRange { index, len });
                }
            }
            bond_set.insert(Bond::new(i, j).ok_or(ModelError::SelfBond(i))?);
        }

        let mut molecule = Self {
            source: source.to_string(),
            atoms,
            bonds: bond_set,
            center: Point3::origin(),
        };
        if options.offset != Vector3::zeros() {
            molecule.translate_atoms(&options.offset);
        }
        molecule.center = molecule.center_of_mass();
        if options.center {
            molecule.center_molecule();
        }

        info!(
            source,
            atoms = molecule.atoms.len(),
            bonds = molecule.bonds.len(),
            center = ?[molecule.center.x, molecule.center.y, molecule.center.z],
            "Molecule placed."
        );
        Ok(molecule)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn bonds(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.iter()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Indices of the atoms bonded to `index`.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds
            .iter()
            .filter(move |bond| bond.contains(index))
            .map(move |bond| if bond.a == index { bond.b } else { bond.a })
    }

    /// Unweighted centroid of all atoms; the origin for an empty molecule.
    pub fn center_of_mass(&self) -> Point3<f64> {
        geometry::centroid(self.atoms.iter().map(|atom| &atom.position))
            .unwrap_or_else(Point3::origin)
    }

    pub fn center_molecule(&mut self) {
        let shift = -self.center_of_mass().coords;
        self.translate_atoms(&shift);
        self.center = self.center_of_mass();
    }

    pub fn move_offset(&mut self, offset: &Vector3<f64>) {
        self.translate_atoms(offset);
        self.center += offset;
    }

    pub fn move_to(&mut self, position: &Point3<f64>) {
        let offset = position - self.center;
        self.translate_atoms(&offset);
        self.center = *position;
    }

    /// Rotates all atoms by `theta` radians around `axis` through the current center.
    pub fn rotate(&mut self, axis: &Vector3<f64>, theta: f64) -> Result<(), ModelError> {
        let rotation =
            geometry::rotation_exp(axis, theta).ok_or(ModelError::DegenerateRotation {
                axis: [axis.x, axis.y, axis.z],
                theta,
            })?;
        let center = self.center;
        for atom in &mut self.atoms {
            atom.position = center + rotation * (atom.position - center);
        }
        Ok(())
    }

    /// A copy rotated by `theta * (step + 1)`; the receiver is left untouched.
    pub fn rotated_by_step(
        &self,
        axis: &Vector3<f64>,
        theta: f64,
        step: usize,
    ) -> Result<Molecule, ModelError> {
        let mut rotated = self.clone();
        rotated.rotate(axis, theta * (step as f64 + 1.0))?;
        Ok(rotated)
    }

    /// [`Molecule::rotated_by_step`] for the frame shown at `seconds`.
    pub fn rotated_at_time(
        &self,
        axis: &Vector3<f64>,
        theta: f64,
        seconds: f64,
        timeline: &Timeline,
    ) -> Result<Molecule, ModelError> {
        self.rotated_by_step(axis, theta, timeline.step_at(seconds))
    }

    /// Scales every atom position about the origin.
    ///
    /// With `revert`, each atom is first brought back to its unscaled position,
    /// so repeated calls set an absolute scale instead of compounding.
    pub fn scale_atom_distance(&mut self, scale: f64, revert: bool) -> Result<(), ModelError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ModelError::InvalidScale(scale));
        }
        for atom in &mut self.atoms {
            let mut coords = atom.position.coords;
            if revert {
                coords /= atom.scale;
                atom.scale = 1.0;
            }
            atom.position = Point3::from(coords * scale);
            atom.scale *= scale;
        }
        self.center = self.center_of_mass();
        Ok(())
    }

    /// Moves the atoms at `indices` into a new, uncentered molecule.
    ///
    /// Duplicate indices are ignored and the first-seen order is kept. Bonds
    /// between extracted atoms follow them; bonds crossing the split are dropped
    /// from both molecules. On error nothing is modified.
    #[instrument(skip_all, fields(source = %self.source, count = indices.len()))]
    pub fn divide(
        &mut self,
        indices: &[usize],
        source: &str,
        offset: Vector3<f64>,
    ) -> Result<Molecule, ModelError> {
        let len = self.atoms.len();
        let mut selected = Vec::with_capacity(indices.len());
        let mut seen = HashSet::with_capacity(indices.len());
        for &index in indices {
            if index >= len {
                return Err(ModelError::AtomIndexOutOfRange { index, len });
            }
            if seen.insert(index) {
                selected.push(index);
            }
        }

        let extracted_index: HashMap<usize, usize> = selected
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new))
            .collect();
        let mut remaining_index: Vec<Option<usize>> = vec![None; len];
        let mut next = 0;
        for (old, slot) in remaining_index.iter_mut().enumerate() {
            if !seen.contains(&old) {
                *slot = Some(next);
                next += 1;
            }
        }

        let mut extracted_bonds = Vec::new();
        let mut remaining_bonds = BTreeSet::new();
        let mut crossing = 0usize;
        for bond in &self.bonds {
            match (
                extracted_index.get(&bond.a),
                extracted_index.get(&bond.b),
                remaining_index[bond.a],
                remaining_index[bond.b],
            ) {
                (Some(&a), Some(&b), _, _) => extracted_bonds.push((a, b)),
                (_, _, Some(a), Some(b)) => {
                    if let Some(remapped) = Bond::new(a, b) {
                        remaining_bonds.insert(remapped);
                    }
                }
                _ => crossing += 1,
            }
        }

        let mut slots: Vec<Option<Atom>> = self.atoms.drain(..).map(Some).collect();
        let extracted_atoms: Vec<Atom> = selected
            .iter()
            .filter_map(|&index| slots[index].take())
            .collect();
        self.atoms = slots.into_iter().flatten().collect();
        self.bonds = remaining_bonds;
        self.center = self.center_of_mass();

        debug!(
            extracted = extracted_atoms.len(),
            remaining = self.atoms.len(),
            crossing_bonds_removed = crossing,
            "Divided molecule."
        );

        Molecule::from_parts(
            source,
            extracted_atoms,
            extracted_bonds,
            &MoleculeOptions::uncentered().with_offset(offset),
        )
    }

    /// Adds bonds between atoms closer than the sum of their covalent radii plus
    /// `tolerance`. Returns the number of bonds added.
    #[instrument(skip(self), fields(source = %self.source))]
    pub fn infer_bonds(&mut self, tolerance: f64) -> usize {
        let radii: Vec<f64> = self
            .atoms
            .iter()
            .map(|atom| palette::covalent_radius(&atom.element))
            .collect();
        let mut added = 0;
        for i in 0..self.atoms.len() {
            for j in (i + 1)..self.atoms.len() {
                let (first, second) = (&self.atoms[i], &self.atoms[j]);
                if first.is_hydrogen() && second.is_hydrogen() {
                    continue;
                }
                let distance = (first.position - second.position).norm();
                if distance > MIN_BOND_DISTANCE
                    && distance <= radii[i] + radii[j] + tolerance
                    && self.bonds.insert(Bond { a: i, b: j })
                {
                    added += 1;
                }
            }
        }
        debug!(added, total = self.bonds.len(), "Inferred bonds from distances.");
        added
    }

    fn translate_atoms(&mut self, offset: &Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += offset;
        }
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(OVERVIEW_RULE_WIDTH);
        writeln!(f, "Overview for the molecule read from {}", self.source)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:<6}{:<8}{:>10}{:>10}{:>10}", "Idx", "Atom", "x", "y", "z")?;
        for (index, atom) in self.atoms.iter().enumerate() {
            writeln!(
                f,
                "{:<6}{:<8}{:>10.2}{:>10.2}{:>10.2}",
                index, atom.element, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        writeln!(f, "{}", rule)?;
        write!(
            f,
            "Molecule is currently centered at [{:.2}, {:.2}, {:.2}]",
            self.center.x, self.center.y, self.center.z
        )
    }
}
