//! # Core Models Module
//!
//! Data structures for molecules read from PDB files.
//!
//! - [`atom`] - A single atom record with its position, element and scale factor
//! - [`sequence`] - DNA/RNA bases and nucleotide sequences
//! - [`molecule`] - An ordered atom list with bonds and the rigid-body transforms
//!   (move, rotate, scale, divide) applied to it
//!
//! ```ignore
//! use povmol::core::models::molecule::{Molecule, MoleculeOptions};
//!
//! let mut ethanol = Molecule::from_pdb_path("pdb/ethanol.pdb", &MoleculeOptions::default())?;
//! ethanol.move_to(&Point3::new(0.0, 6.0, 0.0));
//! ethanol.rotate(&Vector3::y(), std::f64::consts::FRAC_PI_4)?;
//! ```

pub mod atom;
pub mod molecule;
pub mod sequence;
