//! Readers for the biological source formats and writers for the renderer's input.
//!
//! - [`pdb`] - First-model PDB reader (ATOM/HETATM/CONECT)
//! - [`fasta`] - Nucleotide FASTA reader
//! - [`pov`] - POV-Ray scene and render-settings writers
//! - [`traits`] - The [`traits::MoleculeFile`] interface shared by the readers

pub mod fasta;
pub mod pdb;
pub mod pov;
pub mod traits;
