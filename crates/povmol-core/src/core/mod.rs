//! # Core Module
//!
//! The building blocks every animation is assembled from.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, molecules and their rigid-body transforms
//! - **File I/O** ([`io`]) - PDB and FASTA readers, POV-Ray scene and INI writers
//! - **Scene Description** ([`scene`]) - Typed POV-Ray SDL elements
//! - **Builders** ([`builders`]) - Turn molecules and sequences into scene objects
//! - **Palette** ([`palette`]) - Atom colors, sizes and the stock textures/objects
//! - **Utilities** ([`utils`]) - Vector and rotation helpers

pub mod builders;
pub mod io;
pub mod models;
pub mod palette;
pub mod scene;
pub mod utils;
