//! # povmol Core Library
//!
//! Builds molecular-biology visualizations for the POV-Ray ray tracer: PDB molecules
//! rendered as space-filling or ball-and-stick models, and DNA/RNA transcription
//! animations driven by a nucleotide sequence.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Atom`), the typed
//!   POV-Ray scene-description DSL, the builders that turn models into scene objects,
//!   and the file readers/writers (PDB, FASTA, POV).
//!
//! - **[`engine`]: The Render Machinery.** Render configuration, the animation timeline,
//!   output-directory guarding, and the frame pool that writes one scene file per frame.
//!
//! - **[`workflows`]: The Public API.** Ready-made animations and the driver that ties
//!   an animation to the engine.

pub mod core;
pub mod engine;
pub mod workflows;
