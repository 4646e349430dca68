//! # Workflows Module
//!
//! Ready-made animations and the driver that writes them to disk.
//!
//! ## Architecture
//!
//! Every animation implements [`Animation`], building one [`Scene`](crate::core::scene::Scene)
//! per frame step from its own immutable state:
//!
//! - **Sphere Sweep** ([`sphere_sweep`]) - A single sphere moving across a floor and back
//! - **Molecule Tour** ([`molecule_tour`]) - A labelled space-filling molecule travelling a
//!   figure-eight path while spinning
//! - **Ball and Stick** ([`ball_stick`]) - A bonded molecule that explodes and contracts
//!   while rotating
//! - **Transcription** ([`transcription`]) - RNA polymerase binding the TATA box,
//!   opening the DNA and synthesizing RNA
//!
//! [`render::run`] validates a [`RenderConfig`](crate::engine::config::RenderConfig),
//! resolves the frame selection, prepares the output directory and writes the frames.

pub use crate::engine::frames::Animation;

pub mod ball_stick;
pub mod molecule_tour;
pub mod render;
pub mod sphere_sweep;
pub mod transcription;
