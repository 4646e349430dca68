//! # Engine Module
//!
//! Turns an animation into files on disk.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Output location, image settings, timing and pool size
//! - **Timeline** ([`timeline`]) - Frame count, frame times and frame selections
//! - **Output** ([`output`]) - Frame directory preparation and the overwrite policy
//! - **Frames** ([`frames`]) - The [`frames::Animation`] trait and the sequential or
//!   rayon-pooled frame writer
//! - **Progress Monitoring** ([`progress`]) - Callback channel used by front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Frames never share mutable state: each one is built from `&Animation` and
//! written to its own file, so rendering order does not affect the output.

pub mod config;
pub mod error;
pub mod frames;
pub mod output;
pub mod progress;
pub mod timeline;
