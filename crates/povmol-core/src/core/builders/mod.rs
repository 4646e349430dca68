//! Turn models into scene objects.
//!
//! - [`molecule`] - Space-filling and ball-and-stick molecules with optional labels
//! - [`nucleic`] - DNA strands, the opening transcription bubble, RNA and the polymerase

pub mod molecule;
pub mod nucleic;
