//! Typed POV-Ray scene-description language (SDL).
//!
//! Every element renders to SDL through its [`std::fmt::Display`] implementation, so a
//! complete frame is produced with `scene.to_sdl()` or `format!("{scene}")`.

pub mod composition;
pub mod lighting;
pub mod object;
pub mod texture;

pub use composition::Scene;
pub use lighting::{AreaLight, Camera, LightSource};
pub use object::{CsgOp, Modifier, SceneObject, Shape};
pub use texture::{Color, Finish, Interior, Pigment, Texture};

use nalgebra::{Point3, Vector3};
use std::fmt;

/// An `<x, y, z>` SDL vector literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SdlVec(pub [f64; 3]);

impl From<&Point3<f64>> for SdlVec {
    fn from(p: &Point3<f64>) -> Self {
        Self([p.x, p.y, p.z])
    }
}

impl From<&Vector3<f64>> for SdlVec {
    fn from(v: &Vector3<f64>) -> Self {
        Self([v.x, v.y, v.z])
    }
}

impl fmt::Display for SdlVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.0[0], self.0[1], self.0[2])
    }
}

/// Writes `block` indented by two spaces, one line at a time.
pub(crate) fn write_indented(f: &mut fmt::Formatter<'_>, block: &str) -> fmt::Result {
    for line in block.lines() {
        writeln!(f, "  {}", line)?;
    }
    Ok(())
}
