use crate::core::builders::molecule::Depiction;
use crate::core::models::molecule::Molecule;
use crate::core::palette;
use crate::core::scene::Scene;
use crate::core::utils::geometry;
use crate::engine::error::EngineError;
use crate::engine::frames::Animation;
use crate::engine::timeline::Timeline;
use nalgebra::Vector3;
use tracing::info;

pub const STICK_RADIUS: f64 = 0.4;
/// Extra distance (Å) allowed on top of the covalent radii when bonds have to be inferred.
pub const BOND_TOLERANCE: f64 = 0.4;
const SPIN_DEGREES_PER_STEP: f64 = 2.0;
const MAX_SCALE: f64 = 2.0;

/// A ball-and-stick molecule spinning around y while its atoms drift apart and back.
#[derive(Debug, Clone)]
pub struct BallStick {
    molecule: Molecule,
}

impl BallStick {
    /// Lifts the molecule one unit and infers bonds when the input carried none.
    pub fn new(mut molecule: Molecule) -> Self {
        if molecule.bond_count() == 0 {
            let added = molecule.infer_bonds(BOND_TOLERANCE);
            info!(added, "No CONECT records found; bonds inferred from distances.");
        }
        molecule.move_offset(&Vector3::new(0.0, 1.0, 0.0));
        Self { molecule }
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Atom-distance scale: 1 → 2 over the first half, 2 → 1 over the second.
    pub fn scale_at(step: usize, timeline: &Timeline) -> f64 {
        let half = timeline.frame_count() as f64 / 2.0;
        let step = step as f64;
        if step < half {
            geometry::lerp(1.0, MAX_SCALE, step / half)
        } else {
            geometry::lerp(MAX_SCALE, 1.0, (step - half) / half)
        }
    }
}

impl Animation for BallStick {
    fn name(&self) -> &'static str {
        "ball-stick"
    }

    fn frame(&self, step: usize, timeline: &Timeline) -> Result<Scene, EngineError> {
        let mut scaled = self.molecule.clone();
        scaled.scale_atom_distance(Self::scale_at(step, timeline), true)?;
        let spun = scaled.rotated_by_step(&Vector3::y(), SPIN_DEGREES_PER_STEP.to_radians(), step)?;

        let objects = Depiction::new(&spun).with_sticks(STICK_RADIUS).build();
        Ok(Scene::new(palette::default_camera())
            .light(palette::default_light())
            .objects(objects))
    }
}
