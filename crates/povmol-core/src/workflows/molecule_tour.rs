use crate::core::builders::molecule::{Depiction, LabelKind};
use crate::core::models::molecule::Molecule;
use crate::core::palette;
use crate::core::scene::{AreaLight, Color, LightSource, Scene};
use crate::core::utils::geometry;
use crate::engine::error::EngineError;
use crate::engine::frames::Animation;
use crate::engine::timeline::Timeline;
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

const TOUR_SIZE: f64 = 25.0;
const TOUR_Z: f64 = -5.0;
const SPIN_DEGREES_PER_STEP: f64 = 3.0;

/// Warm area light placed at the default camera.
pub fn front_light() -> LightSource {
    LightSource::colored(Point3::new(0.0, 14.0, -28.0), Color::rgb(1.0, 0.8, 0.4))
        .with_fade(6.0, 2.0)
        .with_area(AreaLight {
            axis1: Vector3::new(3.0, 0.0, 0.0),
            axis2: Vector3::new(0.0, 0.0, 3.0),
            size1: 12,
            size2: 12,
            adaptive: 0,
            circular: true,
            orient: true,
        })
}

/// A labelled molecule flying a figure 8 while spinning around `[1, 1, 0]`.
#[derive(Debug, Clone)]
pub struct MoleculeTour {
    molecule: Molecule,
}

impl MoleculeTour {
    pub fn new(molecule: Molecule) -> Self {
        Self { molecule }
    }

    pub fn position_at(step: usize, timeline: &Timeline) -> Point3<f64> {
        let t = TAU * timeline.fraction(step);
        let (x, y) = geometry::lemniscate(t, TOUR_SIZE);
        Point3::new(x, y, TOUR_Z)
    }
}

impl Animation for MoleculeTour {
    fn name(&self) -> &'static str {
        "molecule-tour"
    }

    fn frame(&self, step: usize, timeline: &Timeline) -> Result<Scene, EngineError> {
        let mut placed = self.molecule.clone();
        placed.move_to(&Self::position_at(step, timeline));
        let spun = placed.rotated_by_step(
            &Vector3::new(1.0, 1.0, 0.0),
            SPIN_DEGREES_PER_STEP.to_radians(),
            step,
        )?;

        let camera = palette::default_camera();
        let objects = Depiction::new(&spun)
            .with_labels(LabelKind::Name, camera.location)
            .build();
        Ok(Scene::new(camera)
            .include("colors.inc")
            .light(palette::default_light())
            .light(front_light())
            .objects(objects))
    }
}
