use crate::core::palette;
use crate::core::scene::{Scene, SceneObject};
use crate::core::utils::geometry;
use crate::engine::error::EngineError;
use crate::engine::frames::Animation;
use crate::engine::timeline::Timeline;
use nalgebra::Point3;

const X_START: f64 = -10.0;
const X_END: f64 = 10.0;
const SPHERE_RADIUS: f64 = 2.0;

/// A single sphere crossing the floor and coming back; the minimal scene template.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereSweep;

impl SphereSweep {
    pub fn x_at(step: usize, timeline: &Timeline) -> f64 {
        let half = timeline.frame_count() as f64 / 2.0;
        let step = step as f64;
        if step < half {
            geometry::lerp(X_START, X_END, step / half)
        } else {
            geometry::lerp(X_END, X_START, (step - half) / half)
        }
    }
}

impl Animation for SphereSweep {
    fn name(&self) -> &'static str {
        "sphere-sweep"
    }

    fn frame(&self, step: usize, timeline: &Timeline) -> Result<Scene, EngineError> {
        let x = Self::x_at(step, timeline);
        let sphere = SceneObject::sphere(Point3::new(x, 0.0, 0.0), SPHERE_RADIUS)
            .textured(palette::default_sphere_model());
        Ok(Scene::new(palette::default_camera())
            .object(sphere)
            .object(palette::default_ground())
            .light(palette::default_light()))
    }
}
