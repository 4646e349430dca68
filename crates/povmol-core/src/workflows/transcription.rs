use crate::core::builders::nucleic::{self, DnaLayout};
use crate::core::models::sequence::Sequence;
use crate::core::scene::{Camera, LightSource, Scene};
use crate::engine::error::EngineError;
use crate::engine::frames::Animation;
use crate::engine::timeline::Timeline;
use nalgebra::Point3;
use tracing::debug;

const POLYMERASE_SIZE: f64 = 12.0;
const POLYMERASE_DIP_Y: f64 = -15.0;
const MAX_STRETCH: f64 = 12.0;
const CAMERA_HEIGHT: f64 = 40.0;
const CAMERA_DISTANCE: f64 = -80.0;
const LIGHT_HEIGHT: f64 = 8.0;
const LIGHT_DISTANCE: f64 = -20.0;
const LIGHT_INTENSITY: f64 = 0.8;

/// Fractions of the animation at which each phase ends.
const APPROACH_END: f64 = 0.2;
const HOLD_END: f64 = 0.4;
const OPENING_END: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Camera and polymerase travel to the promoter.
    Approach,
    Hold,
    /// The polymerase dips onto the promoter and the strands open.
    Opening,
    /// The polymerase moves along the open strand, synthesizing RNA.
    Elongation,
}

impl Phase {
    pub fn at(step: usize, frame_count: usize) -> Self {
        let (step, n) = (step as f64, frame_count as f64);
        if step < APPROACH_END * n {
            Phase::Approach
        } else if step < HOLD_END * n {
            Phase::Hold
        } else if step < OPENING_END * n {
            Phase::Opening
        } else {
            Phase::Elongation
        }
    }
}

/// Where everything is at one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Staging {
    pub phase: Phase,
    /// x of the camera, light and polymerase.
    pub focus_x: f64,
    pub polymerase_y: f64,
    pub stretch: f64,
    /// Last post-promoter base covered by RNA, during elongation.
    pub synthesized: Option<usize>,
}

/// RNA polymerase finding the TATA box, opening the DNA and transcribing it.
#[derive(Debug, Clone)]
pub struct Transcription {
    layout: DnaLayout,
}

impl Transcription {
    pub fn new(sequence: &Sequence) -> Result<Self, EngineError> {
        let layout = DnaLayout::from_sequence(sequence)?;
        debug!(
            pre_promoter = layout.pre_promoter().len(),
            post_promoter = layout.post_promoter().len(),
            "Sequence split at the TATA box."
        );
        Ok(Self { layout })
    }

    pub fn layout(&self) -> &DnaLayout {
        &self.layout
    }

    pub fn staging(&self, step: usize, timeline: &Timeline) -> Staging {
        let n = timeline.frame_count() as f64;
        let s = step as f64;
        let promoter = self.layout.promoter_x();
        let phase = Phase::at(step, timeline.frame_count());
        let (approach, opening, elongation) = (
            APPROACH_END * n,
            (HOLD_END - APPROACH_END) * n,
            (1.0 - OPENING_END) * n,
        );
        match phase {
            Phase::Approach => Staging {
                phase,
                focus_x: promoter / approach * s,
                polymerase_y: 0.0,
                stretch: 0.0,
                synthesized: None,
            },
            Phase::Hold => Staging {
                phase,
                focus_x: promoter,
                polymerase_y: 0.0,
                stretch: 0.0,
                synthesized: None,
            },
            Phase::Opening => {
                let progress = (s - HOLD_END * n) / opening;
                Staging {
                    phase,
                    focus_x: promoter,
                    polymerase_y: POLYMERASE_DIP_Y * progress,
                    stretch: MAX_STRETCH * progress,
                    synthesized: None,
                }
            }
            Phase::Elongation => {
                let travelled = (s - OPENING_END * n) * self.layout.post_length() / elongation;
                Staging {
                    phase,
                    focus_x: promoter + travelled,
                    polymerase_y: POLYMERASE_DIP_Y,
                    stretch: MAX_STRETCH,
                    synthesized: Some((travelled / nucleic::BASE_SPACING).floor() as usize),
                }
            }
        }
    }
}

impl Animation for Transcription {
    fn name(&self) -> &'static str {
        "transcription"
    }

    fn frame(&self, step: usize, timeline: &Timeline) -> Result<Scene, EngineError> {
        let staging = self.staging(step, timeline);
        let x = staging.focus_x;

        let camera = Camera::new(
            Point3::new(x, CAMERA_HEIGHT, CAMERA_DISTANCE),
            Point3::new(x, 0.0, 0.0),
        );
        let mut scene = Scene::new(camera)
            .light(LightSource::new(
                Point3::new(x, LIGHT_HEIGHT, LIGHT_DISTANCE),
                LIGHT_INTENSITY,
            ))
            .object(nucleic::polymerase(
                Point3::new(x, staging.polymerase_y, 0.0),
                POLYMERASE_SIZE,
                nucleic::DEFAULT_POLYMERASE_LENGTH,
            ))
            .object(self.layout.double_strand())
            .objects(
                self.layout
                    .opening_strands(self.layout.promoter_x(), staging.stretch),
            );
        if let Some(rna) = staging
            .synthesized
            .and_then(|last| self.layout.rna_strand(last))
        {
            scene = scene.object(rna);
        }
        Ok(scene)
    }
}
