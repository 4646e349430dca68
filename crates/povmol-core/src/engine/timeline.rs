use super::error::EngineError;

/// Maps between frame steps and animation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    duration_secs: f64,
    fps: f64,
}

impl Timeline {
    /// Callers are expected to pass a validated (positive, finite) duration and fps.
    pub fn new(duration_secs: f64, fps: f64) -> Self {
        Self { duration_secs, fps }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn frame_count(&self) -> usize {
        (self.duration_secs * self.fps).ceil().max(1.0) as usize
    }

    pub fn frame_time(&self) -> f64 {
        1.0 / self.fps
    }

    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.frame_time()
    }

    /// The frame showing `seconds`, clamped to the first and last frame.
    pub fn step_at(&self, seconds: f64) -> usize {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0;
        }
        let step = (seconds / self.frame_time()).floor() as usize;
        step.min(self.last_step())
    }

    pub fn last_step(&self) -> usize {
        self.frame_count() - 1
    }

    /// Progress through the animation in `[0, 1)`.
    pub fn fraction(&self, step: usize) -> f64 {
        step as f64 / self.frame_count() as f64
    }
}

/// Which frames of an animation to build.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSelection {
    All,
    Single(usize),
    List(Vec<usize>),
    /// Half-open range `start..end`.
    Range { start: usize, end: usize },
}

impl FrameSelection {
    pub fn at_time(seconds: f64, timeline: &Timeline) -> Self {
        FrameSelection::Single(timeline.step_at(seconds))
    }

    /// Sorted, deduplicated steps, all within the timeline.
    pub fn resolve(&self, timeline: &Timeline) -> Result<Vec<usize>, EngineError> {
        let frame_count = timeline.frame_count();
        let mut steps = match self {
            FrameSelection::All => return Ok((0..frame_count).collect()),
            FrameSelection::Single(step) => vec![*step],
            FrameSelection::List(steps) => steps.clone(),
            FrameSelection::Range { start, end } => {
                if start >= end {
                    return Err(EngineError::InvalidFrame {
                        step: *start,
                        frame_count,
                    });
                }
                if *end > frame_count {
                    return Err(EngineError::InvalidFrame {
                        step: *end - 1,
                        frame_count,
                    });
                }
                (*start..*end).collect()
            }
        };
        if let Some(&step) = steps.iter().find(|&&step| step >= frame_count) {
            return Err(EngineError::InvalidFrame { step, frame_count });
        }
        steps.sort_unstable();
        steps.dedup();
        Ok(steps)
    }
}
