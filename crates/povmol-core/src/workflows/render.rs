use crate::core::io::pov;
use crate::engine::config::RenderConfig;
use crate::engine::error::EngineError;
use crate::engine::frames::{self, Animation, FrameOutput};
use crate::engine::output::OutputGuard;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::timeline::FrameSelection;
use std::path::PathBuf;
use tracing::{info, instrument};

const SCENE_EXTENSION: &str = "pov";

#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub frames: Vec<FrameOutput>,
    pub ini_path: PathBuf,
    /// Frames in the whole animation, not only the ones written.
    pub frame_count: usize,
}

/// Writes the selected frames of `animation` as POV-Ray scene files, plus a
/// `<prefix>.ini` carrying the image settings.
///
/// `confirm` is asked before clearing frames of an earlier render when the
/// overwrite policy is `ask`.
#[instrument(skip_all, name = "render_workflow", fields(animation = animation.name()))]
pub fn run(
    animation: &dyn Animation,
    config: &RenderConfig,
    selection: &FrameSelection,
    confirm: &dyn Fn(&str) -> bool,
    reporter: &ProgressReporter,
) -> Result<RenderSummary, EngineError> {
    config.validate()?;
    let timeline = config.animation.timeline();
    let steps = selection.resolve(&timeline)?;
    info!(
        frame_count = timeline.frame_count(),
        selected = steps.len(),
        "Resolved frame selection."
    );

    let guard = reporter.phase("Preparing output", || {
        let guard = OutputGuard::prepare(&config.output, SCENE_EXTENSION, confirm)?;
        let ini_path = guard.ini_path();
        pov::write_render_ini_to_path(&config.image, &ini_path)
            .map_err(|e| EngineError::io(&ini_path, e))?;
        reporter.report(Progress::Message(format!(
            "Render settings written to {}",
            ini_path.display()
        )));
        Ok::<_, EngineError>(guard)
    })?;

    let frames = reporter.phase("Writing frames", || {
        frames::render_frames(
            animation,
            &timeline,
            &steps,
            &guard,
            &config.pool,
            reporter,
        )
    })?;
    let ini_path = guard.ini_path();

    Ok(RenderSummary {
        frames,
        ini_path,
        frame_count: timeline.frame_count(),
    })
}
