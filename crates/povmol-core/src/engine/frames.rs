use std::path::PathBuf;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::PoolConfig;
use super::error::EngineError;
use super::output::OutputGuard;
use super::progress::{Progress, ProgressReporter};
use super::timeline::Timeline;
use crate::core::io::pov;
use crate::core::scene::Scene;

/// A sequence of scenes indexed by frame step.
///
/// Implementations must build every frame from `&self` alone so frames can be
/// produced in any order and on any thread.
pub trait Animation: Sync {
    fn name(&self) -> &'static str;

    fn frame(&self, step: usize, timeline: &Timeline) -> Result<Scene, EngineError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub step: usize,
    pub path: PathBuf,
    pub primitives: usize,
}

fn render_one(
    animation: &dyn Animation,
    timeline: &Timeline,
    step: usize,
    guard: &OutputGuard,
) -> Result<FrameOutput, EngineError> {
    let wrap = |source: EngineError| EngineError::Frame {
        step,
        source: Box::new(source),
    };
    let scene = animation.frame(step, timeline).map_err(wrap)?;
    let path = guard.frame_path(step);
    pov::write_scene_to_path(&scene, &path).map_err(|e| wrap(EngineError::io(&path, e)))?;
    debug!(step, path = %path.display(), "Wrote frame.");
    Ok(FrameOutput {
        step,
        primitives: scene.primitive_count(),
        path,
    })
}

fn render_sequential(
    animation: &dyn Animation,
    timeline: &Timeline,
    steps: &[usize],
    guard: &OutputGuard,
    reporter: &ProgressReporter,
) -> Result<Vec<FrameOutput>, EngineError> {
    steps
        .iter()
        .map(|&step| {
            let output = render_one(animation, timeline, step, guard);
            reporter.report(Progress::TaskIncrement);
            output
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn render_pooled(
    animation: &dyn Animation,
    timeline: &Timeline,
    steps: &[usize],
    guard: &OutputGuard,
    pool: &PoolConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<FrameOutput>, EngineError> {
    let job = || {
        steps
            .par_iter()
            .map(|&step| {
                let output = render_one(animation, timeline, step, guard);
                reporter.report(Progress::TaskIncrement);
                output
            })
            .collect::<Result<Vec<_>, _>>()
    };
    match pool.workers {
        Some(workers) => rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| EngineError::Pool(e.to_string()))?
            .install(job),
        None => job(),
    }
}

/// Builds and writes the given frames, returning them ordered by step.
///
/// With the `parallel` feature and an enabled pool, frames are rendered on a
/// rayon pool; otherwise they are rendered one after another. Both paths write
/// identical files.
#[instrument(skip_all, fields(animation = animation.name(), frames = steps.len()))]
pub fn render_frames(
    animation: &dyn Animation,
    timeline: &Timeline,
    steps: &[usize],
    guard: &OutputGuard,
    pool: &PoolConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<FrameOutput>, EngineError> {
    reporter.report(Progress::TaskStart {
        total_steps: steps.len() as u64,
    });

    #[cfg(feature = "parallel")]
    let result = if pool.enabled {
        render_pooled(animation, timeline, steps, guard, pool, reporter)
    } else {
        render_sequential(animation, timeline, steps, guard, reporter)
    };
    #[cfg(not(feature = "parallel"))]
    let result = {
        if pool.enabled {
            debug!("Built without the `parallel` feature; rendering sequentially.");
        }
        render_sequential(animation, timeline, steps, guard, reporter)
    };

    reporter.report(Progress::TaskFinish);
    let mut frames = result?;
    frames.sort_by_key(|frame| frame.step);
    info!(frames = frames.len(), "Frames written.");
    Ok(frames)
}
