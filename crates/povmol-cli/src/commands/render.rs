use crate::cli::{AnimationKind, FrameArgs, RenderArgs};
use crate::config::PartialRenderConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use povmol::{
    core::io::{fasta::FastaFile, traits::MoleculeFile},
    core::models::molecule::{Molecule, MoleculeOptions},
    engine::{config::RenderConfig, progress::ProgressReporter, timeline::FrameSelection},
    workflows::{
        self, Animation, ball_stick::BallStick, molecule_tour::MoleculeTour,
        sphere_sweep::SphereSweep, transcription::Transcription,
    },
};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: RenderArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRenderConfig::from_file(path)?,
        None => PartialRenderConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let animation = load_animation(&args)?;
    let selection = frame_selection(&args.frame, &config);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let confirm = |question: &str| progress_handler.suspend(|| ask(question));

    println!(
        "Writing '{}' frames to {}...",
        animation.name(),
        config.output.frames_dir.display()
    );
    info!("Invoking the core render workflow...");
    let summary = workflows::render::run(
        animation.as_ref(),
        &config,
        &selection,
        &confirm,
        &reporter,
    )?;

    println!(
        "✓ Wrote {} of {} frame(s) to {}",
        summary.frames.len(),
        summary.frame_count,
        config.output.frames_dir.display()
    );
    if let Some(first) = summary.frames.first() {
        println!(
            "  Render with: povray {} +I{}",
            summary.ini_path.display(),
            first.path.display()
        );
    }
    Ok(())
}

fn required<'a>(path: &'a Option<PathBuf>, flag: &str, kind: AnimationKind) -> Result<&'a Path> {
    path.as_deref().ok_or_else(|| {
        CliError::Argument(format!(
            "The '{:?}' animation needs an input file; pass it with {}.",
            kind, flag
        ))
    })
}

fn load_molecule(path: &Path) -> Result<Molecule> {
    info!("Loading molecule from {:?}", path);
    Molecule::from_pdb_path(path, &MoleculeOptions::default()).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub(crate) fn load_animation(args: &RenderArgs) -> Result<Box<dyn Animation>> {
    let uses_pdb = matches!(
        args.animation,
        AnimationKind::MoleculeTour | AnimationKind::BallStick
    );
    let uses_sequence = args.animation == AnimationKind::Transcription;
    for (flag, given, used) in [
        ("--pdb", args.pdb.is_some(), uses_pdb),
        ("--sequence", args.sequence.is_some(), uses_sequence),
    ] {
        if given && !used {
            warn!("{} is ignored by the {:?} animation.", flag, args.animation);
        }
    }

    let animation: Box<dyn Animation> = match args.animation {
        AnimationKind::SphereSweep => Box::new(SphereSweep),
        AnimationKind::MoleculeTour => {
            let path = required(&args.pdb, "--pdb", args.animation)?;
            Box::new(MoleculeTour::new(load_molecule(path)?))
        }
        AnimationKind::BallStick => {
            let path = required(&args.pdb, "--pdb", args.animation)?;
            Box::new(BallStick::new(load_molecule(path)?))
        }
        AnimationKind::Transcription => {
            let path = required(&args.sequence, "--sequence", args.animation)?;
            info!("Loading DNA sequence from {:?}", path);
            let (sequence, metadata) =
                FastaFile::read_from_path(path).map_err(|e| CliError::FileParsing {
                    path: path.to_path_buf(),
                    source: e.into(),
                })?;
            info!(
                bases = sequence.len(),
                headers = metadata.headers.len(),
                "Sequence loaded."
            );
            Box::new(Transcription::new(&sequence)?)
        }
    };
    Ok(animation)
}

pub(crate) fn frame_selection(frame: &FrameArgs, config: &RenderConfig) -> FrameSelection {
    match (frame.frame, frame.time) {
        (Some(step), _) => FrameSelection::Single(step),
        (None, Some(seconds)) => FrameSelection::at_time(seconds, &config.animation.timeline()),
        (None, None) => FrameSelection::All,
    }
}

fn ask(question: &str) -> bool {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        warn!("Cannot ask for confirmation without a terminal; pass --force to overwrite.");
        return false;
    }
    match prompt(question, &mut stdin.lock(), &mut io::stderr()) {
        Ok(yes) => yes,
        Err(e) => {
            warn!(error = %e, "Could not read a confirmation answer; not overwriting.");
            false
        }
    }
}

fn prompt(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
