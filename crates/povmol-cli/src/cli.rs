use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Marcel Kempenaar",
    version,
    about = "povmol - write POV-Ray scene files for molecule and DNA transcription animations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to write frames.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM", value_parser = parse_threads)]
    pub threads: Option<usize>,
}

fn parse_threads(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the scene files of an animation, one per frame.
    Render(RenderArgs),
    /// Print the atoms and bonds read from a PDB file.
    Inspect(InspectArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// A sphere crossing the floor and back.
    SphereSweep,
    /// A labelled molecule travelling a figure-eight (requires --pdb).
    MoleculeTour,
    /// A ball-and-stick molecule exploding and contracting (requires --pdb).
    BallStick,
    /// RNA polymerase transcribing a DNA sequence (requires --sequence).
    Transcription,
}

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// The animation to write.
    #[arg(value_enum)]
    pub animation: AnimationKind,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// PDB structure used by the molecule animations.
    #[arg(long, value_name = "PATH")]
    pub pdb: Option<PathBuf>,

    /// FASTA file with the DNA sequence used by the transcription animation.
    #[arg(long, value_name = "PATH")]
    pub sequence: Option<PathBuf>,

    #[command(flatten)]
    pub frame: FrameArgs,

    // --- Output Overrides ---
    /// Override the directory frames are written to.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Override the frame file prefix.
    #[arg(short, long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Remove frames of an earlier render without asking.
    #[arg(short, long)]
    pub force: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S animation.fps=24
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Restricts a render to a single frame, picked by time or by index.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct FrameArgs {
    /// Write only the frame shown at this time, in seconds.
    #[arg(short, long, value_name = "SECONDS")]
    pub time: Option<f64>,

    /// Write only the frame with this index.
    #[arg(long, value_name = "N")]
    pub frame: Option<usize>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the PDB file.
    #[arg(value_name = "PDB")]
    pub pdb: PathBuf,

    /// Keep the coordinates from the file instead of centering the molecule.
    #[arg(long)]
    pub no_center: bool,

    /// Add bonds between atoms within their covalent radii plus this tolerance (in Å).
    #[arg(long, value_name = "TOL")]
    pub infer_bonds: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn render_accepts_overrides() {
        let cli = parse(&[
            "povmol", "-vv", "-j", "4", "render", "ball-stick", "--pdb", "in.pdb", "-o", "out",
            "--prefix", "bs", "--force", "-S", "animation.fps=24", "-S", "image.width=640",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(4));
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.animation, AnimationKind::BallStick);
        assert_eq!(args.pdb, Some(PathBuf::from("in.pdb")));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert!(args.force);
        assert_eq!(args.set_values, vec!["animation.fps=24", "image.width=640"]);
    }

    #[test]
    fn zero_threads_are_rejected() {
        let result = Cli::try_parse_from(["povmol", "-j", "0", "inspect", "in.pdb"]);
        assert!(result.is_err());
    }

    #[test]
    fn time_and_frame_are_mutually_exclusive() {
        let result =
            Cli::try_parse_from(["povmol", "render", "sphere-sweep", "--time", "1.5", "--frame", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_animation_is_rejected() {
        assert!(Cli::try_parse_from(["povmol", "render", "spin"]).is_err());
    }

    #[test]
    fn inspect_takes_a_positional_pdb() {
        let cli = parse(&["povmol", "inspect", "mol.pdb", "--no-center", "--infer-bonds", "0.4"]);
        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.pdb, PathBuf::from("mol.pdb"));
        assert!(args.no_center);
        assert_eq!(args.infer_bonds, Some(0.4));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["povmol", "-q", "-v", "inspect", "a.pdb"]).is_err());
    }
}
