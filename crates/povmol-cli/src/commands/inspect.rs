use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use povmol::core::models::molecule::{Molecule, MoleculeOptions};
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let molecule = load(&args)?;
    println!("{}", molecule);
    println!("Bonds: {}", molecule.bond_count());
    Ok(())
}

fn load(args: &InspectArgs) -> Result<Molecule> {
    let options = if args.no_center {
        MoleculeOptions::uncentered()
    } else {
        MoleculeOptions::default()
    };
    let mut molecule =
        Molecule::from_pdb_path(&args.pdb, &options).map_err(|e| CliError::FileParsing {
            path: args.pdb.clone(),
            source: e.into(),
        })?;
    info!(
        atoms = molecule.len(),
        bonds = molecule.bond_count(),
        "Loaded {:?}",
        args.pdb
    );

    if let Some(tolerance) = args.infer_bonds {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CliError::Argument(format!(
                "--infer-bonds must be a non-negative distance (got {})",
                tolerance
            )));
        }
        let added = molecule.infer_bonds(tolerance);
        info!(added, "Inferred bonds from atom distances.");
    }
    Ok(molecule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const WATER: &str = "\
HETATM    1  O   HOH A   1       1.000   1.000   1.000  1.00  0.00           O
HETATM    2  H1  HOH A   1       1.957   1.000   1.000  1.00  0.00           H
HETATM    3  H2  HOH A   1       0.760   1.927   1.000  1.00  0.00           H
END
";

    fn write_water(dir: &Path) -> PathBuf {
        let path = dir.join("water.pdb");
        fs::write(&path, WATER).unwrap();
        path
    }

    fn args(pdb: PathBuf, no_center: bool, infer_bonds: Option<f64>) -> InspectArgs {
        InspectArgs {
            pdb,
            no_center,
            infer_bonds,
        }
    }

    #[test]
    fn centers_by_default() {
        let dir = tempdir().unwrap();
        let molecule = load(&args(write_water(dir.path()), false, None)).unwrap();
        assert!(molecule.center().coords.norm() < 1e-9);
        assert_eq!(molecule.bond_count(), 0);
    }

    #[test]
    fn no_center_keeps_file_coordinates() {
        let dir = tempdir().unwrap();
        let molecule = load(&args(write_water(dir.path()), true, None)).unwrap();
        assert_eq!(molecule.atoms()[0].position.x, 1.0);
    }

    #[test]
    fn infer_bonds_links_hydrogens_to_oxygen_only() {
        let dir = tempdir().unwrap();
        let molecule = load(&args(write_water(dir.path()), false, Some(0.4))).unwrap();
        assert_eq!(molecule.bond_count(), 2);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let dir = tempdir().unwrap();
        let result = load(&args(write_water(dir.path()), false, Some(-1.0)));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let result = load(&args(dir.path().join("absent.pdb"), false, None));
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
