use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::config::{OutputConfig, OverwritePolicy};
use super::error::EngineError;

/// Owns the frame directory for one render and hands out frame paths.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputGuard {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl OutputGuard {
    /// Creates the frame directory and clears stale `<prefix>_*.<extension>` files
    /// according to the overwrite policy.
    ///
    /// `confirm` is only called for [`OverwritePolicy::Ask`]; it receives a
    /// question and returns whether the files may be removed.
    #[instrument(skip_all, fields(dir = %config.frames_dir.display(), prefix = %config.prefix))]
    pub fn prepare(
        config: &OutputConfig,
        extension: &str,
        confirm: &dyn Fn(&str) -> bool,
    ) -> Result<Self, EngineError> {
        let guard = Self {
            dir: config.frames_dir.clone(),
            prefix: config.prefix.clone(),
            extension: extension.trim_start_matches('.').to_string(),
        };
        fs::create_dir_all(&guard.dir).map_err(|e| EngineError::io(&guard.dir, e))?;

        let existing = guard.existing_files()?;
        if existing.is_empty() {
            return Ok(guard);
        }

        let remove = match config.overwrite {
            OverwritePolicy::Always => true,
            OverwritePolicy::Never => false,
            OverwritePolicy::Ask => confirm(&format!(
                "Found {} existing '{}' file(s) in '{}'. Remove them?",
                existing.len(),
                guard.pattern(),
                guard.dir.display()
            )),
        };
        if !remove {
            warn!(count = existing.len(), "Refusing to overwrite existing frames.");
            return Err(EngineError::OutputExists {
                dir: guard.dir.clone(),
                pattern: guard.pattern(),
                count: existing.len(),
            });
        }

        for path in &existing {
            fs::remove_file(path).map_err(|e| EngineError::io(path, e))?;
        }
        info!(count = existing.len(), "Removed frames from an earlier render.");
        Ok(guard)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn pattern(&self) -> String {
        format!("{}_*.{}", self.prefix, self.extension)
    }

    /// `<dir>/<prefix>_<NNN>.<extension>`, zero-padded to three digits.
    pub fn frame_path(&self, step: usize) -> PathBuf {
        self.dir
            .join(format!("{}_{:03}.{}", self.prefix, step, self.extension))
    }

    /// Location of the renderer settings file, `<dir>/<prefix>.ini`.
    pub fn ini_path(&self) -> PathBuf {
        self.dir.join(format!("{}.ini", self.prefix))
    }

    /// Files in the frame directory that belong to this prefix and extension, sorted.
    pub fn existing_files(&self) -> Result<Vec<PathBuf>, EngineError> {
        let stem_prefix = format!("{}_", self.prefix);
        let entries = fs::read_dir(&self.dir).map_err(|e| EngineError::io(&self.dir, e))?;
        let mut matches = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| EngineError::io(&self.dir, e))?.path();
            if !path.is_file() {
                continue;
            }
            let name_matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&stem_prefix));
            let extension_matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if name_matches && extension_matches {
                matches.push(path);
            }
        }
        matches.sort();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    fn config(dir: &Path, overwrite: OverwritePolicy) -> OutputConfig {
        OutputConfig {
            frames_dir: dir.to_path_buf(),
            prefix: "simulation".to_string(),
            overwrite,
        }
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    fn never_asked(_: &str) -> bool {
        panic!("confirmation should not be requested")
    }

    #[test]
    fn creates_missing_directory() {
        let root = tempdir().unwrap();
        let dir = root.path().join("nested").join("images");
        let guard = OutputGuard::prepare(&config(&dir, OverwritePolicy::Never), "pov", &never_asked)
            .unwrap();
        assert!(dir.is_dir());
        assert_eq!(guard.frame_path(7), dir.join("simulation_007.pov"));
        assert_eq!(guard.frame_path(1234), dir.join("simulation_1234.pov"));
        assert_eq!(guard.ini_path(), dir.join("simulation.ini"));
    }

    #[test]
    fn always_removes_only_matching_files() {
        let root = tempdir().unwrap();
        touch(root.path(), "simulation_000.pov");
        touch(root.path(), "simulation_001.pov");
        touch(root.path(), "simulation_000.png");
        touch(root.path(), "other_000.pov");
        touch(root.path(), "simulation.ini");

        OutputGuard::prepare(&config(root.path(), OverwritePolicy::Always), "pov", &never_asked)
            .unwrap();

        assert!(!root.path().join("simulation_000.pov").exists());
        assert!(!root.path().join("simulation_001.pov").exists());
        assert!(root.path().join("simulation_000.png").exists());
        assert!(root.path().join("other_000.pov").exists());
        assert!(root.path().join("simulation.ini").exists());
    }

    #[test]
    fn never_refuses_existing_frames() {
        let root = tempdir().unwrap();
        touch(root.path(), "simulation_003.pov");
        let result =
            OutputGuard::prepare(&config(root.path(), OverwritePolicy::Never), "pov", &never_asked);
        assert!(matches!(
            result,
            Err(EngineError::OutputExists { count: 1, .. })
        ));
        assert!(root.path().join("simulation_003.pov").exists());
    }

    #[test]
    fn ask_follows_the_answer() {
        let root = tempdir().unwrap();
        touch(root.path(), "simulation_000.pov");
        let asked = Cell::new(0);

        let declined = OutputGuard::prepare(&config(root.path(), OverwritePolicy::Ask), "pov", &|q| {
            asked.set(asked.get() + 1);
            assert!(q.contains("simulation_*.pov"));
            false
        });
        assert!(matches!(declined, Err(EngineError::OutputExists { .. })));
        assert!(root.path().join("simulation_000.pov").exists());

        OutputGuard::prepare(&config(root.path(), OverwritePolicy::Ask), "pov", &|_| {
            asked.set(asked.get() + 1);
            true
        })
        .unwrap();
        assert!(!root.path().join("simulation_000.pov").exists());
        assert_eq!(asked.get(), 2);
    }

    #[test]
    fn ask_is_skipped_for_an_empty_directory() {
        let root = tempdir().unwrap();
        OutputGuard::prepare(&config(root.path(), OverwritePolicy::Ask), ".pov", &never_asked)
            .unwrap();
    }
}
