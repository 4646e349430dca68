use crate::core::scene::Scene;
use crate::engine::config::ImageConfig;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn write_scene(scene: &Scene, writer: &mut impl Write) -> io::Result<()> {
    write!(writer, "{}", scene)?;
    writer.flush()
}

pub fn write_scene_to_path<P: AsRef<Path>>(scene: &Scene, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_scene(scene, &mut writer)
}

/// Writes a POV-Ray INI file carrying the image settings, for use as
/// `povray <prefix>.ini +I<frame>.pov`.
pub fn write_render_ini(image: &ImageConfig, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "; POV-Ray render settings")?;
    writeln!(writer, "Width={}", image.width)?;
    writeln!(writer, "Height={}", image.height)?;
    writeln!(writer, "Quality={}", image.quality)?;
    match image.antialias {
        Some(threshold) => {
            writeln!(writer, "Antialias=On")?;
            writeln!(writer, "Antialias_Threshold={}", threshold)?;
        }
        None => writeln!(writer, "Antialias=Off")?,
    }
    writeln!(writer, "Output_File_Type=N")?;
    writer.flush()
}

pub fn write_render_ini_to_path<P: AsRef<Path>>(image: &ImageConfig, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_render_ini(image, &mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{Camera, SceneObject};
    use nalgebra::Point3;

    fn image(antialias: Option<f64>) -> ImageConfig {
        ImageConfig {
            width: 1024,
            height: 768,
            quality: 9,
            antialias,
        }
    }

    #[test]
    fn ini_lists_image_settings() {
        let mut out = Vec::new();
        write_render_ini(&image(Some(0.01)), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for line in [
            "Width=1024",
            "Height=768",
            "Quality=9",
            "Antialias=On",
            "Antialias_Threshold=0.01",
            "Output_File_Type=N",
        ] {
            assert!(text.lines().any(|l| l == line), "missing '{}' in\n{}", line, text);
        }
    }

    #[test]
    fn ini_disables_antialias_without_threshold() {
        let mut out = Vec::new();
        write_render_ini(&image(None), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Antialias=Off"));
        assert!(!text.contains("Antialias_Threshold"));
    }

    #[test]
    fn scene_file_matches_in_memory_sdl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame_000.pov");
        let scene = Scene::new(Camera::new(Point3::new(0.0, 0.0, -5.0), Point3::origin()))
            .object(SceneObject::sphere(Point3::origin(), 1.0));
        write_scene_to_path(&scene, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), scene.to_sdl());
    }
}
