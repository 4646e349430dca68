use super::lighting::{Camera, LightSource};
use super::object::SceneObject;
use super::texture::Color;
use std::fmt;

const SDL_VERSION: &str = "3.7";

/// Everything the renderer needs for one frame: camera, lights and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<LightSource>,
    pub objects: Vec<SceneObject>,
    pub background: Option<Color>,
    pub includes: Vec<String>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            lights: Vec::new(),
            objects: Vec::new(),
            background: None,
            includes: Vec::new(),
        }
    }

    pub fn include(mut self, file: &str) -> Self {
        self.includes.push(file.to_string());
        self
    }

    pub fn light(mut self, light: LightSource) -> Self {
        self.lights.push(light);
        self
    }

    pub fn object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn objects(mut self, objects: impl IntoIterator<Item = SceneObject>) -> Self {
        self.objects.extend(objects);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn primitive_count(&self) -> usize {
        self.objects.iter().map(SceneObject::primitive_count).sum()
    }

    pub fn to_sdl(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#version {};", SDL_VERSION)?;
        for include in &self.includes {
            writeln!(f, "#include \"{}\"", include)?;
        }
        writeln!(f, "global_settings {{ assumed_gamma 1.0 }}")?;
        writeln!(f)?;
        writeln!(f, "{}", self.camera)?;
        if let Some(background) = &self.background {
            writeln!(f, "background {{ {} }}", background)?;
        }
        for light in &self.lights {
            writeln!(f, "{}", light)?;
        }
        for object in &self.objects {
            writeln!(f, "{}", object)?;
        }
        Ok(())
    }
}
