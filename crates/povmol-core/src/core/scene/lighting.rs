use super::SdlVec;
use super::texture::Color;
use nalgebra::{Point3, Vector3};
use std::fmt;

/// Perspective camera looking from `location` towards `look_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub location: Point3<f64>,
    pub look_at: Point3<f64>,
}

impl Camera {
    pub fn new(location: Point3<f64>, look_at: Point3<f64>) -> Self {
        Self { location, look_at }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "camera {{")?;
        writeln!(f, "  location {}", SdlVec::from(&self.location))?;
        writeln!(f, "  look_at {}", SdlVec::from(&self.look_at))?;
        write!(f, "}}")
    }
}

/// Rectangular array of point lights producing soft shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLight {
    pub axis1: Vector3<f64>,
    pub axis2: Vector3<f64>,
    pub size1: u32,
    pub size2: u32,
    pub adaptive: u32,
    pub circular: bool,
    pub orient: bool,
}

impl fmt::Display for AreaLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "area_light {}, {}, {}, {} adaptive {}",
            SdlVec::from(&self.axis1),
            SdlVec::from(&self.axis2),
            self.size1,
            self.size2,
            self.adaptive
        )?;
        if self.circular {
            write!(f, " circular")?;
        }
        if self.orient {
            write!(f, " orient")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub location: Point3<f64>,
    pub color: Color,
    /// `(fade_distance, fade_power)`.
    pub fade: Option<(f64, f64)>,
    pub area: Option<AreaLight>,
}

impl LightSource {
    /// White light of the given intensity.
    pub fn new(location: Point3<f64>, intensity: f64) -> Self {
        Self::colored(location, Color::gray(intensity))
    }

    pub fn colored(location: Point3<f64>, color: Color) -> Self {
        Self {
            location,
            color,
            fade: None,
            area: None,
        }
    }

    pub fn with_fade(mut self, distance: f64, power: f64) -> Self {
        self.fade = Some((distance, power));
        self
    }

    pub fn with_area(mut self, area: AreaLight) -> Self {
        self.area = Some(area);
        self
    }
}

impl fmt::Display for LightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "light_source {{")?;
        writeln!(f, "  {} {}", SdlVec::from(&self.location), self.color)?;
        if let Some((distance, power)) = self.fade {
            writeln!(f, "  fade_distance {} fade_power {}", distance, power)?;
        }
        if let Some(area) = &self.area {
            writeln!(f, "  {}", area)?;
        }
        write!(f, "}}")
    }
}
