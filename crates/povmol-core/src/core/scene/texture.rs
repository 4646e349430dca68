use super::SdlVec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgb {
        rgb: [f64; 3],
        /// Transparency that also tints light passing through (`rgbf`).
        filter: Option<f64>,
    },
    /// A color declared in `colors.inc`, e.g. `Gold`. Scenes using one must include that file.
    Named {
        name: &'static str,
        filter: Option<f64>,
    },
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color::Rgb {
            rgb: [r, g, b],
            filter: None,
        }
    }

    pub const fn gray(v: f64) -> Self {
        Self::rgb(v, v, v)
    }

    pub const fn named(name: &'static str) -> Self {
        Color::Named { name, filter: None }
    }

    pub const fn with_filter(self, filter: f64) -> Self {
        match self {
            Color::Rgb { rgb, .. } => Color::Rgb {
                rgb,
                filter: Some(filter),
            },
            Color::Named { name, .. } => Color::Named {
                name,
                filter: Some(filter),
            },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgb {
                rgb: [r, g, b],
                filter: Some(filter),
            } => write!(f, "color rgbf <{}, {}, {}, {}>", r, g, b, filter),
            Color::Rgb { rgb, filter: None } => write!(f, "color rgb {}", SdlVec(rgb)),
            Color::Named { name, filter: Some(filter) } => {
                write!(f, "color {} filter {}", name, filter)
            }
            Color::Named { name, filter: None } => write!(f, "color {}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pigment {
    Solid(Color),
    Checker { even: Color, odd: Color, scale: f64 },
}

impl fmt::Display for Pigment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pigment::Solid(color) => write!(f, "pigment {{ {} }}", color),
            Pigment::Checker { even, odd, scale } => {
                write!(f, "pigment {{ checker {} {} scale {} }}", even, odd, scale)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Finish {
    pub phong: Option<f64>,
    pub reflection: Option<f64>,
    pub ambient: Option<f64>,
}

impl Finish {
    pub const fn new() -> Self {
        Self {
            phong: None,
            reflection: None,
            ambient: None,
        }
    }

    pub const fn phong(mut self, phong: f64) -> Self {
        self.phong = Some(phong);
        self
    }

    pub const fn reflection(mut self, reflection: f64) -> Self {
        self.reflection = Some(reflection);
        self
    }

    pub const fn ambient(mut self, ambient: f64) -> Self {
        self.ambient = Some(ambient);
        self
    }
}

impl fmt::Display for Finish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "finish {{")?;
        if let Some(phong) = self.phong {
            write!(f, " phong {}", phong)?;
        }
        if let Some(reflection) = self.reflection {
            write!(f, " reflection {}", reflection)?;
        }
        if let Some(ambient) = self.ambient {
            write!(f, " ambient {}", ambient)?;
        }
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interior {
    pub ior: f64,
}

impl fmt::Display for Interior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interior {{ ior {} }}", self.ior)
    }
}

/// Surface appearance of an object: a pigment plus an optional finish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    pub pigment: Pigment,
    pub finish: Option<Finish>,
}

impl Texture {
    pub const fn solid(color: Color) -> Self {
        Self {
            pigment: Pigment::Solid(color),
            finish: None,
        }
    }

    pub const fn with_finish(mut self, finish: Finish) -> Self {
        self.finish = Some(finish);
        self
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture {{ {}", self.pigment)?;
        if let Some(finish) = &self.finish {
            write!(f, " {}", finish)?;
        }
        write!(f, " }}")
    }
}
