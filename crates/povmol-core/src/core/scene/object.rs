use super::texture::{Interior, Texture};
use super::{SdlVec, write_indented};
use nalgebra::{Point3, Vector3};
use std::fmt;

/// Transformation applied to an object, in the order it is listed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modifier {
    Translate(Vector3<f64>),
    /// Rotation in degrees around x, then y, then z.
    Rotate(Vector3<f64>),
    Scale(Vector3<f64>),
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Translate(v) => write!(f, "translate {}", SdlVec::from(v)),
            Modifier::Rotate(v) => write!(f, "rotate {}", SdlVec::from(v)),
            Modifier::Scale(v) => write!(f, "scale {}", SdlVec::from(v)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOp {
    /// Union that also removes interior surfaces; preferred for transparent objects.
    Merge,
    Union,
    Intersection,
    Difference,
}

impl CsgOp {
    fn keyword(self) -> &'static str {
        match self {
            CsgOp::Merge => "merge",
            CsgOp::Union => "union",
            CsgOp::Intersection => "intersection",
            CsgOp::Difference => "difference",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere {
        center: Point3<f64>,
        radius: f64,
    },
    Cylinder {
        base: Point3<f64>,
        cap: Point3<f64>,
        radius: f64,
        open: bool,
    },
    Plane {
        normal: Vector3<f64>,
        distance: f64,
    },
    /// TrueType text, extruded `thickness` units along +z.
    Text {
        font: String,
        text: String,
        thickness: f64,
        offset: f64,
    },
    Csg {
        op: CsgOp,
        children: Vec<SceneObject>,
    },
}

/// A renderable object: a shape plus its appearance and transformations.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub texture: Option<Texture>,
    pub interior: Option<Interior>,
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            texture: None,
            interior: None,
            modifiers: Vec::new(),
        }
    }

    pub fn sphere(center: Point3<f64>, radius: f64) -> Self {
        Self::new(Shape::Sphere { center, radius })
    }

    pub fn cylinder(base: Point3<f64>, cap: Point3<f64>, radius: f64) -> Self {
        Self::new(Shape::Cylinder {
            base,
            cap,
            radius,
            open: false,
        })
    }

    pub fn plane(normal: Vector3<f64>, distance: f64) -> Self {
        Self::new(Shape::Plane { normal, distance })
    }

    pub fn text(font: &str, text: &str, thickness: f64, offset: f64) -> Self {
        Self::new(Shape::Text {
            font: font.to_string(),
            text: text.to_string(),
            thickness,
            offset,
        })
    }

    pub fn csg(op: CsgOp, children: Vec<SceneObject>) -> Self {
        Self::new(Shape::Csg { op, children })
    }

    pub fn merge(children: Vec<SceneObject>) -> Self {
        Self::csg(CsgOp::Merge, children)
    }

    pub fn union(children: Vec<SceneObject>) -> Self {
        Self::csg(CsgOp::Union, children)
    }

    pub fn intersection(children: Vec<SceneObject>) -> Self {
        Self::csg(CsgOp::Intersection, children)
    }

    pub fn difference(children: Vec<SceneObject>) -> Self {
        Self::csg(CsgOp::Difference, children)
    }

    pub fn textured(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_interior(mut self, interior: Interior) -> Self {
        self.interior = Some(interior);
        self
    }

    /// Leaves the cylinder's end caps off. No effect on other shapes.
    pub fn open(mut self) -> Self {
        if let Shape::Cylinder { open, .. } = &mut self.shape {
            *open = true;
        }
        self
    }

    pub fn translate(mut self, v: Vector3<f64>) -> Self {
        self.modifiers.push(Modifier::Translate(v));
        self
    }

    pub fn rotate(mut self, degrees: Vector3<f64>) -> Self {
        self.modifiers.push(Modifier::Rotate(degrees));
        self
    }

    pub fn scale(mut self, v: Vector3<f64>) -> Self {
        self.modifiers.push(Modifier::Scale(v));
        self
    }

    /// Number of primitive (non-CSG) shapes contained in this object.
    pub fn primitive_count(&self) -> usize {
        match &self.shape {
            Shape::Csg { children, .. } => children.iter().map(Self::primitive_count).sum(),
            _ => 1,
        }
    }

    fn write_attributes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(texture) = &self.texture {
            writeln!(f, "  {}", texture)?;
        }
        if let Some(interior) = &self.interior {
            writeln!(f, "  {}", interior)?;
        }
        for modifier in &self.modifiers {
            writeln!(f, "  {}", modifier)?;
        }
        Ok(())
    }
}

impl fmt::Display for SceneObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            Shape::Sphere { center, radius } => {
                writeln!(f, "sphere {{")?;
                writeln!(f, "  {}, {}", SdlVec::from(center), radius)?;
            }
            Shape::Cylinder {
                base,
                cap,
                radius,
                open,
            } => {
                writeln!(f, "cylinder {{")?;
                writeln!(
                    f,
                    "  {}, {}, {}",
                    SdlVec::from(base),
                    SdlVec::from(cap),
                    radius
                )?;
                if *open {
                    writeln!(f, "  open")?;
                }
            }
            Shape::Plane { normal, distance } => {
                writeln!(f, "plane {{")?;
                writeln!(f, "  {}, {}", SdlVec::from(normal), distance)?;
            }
            Shape::Text {
                font,
                text,
                thickness,
                offset,
            } => {
                writeln!(f, "text {{")?;
                writeln!(
                    f,
                    "  ttf \"{}\" \"{}\" {}, {}",
                    font,
                    text.replace('"', "\\\""),
                    thickness,
                    offset
                )?;
            }
            Shape::Csg { op, children } => {
                writeln!(f, "{} {{", op.keyword())?;
                for child in children {
                    write_indented(f, &child.to_string())?;
                }
            }
        }
        self.write_attributes(f)?;
        write!(f, "}}")
    }
}
