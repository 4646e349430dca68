//! Atom styling tables and the stock scene elements shared by all animations.

use crate::core::models::sequence::Base;
use crate::core::scene::{Camera, Color, Finish, LightSource, Pigment, SceneObject, Texture};
use nalgebra::{Point3, Vector3};
use phf::{Map, phf_map};

/// Display size used for elements missing from [`ATOM_SIZES`].
pub const DEFAULT_ATOM_SIZE: f64 = 0.5;
/// Color used for elements missing from [`ATOM_COLORS`].
pub const DEFAULT_ATOM_COLOR: Color = Color::rgb(0.0, 1.0, 1.0);
/// Covalent radius assumed for elements missing from [`COVALENT_RADII`] (carbon).
pub const DEFAULT_COVALENT_RADIUS: f64 = 0.77;

#[rustfmt::skip]
pub static ATOM_COLORS: Map<&'static str, Color> = phf_map! {
    "C"  => Color::rgb(0.4, 0.4, 0.4),
    "H"  => Color::rgb(1.0, 1.0, 1.0),
    "N"  => Color::rgb(0.0, 0.0, 1.0),
    "O"  => Color::rgb(1.0, 0.0, 0.0),
    "P"  => Color::rgb(1.0, 0.5, 0.0),
    "S"  => Color::rgb(0.6, 0.8, 0.2),
    // Hydroxyl atom names some PDB writers put in the element column.
    "OH" => Color::rgb(1.0, 0.0, 0.0),
    "HH" => Color::rgb(1.0, 1.0, 1.0),
};

#[rustfmt::skip]
pub static ATOM_SIZES: Map<&'static str, f64> = phf_map! {
    "C"  => 1.0,
    "H"  => 0.65,
    "HH" => 0.65,
    "N"  => 0.9,
    "O"  => 1.0,
    "S"  => 1.2,
    "OH" => 1.0,
    "P"  => 1.25,
};

#[rustfmt::skip]
pub static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H"  => 0.37, "C"  => 0.77, "N"  => 0.75, "O"  => 0.73,
    "F"  => 0.71, "P"  => 1.06, "S"  => 1.02, "CL" => 0.99,
    "BR" => 1.14, "I"  => 1.33, "NA" => 1.54, "MG" => 1.30,
    "K"  => 1.96, "CA" => 1.74, "FE" => 1.25, "ZN" => 1.20,
    "SE" => 1.16,
};

fn key(element: &str) -> String {
    element.trim().to_ascii_uppercase()
}

pub fn is_known_element(element: &str) -> bool {
    ATOM_COLORS.contains_key(key(element).as_str())
}

pub fn atom_color(element: &str) -> Color {
    ATOM_COLORS
        .get(key(element).as_str())
        .copied()
        .unwrap_or(DEFAULT_ATOM_COLOR)
}

pub fn atom_size(element: &str) -> f64 {
    ATOM_SIZES
        .get(key(element).as_str())
        .copied()
        .unwrap_or(DEFAULT_ATOM_SIZE)
}

pub fn covalent_radius(element: &str) -> f64 {
    COVALENT_RADII
        .get(key(element).as_str())
        .copied()
        .unwrap_or(DEFAULT_COVALENT_RADIUS)
}

/// Space-filling atom surface.
pub fn atom_texture(element: &str) -> Texture {
    Texture::solid(atom_color(element)).with_finish(Finish::new().phong(0.9).reflection(0.1))
}

/// Half-bond stick surface, matte compared to the atoms.
pub fn stick_texture(element: &str) -> Texture {
    Texture::solid(atom_color(element)).with_finish(Finish::new().phong(0.3).reflection(0.1))
}

pub fn default_light() -> LightSource {
    LightSource::new(Point3::new(2.0, 4.0, -3.0), 1.5)
}

pub fn default_camera() -> Camera {
    Camera::new(Point3::new(0.0, 14.0, -28.0), Point3::new(0.0, 0.0, -3.0))
}

pub fn floor_camera() -> Camera {
    Camera::new(Point3::new(0.0, 5.0, -22.0), Point3::new(0.0, 2.0, -3.0))
}

pub fn default_ground() -> SceneObject {
    SceneObject::plane(Vector3::y(), -6.0).textured(Texture::solid(Color::rgb(1.5, 1.0, 1.0)))
}

pub fn checkered_ground() -> SceneObject {
    SceneObject::plane(Vector3::y(), -1.0).textured(Texture {
        pigment: Pigment::Checker {
            even: Color::gray(1.0),
            odd: Color::gray(0.5),
            scale: 5.0,
        },
        finish: None,
    })
}

pub fn default_sphere_model() -> Texture {
    Texture::solid(Color::rgb(0.9, 0.05, 0.05).with_filter(0.7))
        .with_finish(Finish::new().phong(0.6).reflection(0.4))
}

/// Gold lettering used for atom labels. Scenes using it include `colors.inc`.
pub fn text_model() -> Texture {
    Texture::solid(Color::named("Gold")).with_finish(Finish::new().phong(0.6).reflection(0.4))
}

pub fn dna_backbone_model() -> Texture {
    Texture::solid(Color::rgb(0.6, 0.65, 0.75)).with_finish(Finish::new().phong(0.6).reflection(0.1))
}

pub fn base_model(base: Base) -> Texture {
    let color = match base {
        Base::A => Color::rgb(0.2, 0.8, 0.2),
        Base::C => Color::rgb(0.2, 0.4, 0.9),
        Base::G => Color::rgb(0.95, 0.8, 0.1),
        Base::T => Color::rgb(0.85, 0.2, 0.2),
        Base::U => Color::rgb(1.0, 0.5, 0.0),
    };
    Texture::solid(color).with_finish(Finish::new().phong(0.6).reflection(0.1))
}

pub fn polymerase_model() -> Texture {
    Texture::solid(Color::rgb(0.55, 0.3, 0.7).with_filter(0.4))
        .with_finish(Finish::new().phong(0.6).reflection(0.2))
}
