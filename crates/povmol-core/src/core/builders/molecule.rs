use crate::core::models::molecule::Molecule;
use crate::core::palette;
use crate::core::scene::{SceneObject, Texture};
use crate::core::utils::geometry;
use nalgebra::{Point3, Vector3};
use std::collections::BTreeSet;
use tracing::{debug, warn};

const LABEL_FONT: &str = "timrom.ttf";
const LABEL_SCALE: f64 = 0.5;
/// Labels sit this many atom radii out from the atom center, towards the camera.
const LABEL_DISTANCE: f64 = 1.2;
const LABEL_EMBOSS: f64 = -0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// The atom name, e.g. "CA".
    Name,
    /// The atom's position in the molecule.
    Index,
}

/// How a molecule is drawn: space-filling spheres, optionally with bond sticks
/// and camera-facing labels.
#[derive(Debug, Clone)]
pub struct Depiction<'a> {
    molecule: &'a Molecule,
    offset: Vector3<f64>,
    model: Option<Texture>,
    stick_radius: Option<f64>,
    labels: Option<(LabelKind, Point3<f64>)>,
}

impl<'a> Depiction<'a> {
    pub fn new(molecule: &'a Molecule) -> Self {
        Self {
            molecule,
            offset: Vector3::zeros(),
            model: None,
            stick_radius: None,
            labels: None,
        }
    }

    /// Shifts every generated object without touching the molecule.
    pub fn with_offset(mut self, offset: Vector3<f64>) -> Self {
        self.offset = offset;
        self
    }

    /// Draws every atom with `model` instead of its element color.
    pub fn with_model(mut self, model: Texture) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_sticks(mut self, radius: f64) -> Self {
        self.stick_radius = Some(radius);
        self
    }

    pub fn with_labels(mut self, kind: LabelKind, camera_location: Point3<f64>) -> Self {
        self.labels = Some((kind, camera_location));
        self
    }

    fn position(&self, index: usize) -> Option<Point3<f64>> {
        self.molecule
            .atom(index)
            .map(|atom| atom.position + self.offset)
    }

    /// One sphere per atom, sized and colored by element.
    pub fn atoms(&self) -> Vec<SceneObject> {
        let mut unknown = BTreeSet::new();
        let spheres = self
            .molecule
            .atoms()
            .iter()
            .map(|atom| {
                if !palette::is_known_element(&atom.element) {
                    unknown.insert(atom.element.as_str());
                }
                let texture = self
                    .model
                    .unwrap_or_else(|| palette::atom_texture(&atom.element));
                SceneObject::sphere(atom.position + self.offset, palette::atom_size(&atom.element))
                    .textured(texture)
            })
            .collect();

        if unknown.contains("") {
            warn!(source = self.molecule.source(), "The PDB file is missing atom names.");
        } else if !unknown.is_empty() {
            let list: Vec<&str> = unknown.into_iter().collect();
            warn!(
                source = self.molecule.source(),
                elements = %list.join(", "),
                "Elements without a palette entry are drawn with the default style."
            );
        }
        spheres
    }

    /// One two-colored stick per bond, split at the midpoint of the gap between the atom surfaces.
    pub fn sticks(&self, radius: f64) -> Vec<SceneObject> {
        let mut sticks = Vec::with_capacity(self.molecule.bond_count());
        for bond in self.molecule.bonds() {
            let (Some(a), Some(b)) = (self.position(bond.a()), self.position(bond.b())) else {
                continue;
            };
            let Some(unit) = geometry::unit_towards(&a, &b) else {
                warn!(a = bond.a(), b = bond.b(), "Skipping stick for a zero-length bond.");
                continue;
            };
            let atoms = self.molecule.atoms();
            let (element_a, element_b) = (&atoms[bond.a()].element, &atoms[bond.b()].element);

            let a_surface = a + unit.into_inner() * palette::atom_size(element_a);
            let b_surface = b - unit.into_inner() * palette::atom_size(element_b);
            let midpoint = nalgebra::center(&a_surface, &b_surface);

            sticks.push(SceneObject::union(vec![
                SceneObject::cylinder(midpoint, a, radius).textured(palette::stick_texture(element_a)),
                SceneObject::cylinder(midpoint, b, radius).textured(palette::stick_texture(element_b)),
            ]));
        }
        sticks
    }

    /// Text labels embossed into the camera-facing side of each atom.
    pub fn labels(&self, kind: LabelKind, camera: &Point3<f64>) -> Vec<SceneObject> {
        let text_model = palette::text_model();
        let mut labels = Vec::with_capacity(self.molecule.len());
        for (index, atom) in self.molecule.atoms().iter().enumerate() {
            let label = match kind {
                LabelKind::Name => atom.name.clone(),
                LabelKind::Index => index.to_string(),
            };
            let a = atom.position + self.offset;
            let Some(towards_camera) = geometry::unit_towards(&a, camera) else {
                debug!(index, "Camera coincides with atom; label skipped.");
                continue;
            };

            let chars = label.chars().count() as f64;
            let letter_offset = Vector3::new(0.15 * chars, 0.13 * chars, 0.0);
            let radius = palette::atom_size(&atom.element);
            let anchor = a + towards_camera.into_inner() * (LABEL_DISTANCE * radius) - letter_offset;

            let y_angle = (a.x - camera.x).atan2(a.z - camera.z).to_degrees();
            let x_angle = (a.y - camera.y).atan2(a.z - camera.z).to_degrees();

            let text = SceneObject::text(LABEL_FONT, &label, 1.0, 0.0)
                .textured(text_model)
                .scale(Vector3::repeat(LABEL_SCALE))
                .rotate(Vector3::new(-x_angle, y_angle, 0.0))
                .translate(anchor.coords);
            let shell = SceneObject::sphere(a, radius).textured(text_model);
            labels.push(
                SceneObject::intersection(vec![shell, text])
                    .translate(Vector3::new(0.0, 0.0, LABEL_EMBOSS)),
            );
        }
        labels
    }

    /// Atoms first, then sticks and labels when enabled.
    pub fn build(&self) -> Vec<SceneObject> {
        let mut objects = self.atoms();
        if let Some(radius) = self.stick_radius {
            objects.extend(self.sticks(radius));
        }
        if let Some((kind, camera)) = &self.labels {
            objects.extend(self.labels(*kind, camera));
        }
        objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::molecule::MoleculeOptions;
    use crate::core::scene::Shape;

    fn carbon_pair() -> Molecule {
        let atoms = vec![
            Atom::new("C1", "C", Point3::new(0.0, 0.0, 0.0)),
            Atom::new("C2", "C", Point3::new(3.0, 0.0, 0.0)),
        ];
        Molecule::from_parts("pair", atoms, [(0, 1)], &MoleculeOptions::uncentered()).unwrap()
    }

    fn sphere_of(object: &SceneObject) -> (Point3<f64>, f64) {
        match &object.shape {
            Shape::Sphere { center, radius } => (*center, *radius),
            other => panic!("expected sphere, got {:?}", other),
        }
    }

    #[test]
    fn atoms_use_palette_size_and_offset() {
        let molecule = carbon_pair();
        let objects = Depiction::new(&molecule)
            .with_offset(Vector3::new(0.0, 1.0, 0.0))
            .atoms();
        assert_eq!(objects.len(), 2);
        let (center, radius) = sphere_of(&objects[1]);
        assert_eq!(center, Point3::new(3.0, 1.0, 0.0));
        assert_eq!(radius, palette::atom_size("C"));
        assert_eq!(objects[1].texture, Some(palette::atom_texture("C")));
    }

    #[test]
    fn model_override_replaces_element_colors() {
        let molecule = carbon_pair();
        let model = palette::default_sphere_model();
        let objects = Depiction::new(&molecule).with_model(model).atoms();
        assert!(objects.iter().all(|o| o.texture == Some(model)));
    }

    #[test]
    fn unknown_elements_fall_back_to_default_style() {
        let atoms = vec![Atom::new("X", "XX", Point3::origin())];
        let molecule =
            Molecule::from_parts("odd", atoms, [], &MoleculeOptions::uncentered()).unwrap();
        let objects = Depiction::new(&molecule).atoms();
        assert_eq!(sphere_of(&objects[0]).1, palette::DEFAULT_ATOM_SIZE);
    }

    #[test]
    fn stick_halves_meet_between_atom_surfaces() {
        let molecule = carbon_pair();
        let sticks = Depiction::new(&molecule).sticks(0.4);
        assert_eq!(sticks.len(), 1);
        let Shape::Csg { children, .. } = &sticks[0].shape else {
            panic!("expected a union");
        };
        assert_eq!(children.len(), 2);
        match (&children[0].shape, &children[1].shape) {
            (
                Shape::Cylinder { base: m1, cap: a, radius, .. },
                Shape::Cylinder { base: m2, cap: b, .. },
            ) => {
                assert_eq!(*m1, Point3::new(1.5, 0.0, 0.0));
                assert_eq!(m1, m2);
                assert_eq!(*a, Point3::origin());
                assert_eq!(*b, Point3::new(3.0, 0.0, 0.0));
                assert_eq!(*radius, 0.4);
            }
            other => panic!("expected cylinders, got {:?}", other),
        }
        assert_eq!(children[0].texture, Some(palette::stick_texture("C")));
    }

    #[test]
    fn zero_length_bonds_are_skipped() {
        let atoms = vec![
            Atom::new("C", "C", Point3::origin()),
            Atom::new("C", "C", Point3::origin()),
        ];
        let molecule =
            Molecule::from_parts("overlap", atoms, [(0, 1)], &MoleculeOptions::uncentered())
                .unwrap();
        assert!(Depiction::new(&molecule).sticks(0.4).is_empty());
    }

    #[test]
    fn labels_face_the_camera() {
        let molecule = carbon_pair();
        let camera = Point3::new(0.0, 0.0, -10.0);
        let labels = Depiction::new(&molecule).labels(LabelKind::Name, &camera);
        assert_eq!(labels.len(), 2);

        let label = &labels[0];
        assert_eq!(
            label.modifiers,
            vec![crate::core::scene::Modifier::Translate(Vector3::new(0.0, 0.0, -0.15))]
        );
        let Shape::Csg { children, .. } = &label.shape else {
            panic!("expected an intersection");
        };
        let text = &children[1];
        assert!(matches!(&text.shape, Shape::Text { text, .. } if text == "C"));
        let sdl = text.to_string();
        assert!(sdl.contains("scale <0.5, 0.5, 0.5>"));
        // 1.2 radii towards the camera, minus the single-letter offset.
        assert!(sdl.contains("translate <-0.15, -0.13, -1.2>"), "{}", sdl);
    }

    #[test]
    fn index_labels_use_atom_positions() {
        let molecule = carbon_pair();
        let labels = Depiction::new(&molecule).labels(LabelKind::Index, &Point3::new(0.0, 5.0, -10.0));
        let Shape::Csg { children, .. } = &labels[1].shape else {
            panic!("expected an intersection");
        };
        assert!(matches!(&children[1].shape, Shape::Text { text, .. } if text == "1"));
    }

    #[test]
    fn camera_inside_an_atom_skips_its_label() {
        let molecule = carbon_pair();
        let labels = Depiction::new(&molecule).labels(LabelKind::Name, &Point3::origin());
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn build_combines_enabled_parts() {
        let molecule = carbon_pair();
        let plain = Depiction::new(&molecule).build();
        assert_eq!(plain.len(), 2);
        let full = Depiction::new(&molecule)
            .with_sticks(0.4)
            .with_labels(LabelKind::Name, Point3::new(0.0, 14.0, -28.0))
            .build();
        assert_eq!(full.len(), 2 + 1 + 2);
    }
}
