//! DNA double strand, promoter opening and RNA synthesis geometry.
//!
//! The strand runs along +x with one base pair every [`BASE_SPACING`] units.
//! The pre-promoter part is a closed double strand; from the TATA box onward
//! the two strands can be pulled apart by a stretch amount, and the RNA
//! transcript grows below the opened strand.

use crate::core::models::sequence::{Base, Sequence};
use crate::core::palette;
use crate::core::scene::SceneObject;
use nalgebra::Point3;
use thiserror::Error;

pub const TATA_BOX: [Base; 6] = [Base::T, Base::A, Base::T, Base::A, Base::A, Base::A];
pub const BASE_SPACING: f64 = 9.0;
pub const BACKBONE_Y: f64 = 8.0;
pub const BASE_Y: f64 = 6.0;
pub const STRAND_RADIUS: f64 = 3.0;
pub const BACKBONE_START_X: f64 = -10.0;
/// Length along x over which the strands bend apart at the opening.
pub const OPENING_LENGTH: f64 = 20.0;
pub const RNA_BASE_TOP_Y: f64 = -6.0;
pub const RNA_BASE_BOTTOM_Y: f64 = -12.0;
const RNA_ROOF_HALF_WIDTH: f64 = 5.0;
pub const DEFAULT_POLYMERASE_LENGTH: f64 = 0.6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NucleicError {
    #[error("Sequence of {length} bases has no TATA box (TATAAA) to start transcription from")]
    MissingPromoter { length: usize },
}

fn point(x: f64, y: f64) -> Point3<f64> {
    Point3::new(x, y, 0.0)
}

fn x_of(index: usize) -> f64 {
    index as f64 * BASE_SPACING
}

fn strand(from: Point3<f64>, to: Point3<f64>) -> SceneObject {
    SceneObject::cylinder(from, to, STRAND_RADIUS).textured(palette::dna_backbone_model())
}

fn base_stub(x: f64, from_y: f64, to_y: f64, base: Base) -> SceneObject {
    SceneObject::cylinder(point(x, from_y), point(x, to_y), STRAND_RADIUS)
        .textured(palette::base_model(base))
}

/// A sequence split at its first TATA box, laid out along x.
#[derive(Debug, Clone, PartialEq)]
pub struct DnaLayout {
    pre: Sequence,
    post: Sequence,
}

impl DnaLayout {
    pub fn from_sequence(sequence: &Sequence) -> Result<Self, NucleicError> {
        let (pre, post) = sequence
            .split_at_motif(&Sequence::new(TATA_BOX.to_vec()))
            .ok_or(NucleicError::MissingPromoter {
                length: sequence.len(),
            })?;
        Ok(Self { pre, post })
    }

    pub fn pre_promoter(&self) -> &Sequence {
        &self.pre
    }

    /// The TATA box and everything after it.
    pub fn post_promoter(&self) -> &Sequence {
        &self.post
    }

    /// x coordinate of the first promoter base.
    pub fn promoter_x(&self) -> f64 {
        x_of(self.pre.len())
    }

    /// Length along x of the post-promoter strand.
    pub fn post_length(&self) -> f64 {
        x_of(self.post.len())
    }

    /// The closed double strand up to the promoter: two backbones and one base pair per base.
    pub fn double_strand(&self) -> SceneObject {
        let end = self.promoter_x();
        let mut parts = vec![
            strand(point(BACKBONE_START_X, BACKBONE_Y), point(end, BACKBONE_Y)),
            strand(point(BACKBONE_START_X, -BACKBONE_Y), point(end, -BACKBONE_Y)),
        ];
        for (i, &base) in self.pre.bases().iter().enumerate() {
            let x = x_of(i);
            parts.push(base_stub(x, BASE_Y, 0.0, base));
            parts.push(base_stub(x, -BASE_Y, 0.0, base.complement()));
        }
        SceneObject::merge(parts)
    }

    /// The post-promoter strands, pulled `stretch` units apart starting at `opening_x`.
    ///
    /// Returns the two bends, the two straight backbones and the two merged base rows.
    pub fn opening_strands(&self, opening_x: f64, stretch: f64) -> Vec<SceneObject> {
        let top = BACKBONE_Y + stretch;
        let bottom = -BACKBONE_Y - stretch;
        let bend_end = opening_x + OPENING_LENGTH;
        let strand_end = opening_x + self.post_length();

        let mut top_bases = Vec::with_capacity(self.post.len());
        let mut bottom_bases = Vec::with_capacity(self.post.len());
        for (i, &base) in self.post.bases().iter().enumerate() {
            let x = self.promoter_x() + x_of(i);
            top_bases.push(base_stub(x, BASE_Y + stretch, stretch, base));
            bottom_bases.push(base_stub(x, -BASE_Y - stretch, -stretch, base.complement()));
        }

        vec![
            strand(point(opening_x, BACKBONE_Y), point(bend_end, top)),
            strand(point(opening_x, -BACKBONE_Y), point(bend_end, bottom)),
            strand(point(bend_end, top), point(strand_end, top)),
            strand(point(bend_end, bottom), point(strand_end, bottom)),
            SceneObject::merge(top_bases),
            SceneObject::merge(bottom_bases),
        ]
    }

    /// The RNA transcript covering post-promoter bases up to `last_index`.
    ///
    /// The promoter itself is never transcribed, so the first six bases are skipped.
    /// Returns `None` while nothing has been synthesized yet.
    pub fn rna_strand(&self, last_index: usize) -> Option<SceneObject> {
        let last = last_index.min(self.post.len().checked_sub(1)?);
        let mut parts = Vec::new();
        for i in TATA_BOX.len()..=last {
            let Some(base) = self.post.get(i) else {
                break;
            };
            let x = self.promoter_x() + x_of(i);
            parts.push(strand(
                point(x - RNA_ROOF_HALF_WIDTH, RNA_BASE_TOP_Y),
                point(x + RNA_ROOF_HALF_WIDTH, RNA_BASE_TOP_Y),
            ));
            parts.push(base_stub(x, RNA_BASE_TOP_Y, RNA_BASE_BOTTOM_Y, base.transcribed()));
        }
        (!parts.is_empty()).then(|| SceneObject::merge(parts))
    }
}

/// RNA polymerase: a capsule of two spheres joined by a cylinder along x.
pub fn polymerase(position: Point3<f64>, size: f64, length: f64) -> SceneObject {
    let half = size * length;
    let left = Point3::new(position.x - half, position.y, position.z);
    let right = Point3::new(position.x + half, position.y, position.z);
    SceneObject::merge(vec![
        SceneObject::sphere(left, size),
        SceneObject::cylinder(left, right, size),
        SceneObject::sphere(right, size),
    ])
    .textured(palette::polymerase_model())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Shape;

    fn layout(s: &str) -> DnaLayout {
        DnaLayout::from_sequence(&s.parse().unwrap()).unwrap()
    }

    fn children(object: &SceneObject) -> &[SceneObject] {
        match &object.shape {
            Shape::Csg { children, .. } => children,
            other => panic!("expected CSG, got {:?}", other),
        }
    }

    fn cylinder_ends(object: &SceneObject) -> (Point3<f64>, Point3<f64>) {
        match &object.shape {
            Shape::Cylinder { base, cap, .. } => (*base, *cap),
            other => panic!("expected cylinder, got {:?}", other),
        }
    }

    #[test]
    fn splits_at_first_tata_box() {
        let dna = layout("GCGTATAAACCGTATAAAG");
        assert_eq!(dna.pre_promoter().to_string(), "GCG");
        assert_eq!(dna.post_promoter().to_string(), "TATAAACCGTATAAAG");
        assert_eq!(dna.promoter_x(), 27.0);
        assert_eq!(dna.post_length(), 16.0 * 9.0);
    }

    #[test]
    fn missing_tata_box_is_an_error() {
        let sequence: Sequence = "ACGTACGT".parse().unwrap();
        assert_eq!(
            DnaLayout::from_sequence(&sequence),
            Err(NucleicError::MissingPromoter { length: 8 })
        );
    }

    #[test]
    fn double_strand_has_backbones_and_complementary_pairs() {
        let dna = layout("GCTATAAA");
        let parts = children(&dna.double_strand()).to_vec();
        assert_eq!(parts.len(), 2 + 2 * 2);
        assert_eq!(
            cylinder_ends(&parts[0]),
            (Point3::new(-10.0, 8.0, 0.0), Point3::new(18.0, 8.0, 0.0))
        );
        assert_eq!(
            cylinder_ends(&parts[4]),
            (Point3::new(9.0, 6.0, 0.0), Point3::new(9.0, 0.0, 0.0))
        );
        assert_eq!(parts[2].texture, Some(palette::base_model(Base::G)));
        assert_eq!(parts[3].texture, Some(palette::base_model(Base::C)));
    }

    #[test]
    fn opening_strands_move_apart_with_stretch() {
        let dna = layout("GCTATAAAC");
        let parts = dna.opening_strands(dna.promoter_x(), 12.0);
        assert_eq!(parts.len(), 6);
        assert_eq!(
            cylinder_ends(&parts[0]),
            (Point3::new(18.0, 8.0, 0.0), Point3::new(38.0, 20.0, 0.0))
        );
        assert_eq!(cylinder_ends(&parts[3]).1, Point3::new(18.0 + 63.0, -20.0, 0.0));

        let top = children(&parts[4]);
        assert_eq!(top.len(), 7);
        assert_eq!(
            cylinder_ends(&top[0]),
            (Point3::new(18.0, 18.0, 0.0), Point3::new(18.0, 12.0, 0.0))
        );
    }

    #[test]
    fn unstretched_strands_line_up_with_double_strand() {
        let dna = layout("TATAAA");
        let parts = dna.opening_strands(dna.promoter_x(), 0.0);
        assert_eq!(cylinder_ends(&parts[0]).1.y, BACKBONE_Y);
        assert_eq!(cylinder_ends(&parts[1]).1.y, -BACKBONE_Y);
    }

    #[test]
    fn rna_skips_promoter_and_uses_uracil() {
        let dna = layout("TATAAATGC");
        assert!(dna.rna_strand(5).is_none());

        let rna = dna.rna_strand(7).unwrap();
        let parts = children(&rna);
        assert_eq!(parts.len(), 4);
        assert_eq!(
            cylinder_ends(&parts[0]),
            (Point3::new(49.0, -6.0, 0.0), Point3::new(59.0, -6.0, 0.0))
        );
        assert_eq!(
            cylinder_ends(&parts[1]),
            (Point3::new(54.0, -6.0, 0.0), Point3::new(54.0, -12.0, 0.0))
        );
        assert_eq!(parts[1].texture, Some(palette::base_model(Base::U)));
        assert_eq!(parts[3].texture, Some(palette::base_model(Base::G)));
    }

    #[test]
    fn rna_is_clamped_to_the_sequence() {
        let dna = layout("TATAAAGG");
        let parts = children(&dna.rna_strand(1000).unwrap()).len();
        assert_eq!(parts, 4);
    }

    #[test]
    fn polymerase_is_a_textured_capsule() {
        let capsule = polymerase(Point3::new(0.0, 2.0, 0.0), 10.0, DEFAULT_POLYMERASE_LENGTH);
        let parts = children(&capsule);
        assert_eq!(parts.len(), 3);
        assert_eq!(
            cylinder_ends(&parts[1]),
            (Point3::new(-6.0, 2.0, 0.0), Point3::new(6.0, 2.0, 0.0))
        );
        assert_eq!(capsule.texture, Some(palette::polymerase_model()));
    }
}
