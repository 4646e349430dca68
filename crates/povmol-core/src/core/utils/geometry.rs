use nalgebra::{Point3, Rotation3, Unit, Vector3};

const DEGENERATE_NORM: f64 = 1e-12;

/// Rotation of `theta` radians around `axis`, computed as the matrix exponential
/// `exp([â·θ]×)` of the skew-symmetric generator of the normalized axis.
///
/// Returns `None` when the axis has (near) zero length or any input is not finite.
pub fn rotation_exp(axis: &Vector3<f64>, theta: f64) -> Option<Rotation3<f64>> {
    if !theta.is_finite() || !axis.iter().all(|c| c.is_finite()) {
        return None;
    }
    let unit = Unit::try_new(*axis, DEGENERATE_NORM)?;
    Some(Rotation3::from_scaled_axis(unit.into_inner() * theta))
}

pub fn unit_towards(from: &Point3<f64>, to: &Point3<f64>) -> Option<Unit<Vector3<f64>>> {
    Unit::try_new(to - from, DEGENERATE_NORM)
}

/// Unweighted centroid of a point set, `None` for an empty set.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Point3<f64>> {
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    (count > 0).then(|| Point3::from(sum / count as f64))
}

/// Point on the lemniscate of Bernoulli ("figure 8") at parameter `t`.
///
/// `size` controls the overall width; the curve spans roughly `[-size/2, size/2]` on x.
pub fn lemniscate(t: f64, size: f64) -> (f64, f64) {
    let scale = size / (3.0 - (2.0 * t).cos());
    (scale * t.cos(), scale * (2.0 * t).sin() / 2.0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn skew(v: &Vector3<f64>) -> nalgebra::Matrix3<f64> {
        nalgebra::Matrix3::new(0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0)
    }

    #[test]
    fn rotation_exp_matches_rodrigues_formula() {
        let axis = Vector3::new(1.0, 2.0, -0.5);
        let theta: f64 = 0.73;
        let k = skew(&axis.normalize());
        let expected =
            nalgebra::Matrix3::identity() + k * theta.sin() + k * k * (1.0 - theta.cos());

        let rot = rotation_exp(&axis, theta).unwrap();
        assert!((rot.matrix() - expected).norm() < EPS);
    }

    #[test]
    fn rotation_exp_quarter_turn_about_z_maps_x_to_y() {
        let rot = rotation_exp(&Vector3::z(), FRAC_PI_2).unwrap();
        let v = rot * Vector3::x();
        assert!((v - Vector3::y()).norm() < EPS);
    }

    #[test]
    fn rotation_exp_ignores_axis_length() {
        let a = rotation_exp(&Vector3::new(0.0, 3.0, 0.0), PI / 3.0).unwrap();
        let b = rotation_exp(&Vector3::new(0.0, 0.1, 0.0), PI / 3.0).unwrap();
        assert!((a.matrix() - b.matrix()).norm() < EPS);
    }

    #[test]
    fn rotation_exp_rejects_degenerate_input() {
        assert!(rotation_exp(&Vector3::zeros(), 1.0).is_none());
        assert!(rotation_exp(&Vector3::new(f64::NAN, 0.0, 1.0), 1.0).is_none());
        assert!(rotation_exp(&Vector3::x(), f64::INFINITY).is_none());
    }

    #[test]
    fn centroid_averages_points() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 4.0, -6.0),
        ];
        assert_eq!(centroid(&pts), Some(Point3::new(1.0, 2.0, -3.0)));
        assert_eq!(centroid(&[] as &[Point3<f64>]), None);
    }

    #[test]
    fn unit_towards_handles_coincident_points() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(unit_towards(&p, &p).is_none());
        let u = unit_towards(&p, &Point3::new(1.0, 1.0, 5.0)).unwrap();
        assert!((u.into_inner() - Vector3::z()).norm() < EPS);
    }

    #[test]
    fn lemniscate_passes_through_origin_at_quarter_period() {
        let (x, y) = lemniscate(FRAC_PI_2, 25.0);
        assert!(x.abs() < EPS);
        assert!(y.abs() < EPS);
        let (x0, y0) = lemniscate(0.0, 25.0);
        assert!((x0 - 12.5).abs() < EPS);
        assert!(y0.abs() < EPS);
    }

    #[test]
    fn lerp_interpolates_linearly() {
        assert_eq!(lerp(-10.0, 10.0, 0.0), -10.0);
        assert_eq!(lerp(-10.0, 10.0, 0.5), 0.0);
        assert_eq!(lerp(-10.0, 10.0, 1.0), 10.0);
    }
}
