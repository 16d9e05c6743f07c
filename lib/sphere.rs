use std::sync::Arc;

use crate::object::Geometry;
use crate::ray::Ray;
use crate::surface::Surface;
use crate::util::Vector;

#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vector,
    pub radius: f64,
    pub surface: Arc<Surface>,
}

impl Sphere {
    pub fn new(center: Vector, radius: f64, surface: Arc<Surface>) -> Sphere {
        return Sphere { center, radius, surface };
    }
}

impl Geometry for Sphere {
    fn intersect(&self, r: &Ray) -> Option<f64> {
        if !(self.radius > 0.0) {
            return None;
        }

        // direction is unit length, so a == 1
        let oc = r.origin - self.center;
        let half_b = oc.dot(r.direction);
        let c = oc.length_squared() - (self.radius * self.radius);

        let discriminant = (half_b * half_b) - c;

        if discriminant < 0.0 {
            return None;
        }

        let discriminant_sqrt = discriminant.sqrt();

        let root_lower = -half_b - discriminant_sqrt;
        if root_lower > 0.0 {
            return Some(root_lower);
        }

        let root_upper = -half_b + discriminant_sqrt;
        return if root_upper > 0.0 { Some(root_upper) } else { None };
    }

    fn normal(&self, p: Vector) -> Vector {
        return (p - self.center).try_normalize().unwrap_or(Vector::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn unit_sphere(center: Vector, radius: f64) -> Sphere {
        Sphere::new(center, radius, Arc::new(Surface::matte(Color::WHITE)))
    }

    #[test]
    fn hits_near_side_first() {
        let s = unit_sphere(Vector::ZERO, 1.0);
        let r = Ray::new(Vector::new(0.0, 0.0, 5.0), -Vector::Z).unwrap();
        assert_eq!(s.intersect(&r), Some(4.0));
    }

    #[test]
    fn from_inside_hits_far_side() {
        let s = unit_sphere(Vector::ZERO, 2.0);
        let r = Ray::new(Vector::ZERO, Vector::X).unwrap();
        assert_eq!(s.intersect(&r), Some(2.0));
    }

    #[test]
    fn behind_origin_is_a_miss() {
        let s = unit_sphere(Vector::ZERO, 1.0);
        let r = Ray::new(Vector::new(0.0, 0.0, 5.0), Vector::Z).unwrap();
        assert_eq!(s.intersect(&r), None);
    }

    #[test]
    fn degenerate_radius_never_hits() {
        let r = Ray::new(Vector::new(0.0, 0.0, 5.0), -Vector::Z).unwrap();
        assert_eq!(unit_sphere(Vector::ZERO, 0.0).intersect(&r), None);
        assert_eq!(unit_sphere(Vector::ZERO, f64::NAN).intersect(&r), None);
    }

    #[test]
    fn normal_points_outward() {
        let s = unit_sphere(Vector::new(0.0, 1.0, 0.0), 1.0);
        assert_eq!(s.normal(Vector::new(0.0, 2.0, 0.0)), Vector::Y);
        assert_eq!(s.normal(Vector::new(-1.0, 1.0, 0.0)), -Vector::X);
    }
}
