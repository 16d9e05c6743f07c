use std::sync::Arc;

use crate::object::Geometry;
use crate::ray::Ray;
use crate::surface::Surface;
use crate::util::Vector;

// Rays closer to parallel than this are treated as misses.
const PARALLEL_EPSILON: f64 = 1e-9;

/// One-sided plane of points `p` with `normal.dot(p) + offset == 0`.
/// Only rays travelling against the normal can hit it. A plane built from a
/// zero or non-finite normal, or with a non-finite offset, is never hit.
#[derive(Debug, Clone)]
pub struct Plane {
    pub normal: Vector,
    pub offset: f64,
    pub surface: Arc<Surface>,
}

impl Plane {
    pub fn new(normal: Vector, offset: f64, surface: Arc<Surface>) -> Plane {
        let normal = normal.try_normalize().unwrap_or(Vector::ZERO);
        return Plane { normal, offset, surface };
    }

    pub fn is_degenerate(&self) -> bool {
        return self.normal == Vector::ZERO || !self.offset.is_finite();
    }
}

impl Geometry for Plane {
    fn intersect(&self, r: &Ray) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }

        let denom = self.normal.dot(r.direction);
        if denom > -PARALLEL_EPSILON {
            return None;
        }

        let t = (self.normal.dot(r.origin) + self.offset) / -denom;
        return if t > 0.0 { Some(t) } else { None };
    }

    fn normal(&self, _p: Vector) -> Vector {
        return self.normal;
    }
}
