use crate::util::Vector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector,
    pub direction: Vector,
}

impl Ray {
    /// Returns `None` when `direction` has no length.
    pub fn new(origin: Vector, direction: Vector) -> Option<Ray> {
        let direction = direction.try_normalize()?;
        return Some(Ray { origin, direction });
    }

    pub fn at(&self, t: f64) -> Vector {
        return self.origin + self.direction * t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let r = Ray::new(Vector::ZERO, Vector::new(0.0, 3.0, 4.0)).unwrap();
        assert!((r.direction.length() - 1.0).abs() < 1e-12);
        assert!(r.at(5.0).abs_diff_eq(Vector::new(0.0, 3.0, 4.0), 1e-12));
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Vector::ONE, Vector::ZERO).is_none());
    }
}
