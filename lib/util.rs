use glam::DVec3;

pub type Vector = DVec3;

/// Mirrors `v` about the plane with unit normal `normal`.
pub fn reflect(v: Vector, normal: Vector) -> Vector {
    return v - (2.0 * v.dot(normal) * normal);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_mirrors_about_normal() {
        let r = reflect(Vector::new(1.0, -1.0, 0.0), Vector::Y);
        assert_eq!(r, Vector::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn reflection_keeps_length() {
        let v = Vector::new(0.3, -0.4, 0.5).normalize();
        let n = Vector::new(1.0, 2.0, -1.0).normalize();
        assert!((reflect(v, n).length() - 1.0).abs() < 1e-12);
    }
}
