use crate::ray::Ray;
use crate::util::Vector;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub origin: Vector,
    cw: Vector,
    cu: Vector,
    cv: Vector,
    half_height: f64,
}

impl Camera {
    pub fn new(origin: Vector, target: Vector, up: Vector, vertical_fov: f64) -> Camera {
        let theta = std::f64::consts::PI / 180.0 * vertical_fov;
        let half_height = (theta * 0.5).tan();

        let cw = (origin - target).try_normalize().unwrap_or(Vector::Z);
        let cu = up.cross(cw).try_normalize().unwrap_or(Vector::X);
        let cv = cw.cross(cu);

        return Camera { origin, cw, cu, cv, half_height };
    }

    pub fn forward(&self) -> Vector {
        return -self.cw;
    }

    /// Ray through the center of pixel `(px, py)`; row 0 is the top of the image.
    pub fn primary_ray(&self, px: usize, py: usize, width: usize, height: usize) -> Ray {
        let aspect_ratio = width as f64 / height as f64;
        let s = (px as f64 + 0.5) / width as f64 - 0.5;
        let t = 0.5 - (py as f64 + 0.5) / height as f64;

        let viewport_h = 2.0 * self.half_height;
        let viewport_w = viewport_h * aspect_ratio;

        let direction = -self.cw + s * viewport_w * self.cu + t * viewport_h * self.cv;

        return Ray { origin: self.origin, direction: direction.normalize() };
    }
}
