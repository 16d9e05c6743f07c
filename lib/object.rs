use std::sync::Arc;

use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::surface::Surface;
use crate::util::Vector;

pub trait Geometry: Send + Sync {
    /// Distance along `r` to the first point in front of its origin, if any.
    fn intersect(&self, r: &Ray) -> Option<f64>;

    /// Unit outward normal at `p`, which is assumed to lie on the surface.
    fn normal(&self, p: Vector) -> Vector;
}

#[derive(Debug, Clone)]
pub enum SceneObject {
    Sphere(Sphere),
    Plane(Plane),
}

impl SceneObject {
    pub fn surface(&self) -> &Arc<Surface> {
        match self {
            SceneObject::Sphere(s) => &s.surface,
            SceneObject::Plane(p) => &p.surface,
        }
    }
}

impl Geometry for SceneObject {
    fn intersect(&self, r: &Ray) -> Option<f64> {
        match self {
            SceneObject::Sphere(s) => s.intersect(r),
            SceneObject::Plane(p) => p.intersect(r),
        }
    }

    fn normal(&self, p: Vector) -> Vector {
        match self {
            SceneObject::Sphere(s) => s.normal(p),
            SceneObject::Plane(pl) => pl.normal(p),
        }
    }
}

impl From<Sphere> for SceneObject {
    fn from(s: Sphere) -> Self {
        SceneObject::Sphere(s)
    }
}

impl From<Plane> for SceneObject {
    fn from(p: Plane) -> Self {
        SceneObject::Plane(p)
    }
}
