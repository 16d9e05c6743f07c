use std::sync::Arc;

use crate::animation::Bounce;
use crate::camera::Camera;
use crate::color::Color;
use crate::object::{Geometry, SceneObject};
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::surface::Surface;
use crate::util::Vector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vector, color: Color) -> Light {
        return Light { position, color };
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    pub object: &'a SceneObject,
    pub ray: Ray,
    pub distance: f64,
}

impl Intersection<'_> {
    pub fn point(&self) -> Vector {
        return self.ray.at(self.distance);
    }

    /// Strictly nearer along the ray than `other`.
    pub fn closer_than(&self, other: &Intersection<'_>) -> bool {
        return self.distance < other.distance;
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub animation: Option<Bounce>,
}

impl Scene {
    pub fn new(camera: Camera) -> Scene {
        return Scene { objects: Vec::new(), lights: Vec::new(), camera, animation: None };
    }

    pub fn with_object(mut self, object: impl Into<SceneObject>) -> Scene {
        self.objects.push(object.into());
        return self;
    }

    pub fn with_light(mut self, light: Light) -> Scene {
        self.lights.push(light);
        return self;
    }

    /// Closest hit with a strictly positive distance. Earlier objects win ties.
    pub fn nearest_hit(&self, r: &Ray) -> Option<Intersection<'_>> {
        let mut result: Option<Intersection<'_>> = None;

        for obj in &self.objects {
            let Some(t) = obj.intersect(r).filter(|&t| t > 0.0) else {
                continue;
            };
            let hit = Intersection { object: obj, ray: *r, distance: t };
            if result.as_ref().map_or(true, |nearest| hit.closer_than(nearest)) {
                result = Some(hit);
            }
        }

        return result;
    }

    /// Two shiny spheres over a checkerboard floor lit by four colored lights.
    /// The large sphere comes first and bounces.
    pub fn bouncing_spheres() -> Scene {
        let shiny = Arc::new(Surface::shiny());
        let checkerboard = Arc::new(Surface::checkerboard());

        let camera = Camera::new(Vector::new(3.0, 2.0, 4.0), Vector::new(-1.0, 0.5, 0.0), Vector::Y, 41.0);

        let ball = Sphere::new(Vector::new(0.0, 1.0, -0.25), 1.0, shiny.clone());
        let bounce = Bounce::resting_on_floor(0, &ball);

        let mut scene = Scene::new(camera)
            .with_object(ball)
            .with_object(Sphere::new(Vector::new(-1.0, 0.5, 1.5), 0.5, shiny))
            .with_object(Plane::new(Vector::Y, 0.0, checkerboard))
            .with_light(Light::new(Vector::new(-2.0, 2.5, 0.0), Color::new(0.49, 0.07, 0.07)))
            .with_light(Light::new(Vector::new(1.5, 2.5, 1.5), Color::new(0.07, 0.07, 0.49)))
            .with_light(Light::new(Vector::new(1.5, 2.5, -1.5), Color::new(0.07, 0.49, 0.071)))
            .with_light(Light::new(Vector::new(0.0, 3.5, 0.0), Color::new(0.21, 0.21, 0.35)));
        scene.animation = Some(bounce);

        return scene;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matte() -> Arc<Surface> {
        Arc::new(Surface::matte(Color::WHITE))
    }

    #[test]
    fn nearest_of_several_hits_wins() {
        let camera = Camera::new(Vector::new(0.0, 0.0, 10.0), Vector::ZERO, Vector::Y, 60.0);
        let scene = Scene::new(camera)
            .with_object(Sphere::new(Vector::new(0.0, 0.0, -3.0), 1.0, matte()))
            .with_object(Sphere::new(Vector::new(0.0, 0.0, 3.0), 1.0, matte()))
            .with_object(Plane::new(Vector::Z, 5.0, matte()));

        let r = Ray::new(Vector::new(0.0, 0.0, 10.0), -Vector::Z).unwrap();
        let hit = scene.nearest_hit(&r).unwrap();
        assert_eq!(hit.distance, 6.0);
        assert!(std::ptr::eq(hit.object, &scene.objects[1]));
        assert_eq!(hit.point(), Vector::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn empty_scene_misses() {
        let camera = Camera::new(Vector::Z, Vector::ZERO, Vector::Y, 60.0);
        let r = Ray::new(Vector::ZERO, Vector::X).unwrap();
        assert!(Scene::new(camera).nearest_hit(&r).is_none());
    }

    #[test]
    fn coincident_hits_keep_the_first_object() {
        let camera = Camera::new(Vector::Z, Vector::ZERO, Vector::Y, 60.0);
        let scene = Scene::new(camera)
            .with_object(Plane::new(Vector::Y, 0.0, matte()))
            .with_object(Plane::new(Vector::Y, 0.0, matte()));
        let r = Ray::new(Vector::new(0.0, 1.0, 0.0), -Vector::Y).unwrap();
        assert!(std::ptr::eq(scene.nearest_hit(&r).unwrap().object, &scene.objects[0]));
    }

    #[test]
    fn hits_order_by_distance() {
        let objects = [
            SceneObject::from(Sphere::new(Vector::ZERO, 1.0, matte())),
            SceneObject::from(Plane::new(Vector::Y, 0.0, matte())),
        ];
        let r = Ray::new(Vector::new(0.0, 5.0, 0.0), -Vector::Y).unwrap();
        let near = Intersection { object: &objects[0], ray: r, distance: 4.0 };
        let far = Intersection { object: &objects[1], ray: r, distance: 5.0 };

        assert!(near.closer_than(&far));
        assert!(!far.closer_than(&near));
        assert!(!near.closer_than(&near));
    }

    #[test]
    fn default_scene_animates_the_first_sphere() {
        let scene = Scene::bouncing_spheres();
        assert_eq!(scene.objects.len(), 3);
        assert_eq!(scene.lights.len(), 4);
        assert_eq!(scene.animation.map(|b| b.object), Some(0));
    }
}
