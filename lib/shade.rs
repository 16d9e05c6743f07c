use crate::color::Color;
use crate::object::Geometry;
use crate::ray::Ray;
use crate::scene::{Intersection, Scene};
use crate::util::{reflect, Vector};

/// Reflection bounces allowed after the primary hit.
pub const MAX_DEPTH: u32 = 5;

/// Offset applied to the start of shadow and reflection rays.
pub const EPSILON: f64 = 1e-3;

pub const BACKGROUND: Color = Color::BLACK;

pub fn shade(scene: &Scene, r: &Ray, depth: u32) -> Color {
    return match scene.nearest_hit(r) {
        Some(hit) => shade_hit(scene, &hit, depth),
        None => BACKGROUND,
    };
}

fn shade_hit(scene: &Scene, hit: &Intersection<'_>, depth: u32) -> Color {
    let d = hit.ray.direction;
    let p = hit.point();
    let normal = hit.object.normal(p);
    let reflect_dir = reflect(d, normal);
    let surface = hit.object.surface();

    let mut color = direct_light(scene, hit, p, normal);

    if depth < MAX_DEPTH {
        let reflectance = (surface.reflect)(p);
        if reflectance != 0.0 {
            if let Some(bounce) = Ray::new(p + EPSILON * reflect_dir, reflect_dir) {
                color += shade(scene, &bounce, depth + 1) * reflectance;
            }
        }
    }

    return color;
}

fn direct_light(scene: &Scene, hit: &Intersection<'_>, p: Vector, normal: Vector) -> Color {
    let surface = hit.object.surface();
    let shadow_origin = p + EPSILON * normal;
    let mut color = Color::BLACK;

    for light in &scene.lights {
        let to_light = light.position - shadow_origin;
        let distance = to_light.length();
        let Some(shadow_ray) = Ray::new(shadow_origin, to_light) else {
            continue;
        };

        if is_occluded(scene, &shadow_ray, distance) {
            continue;
        }

        let illum = normal.dot(shadow_ray.direction);
        if illum <= 0.0 {
            continue;
        }

        let diffuse = (surface.diffuse)(p) * light.color * illum;
        let specular = (surface.specular)(p) * light.color * illum.powf(surface.roughness);
        color += diffuse + specular;
    }

    return color;
}

fn is_occluded(scene: &Scene, shadow_ray: &Ray, light_distance: f64) -> bool {
    match scene.nearest_hit(shadow_ray) {
        Some(blocker) => blocker.distance < light_distance,
        None => false,
    }
}
