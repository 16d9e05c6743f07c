use std::sync::Arc;

use bouncing_tracer::camera::Camera;
use bouncing_tracer::plane::Plane;
use bouncing_tracer::sphere::Sphere;
use bouncing_tracer::surface::Surface;
use bouncing_tracer::{CancellationToken, Color, Light, RenderSession, Scene, Strategy, Vector};

fn brightness(pixel: u32) -> u32 {
    ((pixel >> 16) & 0xff) + ((pixel >> 8) & 0xff) + (pixel & 0xff)
}

// Unit sphere resting on the floor under a light straight above it, seen from above and in front.
fn sphere_on_floor() -> Scene {
    let matte = Arc::new(Surface::matte(Color::splat(0.8)));
    let camera = Camera::new(Vector::new(0.0, 3.0, 4.0), Vector::new(0.0, 0.5, 0.0), Vector::Y, 60.0);
    Scene::new(camera)
        .with_object(Plane::new(Vector::Y, 0.0, matte.clone()))
        .with_object(Sphere::new(Vector::new(0.0, 1.0, 0.0), 1.0, matte))
        .with_light(Light::new(Vector::new(0.0, 5.0, 0.0), Color::WHITE))
}

#[test]
fn lit_sphere_is_brighter_than_its_shadow() {
    let scene = sphere_on_floor();
    let mut session = RenderSession::new(4, 4).unwrap();
    let mut buffer = session.acquire_buffer();
    let stats = session
        .render_frame(&scene, &mut buffer, Strategy::Sequential, 1, &CancellationToken::new())
        .unwrap();
    assert_eq!(stats.rows_rendered, 4);

    // (1, 1) lands on the upper half of the sphere, (1, 2) on the floor in its shadow
    let sphere_top = buffer.get(1, 1);
    let shadowed_floor = buffer.get(1, 2);
    let lit_floor = buffer.get(0, 2);

    assert!(brightness(sphere_top) > brightness(shadowed_floor));
    assert_eq!(shadowed_floor, 0);
    assert!(brightness(lit_floor) > brightness(sphere_top));

    // the scene is symmetric about x = 0
    for y in 0..4 {
        assert_eq!(buffer.get(0, y), buffer.get(3, y));
        assert_eq!(buffer.get(1, y), buffer.get(2, y));
    }

    session.release_buffer(buffer);
}

#[test]
fn moving_the_light_changes_the_image() {
    let mut scene = sphere_on_floor();
    let mut session = RenderSession::new(4, 4).unwrap();
    let cancel = CancellationToken::new();

    let mut before = session.acquire_buffer();
    session.render_frame(&scene, &mut before, Strategy::Sequential, 1, &cancel).unwrap();

    scene.lights[0].position = Vector::new(-4.0, 5.0, 4.0);
    let mut after = session.acquire_buffer();
    session.render_frame(&scene, &mut after, Strategy::Sequential, 1, &cancel).unwrap();

    // light from the side reaches the floor in front of the sphere
    assert_eq!(before.get(1, 2), 0);
    assert!(brightness(after.get(1, 2)) > 0);
}
