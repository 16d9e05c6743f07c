use std::f64::consts::PI;
use std::time::Duration;

use tracing::trace;

use crate::object::SceneObject;
use crate::scene::Scene;
use crate::sphere::Sphere;

/// Bounces one sphere: `height = base_height + amplitude * |sin(PI * t / period)|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub object: usize,
    pub base_height: f64,
    pub amplitude: f64,
    pub period: Duration,
}

impl Bounce {
    pub const DEFAULT_AMPLITUDE: f64 = 0.8;
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(3000);

    /// Starts with the sphere touching the `y = 0` floor.
    pub fn resting_on_floor(object: usize, sphere: &Sphere) -> Bounce {
        Bounce { object, base_height: sphere.radius, amplitude: Self::DEFAULT_AMPLITUDE, period: Self::DEFAULT_PERIOD }
    }

    pub fn height_at(&self, elapsed: Duration) -> f64 {
        let period_ms = self.period.as_secs_f64() * 1000.0;
        if period_ms <= 0.0 {
            return self.base_height;
        }
        let phase = elapsed.as_secs_f64() * 1000.0 * PI / period_ms;
        return self.base_height + self.amplitude * phase.sin().abs();
    }
}

/// Moves the scene to its state at `elapsed` since the session started.
/// Called once per frame, before the frame is rendered.
pub fn advance(scene: &mut Scene, elapsed: Duration) {
    let Some(bounce) = scene.animation else {
        return;
    };

    match scene.objects.get_mut(bounce.object) {
        Some(SceneObject::Sphere(sphere)) => {
            sphere.center.y = bounce.height_at(elapsed);
            trace!(height = sphere.center.y, "advanced bounce");
        }
        Some(SceneObject::Plane(_)) | None => {
            trace!(index = bounce.object, "bounce target is not a sphere");
        }
    }
}
