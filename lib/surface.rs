use std::fmt;
use std::sync::Arc;

use crate::color::Color;
use crate::util::Vector;

pub type ColorFn = Arc<dyn Fn(Vector) -> Color + Send + Sync>;
pub type ScalarFn = Arc<dyn Fn(Vector) -> f64 + Send + Sync>;

/// Procedural material: each field is a pure function of the surface point.
#[derive(Clone)]
pub struct Surface {
    pub diffuse: ColorFn,
    pub specular: ColorFn,
    pub reflect: ScalarFn,
    pub roughness: f64,
}

impl Surface {
    pub fn new(
        diffuse: impl Fn(Vector) -> Color + Send + Sync + 'static,
        specular: impl Fn(Vector) -> Color + Send + Sync + 'static,
        reflect: impl Fn(Vector) -> f64 + Send + Sync + 'static,
        roughness: f64,
    ) -> Surface {
        Surface { diffuse: Arc::new(diffuse), specular: Arc::new(specular), reflect: Arc::new(reflect), roughness }
    }

    pub fn uniform(diffuse: Color, specular: Color, reflect: f64, roughness: f64) -> Surface {
        Surface::new(move |_| diffuse, move |_| specular, move |_| reflect, roughness)
    }

    pub fn matte(diffuse: Color) -> Surface {
        Surface::uniform(diffuse, Color::BLACK, 0.0, 1.0)
    }

    pub fn mirror() -> Surface {
        Surface::uniform(Color::BLACK, Color::BLACK, 1.0, 1.0)
    }

    pub fn shiny() -> Surface {
        Surface::uniform(Color::WHITE, Color::GREY, 0.6, 50.0)
    }

    pub fn checkerboard() -> Surface {
        Surface::new(
            |p| if odd_square(p) { Color::WHITE } else { Color::BLACK },
            |_| Color::WHITE,
            |p| if odd_square(p) { 0.1 } else { 0.7 },
            150.0,
        )
    }
}

fn odd_square(p: Vector) -> bool {
    (p.x.floor() + p.z.floor()).rem_euclid(2.0) != 0.0
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface").field("roughness", &self.roughness).finish_non_exhaustive()
    }
}
