pub mod animation;
pub mod buffer;
pub mod camera;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod object;
pub mod plane;
pub mod ray;
pub mod render;
pub mod scene;
pub mod session;
pub mod shade;
pub mod sphere;
pub mod surface;
pub mod util;

pub use buffer::{BufferPool, PixelBuffer};
pub use color::Color;
pub use error::RenderError;
pub use render::{CancellationToken, FrameStats, Renderer, Strategy};
pub use scene::{Light, Scene};
pub use session::RenderSession;
pub use util::Vector;
