use std::time::{Duration, Instant};

use bouncing_tracer::driver::{Display, Frame};
use tracing::info;

const REPORT_EVERY: Duration = Duration::from_secs(1);

/// Drops frames after logging the frame rate about once a second.
pub struct HeadlessDisplay {
    last_report: Instant,
    frames_since_report: u64,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        HeadlessDisplay { last_report: Instant::now(), frames_since_report: 0 }
    }
}

impl Display for HeadlessDisplay {
    fn present(&mut self, frame: &Frame) -> bool {
        self.frames_since_report += 1;
        if self.last_report.elapsed() >= REPORT_EVERY {
            info!(
                frame = frame.index,
                fps = %format!("{:.1}", frame.stats.frames_per_second()),
                shown = self.frames_since_report,
                "Ray Tracer"
            );
            self.last_report = Instant::now();
            self.frames_since_report = 0;
        }
        true
    }
}

#[cfg(feature = "preview")]
pub use window::WindowDisplay;

#[cfg(feature = "preview")]
mod window {
    use bouncing_tracer::driver::{Display, Frame};
    use minifb::{Key, Window, WindowOptions};
    use tracing::error;

    pub struct WindowDisplay {
        window: Window,
    }

    impl WindowDisplay {
        pub fn new(width: usize, height: usize) -> Result<Self, minifb::Error> {
            let mut window = Window::new("Ray Tracer", width, height, WindowOptions::default())?;
            window.set_target_fps(0);
            Ok(WindowDisplay { window })
        }
    }

    impl Display for WindowDisplay {
        fn present(&mut self, frame: &Frame) -> bool {
            let buffer = &frame.buffer;
            if let Err(e) = self.window.update_with_buffer(buffer.pixels(), buffer.width(), buffer.height()) {
                error!("failed to update window: {e}");
                return false;
            }
            self.window.set_title(&format!("Ray Tracer - FPS: {:.1}", frame.stats.frames_per_second()));
            self.window.is_open() && !self.window.is_key_down(Key::Escape)
        }
    }
}
