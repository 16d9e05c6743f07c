use std::sync::Arc;

use tracing::info;

use crate::buffer::{BufferPool, PixelBuffer};
use crate::error::RenderError;
use crate::render::{CancellationToken, FrameStats, Renderer, Strategy};
use crate::scene::Scene;

/// Image size, its buffer pool and the renderer, as seen by whoever drives frames.
pub struct RenderSession {
    pool: Arc<BufferPool>,
    renderer: Renderer,
}

impl RenderSession {
    pub fn new(width: usize, height: usize) -> Result<RenderSession, RenderError> {
        let pool = Arc::new(BufferPool::new(width, height)?);
        Ok(RenderSession { pool, renderer: Renderer::new() })
    }

    /// Switches to a new image size. Buffers handed out before a resize go back
    /// to the old pool and are freed with it.
    pub fn configure(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        if (width, height) == self.size() {
            return Ok(());
        }
        let pool = BufferPool::new(width, height)?;
        info!(width, height, "frame size changed, rebuilding buffer pool");
        self.pool = Arc::new(pool);
        Ok(())
    }

    pub fn size(&self) -> (usize, usize) {
        (self.pool.width(), self.pool.height())
    }

    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    pub fn acquire_buffer(&self) -> PixelBuffer {
        self.pool.acquire()
    }

    pub fn release_buffer(&self, buffer: PixelBuffer) {
        self.pool.release(buffer);
    }

    pub fn render_frame(
        &mut self,
        scene: &Scene,
        buffer: &mut PixelBuffer,
        strategy: Strategy,
        degree_of_parallelism: usize,
        cancel: &CancellationToken,
    ) -> Result<FrameStats, RenderError> {
        let expected = self.size();
        if (buffer.width(), buffer.height()) != expected {
            return Err(RenderError::BufferSizeMismatch {
                expected: expected.0 * expected.1,
                actual: buffer.pixels().len(),
            });
        }
        self.renderer.render_frame(scene, buffer, strategy, degree_of_parallelism, cancel)
    }
}
