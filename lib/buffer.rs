use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::{trace, warn};

use crate::error::RenderError;

/// Row-major `0x00RRGGBB` pixels.
#[derive(Debug)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer { width, height, pixels: vec![0; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    pub fn fill(&mut self, pixel: u32) {
        self.pixels.fill(pixel);
    }

    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u32> {
        self.pixels.chunks_exact_mut(self.width)
    }
}

/// Free list of equally sized buffers. Acquiring never blocks; an empty pool allocates.
#[derive(Debug)]
pub struct BufferPool {
    width: usize,
    height: usize,
    free: Mutex<Vec<PixelBuffer>>,
    allocations: AtomicUsize,
}

impl BufferPool {
    pub fn new(width: usize, height: usize) -> Result<BufferPool, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(BufferPool { width, height, free: Mutex::new(Vec::new()), allocations: AtomicUsize::new(0) })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn acquire(&self) -> PixelBuffer {
        if let Some(buffer) = self.free.lock().pop() {
            return buffer;
        }
        let n = self.allocations.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(width = self.width, height = self.height, allocations = n, "allocating frame buffer");
        PixelBuffer::new(self.width, self.height)
    }

    /// Buffers of another size (left over from before a resize) are dropped.
    pub fn release(&self, buffer: PixelBuffer) {
        if buffer.width != self.width || buffer.height != self.height {
            warn!(
                width = buffer.width,
                height = buffer.height,
                "dropping buffer that does not match pool size {}x{}",
                self.width,
                self.height
            );
            return;
        }

        let mut free = self.free.lock();
        debug_assert!(
            !free.iter().any(|b| std::ptr::eq(b.pixels.as_ptr(), buffer.pixels.as_ptr())),
            "buffer released twice"
        );
        free.push(buffer);
    }

    /// Buffers allocated over the pool's lifetime.
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    pub fn available(&self) -> usize {
        self.free.lock().len()
    }
}
