use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::RenderError;
use crate::scene::Scene;
use crate::shade::shade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Sequential,
    #[default]
    Parallel,
    /// Parallel, with every pixel tinted by the worker that computed it.
    ParallelShowThreads,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(Strategy::Sequential),
            "parallel" => Ok(Strategy::Parallel),
            "parallel-show-threads" | "show-threads" => Ok(Strategy::ParallelShowThreads),
            other => Err(format!("unknown strategy {other:?}")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Sequential => "sequential",
            Strategy::Parallel => "parallel",
            Strategy::ParallelShowThreads => "parallel-show-threads",
        };
        f.write_str(name)
    }
}

/// Cooperative stop flag shared by the driver loop and render workers.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub elapsed: Duration,
    pub rows_rendered: usize,
    pub cancelled: bool,
}

impl FrameStats {
    pub fn frames_per_second(&self) -> f64 {
        let ms = self.elapsed.as_secs_f64() * 1000.0;
        if ms > 0.0 {
            1000.0 / ms
        } else {
            f64::INFINITY
        }
    }
}

const WORKER_PALETTE: [Color; 8] = [
    Color::new(1.0, 0.0, 0.0),
    Color::new(0.0, 1.0, 0.0),
    Color::new(0.0, 0.0, 1.0),
    Color::new(1.0, 1.0, 0.0),
    Color::new(0.0, 1.0, 1.0),
    Color::new(1.0, 0.0, 1.0),
    Color::new(1.0, 0.5, 0.0),
    Color::new(0.5, 0.0, 1.0),
];

pub fn worker_tint(worker: usize) -> Color {
    WORKER_PALETTE[worker % WORKER_PALETTE.len()]
}

/// Shaded color blended halfway toward the worker's tint.
pub fn tinted(color: Color, worker: usize) -> Color {
    color.lerp(worker_tint(worker), 0.5)
}

pub fn trace_pixel(scene: &Scene, x: usize, y: usize, width: usize, height: usize) -> Color {
    let r = scene.camera.primary_ray(x, y, width, height);
    shade(scene, &r, 0)
}

fn render_row(scene: &Scene, row: &mut [u32], y: usize, height: usize) {
    let width = row.len();
    for (x, pixel) in row.iter_mut().enumerate() {
        *pixel = trace_pixel(scene, x, y, width, height).to_pixel();
    }
}

fn render_row_tinted(scene: &Scene, row: &mut [u32], y: usize, height: usize) {
    let width = row.len();
    let worker = rayon::current_thread_index().unwrap_or(0);
    for (x, pixel) in row.iter_mut().enumerate() {
        *pixel = tinted(trace_pixel(scene, x, y, width, height), worker).to_pixel();
    }
}

/// Fills frames using one of the [`Strategy`] variants. The worker pool is kept
/// between frames and rebuilt only when the degree of parallelism changes.
#[derive(Default)]
pub struct Renderer {
    workers: Option<(usize, ThreadPool)>,
}

impl Renderer {
    pub fn new() -> Renderer {
        Renderer::default()
    }

    fn workers(&mut self, threads: usize) -> Result<&ThreadPool, RenderError> {
        let pool = match self.workers.take() {
            Some((n, pool)) if n == threads => pool,
            _ => {
                debug!(threads, "building render worker pool");
                ThreadPoolBuilder::new().num_threads(threads).thread_name(|i| format!("render-{i}")).build()?
            }
        };
        Ok(&self.workers.insert((threads, pool)).1)
    }

    pub fn render_frame(
        &mut self,
        scene: &Scene,
        buffer: &mut PixelBuffer,
        strategy: Strategy,
        degree_of_parallelism: usize,
        cancel: &CancellationToken,
    ) -> Result<FrameStats, RenderError> {
        let (width, height) = (buffer.width(), buffer.height());
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if buffer.pixels().len() != width * height {
            return Err(RenderError::BufferSizeMismatch { expected: width * height, actual: buffer.pixels().len() });
        }
        if degree_of_parallelism == 0 {
            return Err(RenderError::InvalidParallelism);
        }

        let start = Instant::now();
        let rows_rendered = match strategy {
            Strategy::Sequential => render_sequential(scene, buffer, cancel),
            Strategy::Parallel => {
                let pool = self.workers(degree_of_parallelism)?;
                render_parallel(pool, scene, buffer, cancel, render_row)
            }
            Strategy::ParallelShowThreads => {
                let pool = self.workers(degree_of_parallelism)?;
                render_parallel(pool, scene, buffer, cancel, render_row_tinted)
            }
        };
        let elapsed = start.elapsed();

        let stats = FrameStats { elapsed, rows_rendered, cancelled: rows_rendered < height };
        debug!(%strategy, ms = elapsed.as_secs_f64() * 1000.0, rows_rendered, "frame rendered");
        Ok(stats)
    }
}

fn render_sequential(scene: &Scene, buffer: &mut PixelBuffer, cancel: &CancellationToken) -> usize {
    let height = buffer.height();
    let mut rows = 0;
    for (y, row) in buffer.rows_mut().enumerate() {
        if cancel.is_cancelled() {
            break;
        }
        render_row(scene, row, y, height);
        rows += 1;
    }
    return rows;
}

// Each row is a disjoint slice of the buffer; cancellation is checked before a row starts.
fn render_parallel(
    pool: &ThreadPool,
    scene: &Scene,
    buffer: &mut PixelBuffer,
    cancel: &CancellationToken,
    row_fn: fn(&Scene, &mut [u32], usize, usize),
) -> usize {
    let (width, height) = (buffer.width(), buffer.height());
    let rows = AtomicUsize::new(0);

    pool.install(|| {
        buffer.pixels_mut().par_chunks_exact_mut(width).enumerate().for_each(|(y, row)| {
            if cancel.is_cancelled() {
                return;
            }
            row_fn(scene, row, y, height);
            rows.fetch_add(1, Ordering::Relaxed);
        });
    });

    return rows.into_inner();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_parse() {
        assert_eq!("Sequential".parse::<Strategy>(), Ok(Strategy::Sequential));
        assert_eq!("parallel".parse::<Strategy>(), Ok(Strategy::Parallel));
        assert_eq!("show-threads".parse::<Strategy>(), Ok(Strategy::ParallelShowThreads));
        assert!("tiled".parse::<Strategy>().is_err());
        assert_eq!(Strategy::ParallelShowThreads.to_string().parse::<Strategy>(), Ok(Strategy::ParallelShowThreads));
    }

    #[test]
    fn cancellation_is_shared_and_idempotent() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn zero_parallelism_is_rejected() {
        let scene = Scene::bouncing_spheres();
        let mut buffer = PixelBuffer::new(4, 4);
        let err = Renderer::new().render_frame(&scene, &mut buffer, Strategy::Parallel, 0, &CancellationToken::new());
        assert!(matches!(err, Err(RenderError::InvalidParallelism)));
    }

    #[test]
    fn worker_pool_is_reused_for_the_same_size() {
        let scene = Scene::bouncing_spheres();
        let mut buffer = PixelBuffer::new(8, 8);
        let mut renderer = Renderer::new();
        let cancel = CancellationToken::new();

        let worker_ids = |renderer: &Renderer| {
            let (_, pool) = renderer.workers.as_ref().unwrap();
            let mut ids = pool.broadcast(|_| format!("{:?}", std::thread::current().id()));
            ids.sort();
            ids
        };

        renderer.render_frame(&scene, &mut buffer, Strategy::Parallel, 2, &cancel).unwrap();
        let first = worker_ids(&renderer);
        renderer.render_frame(&scene, &mut buffer, Strategy::Parallel, 2, &cancel).unwrap();
        assert_eq!(first, worker_ids(&renderer));

        renderer.render_frame(&scene, &mut buffer, Strategy::Parallel, 3, &cancel).unwrap();
        assert_eq!(renderer.workers.as_ref().map(|(_, p)| p.current_num_threads()), Some(3));
    }

    #[test]
    fn tint_depends_only_on_worker() {
        assert_eq!(worker_tint(1), worker_tint(9));
        assert_ne!(worker_tint(0), worker_tint(1));
        assert_eq!(tinted(Color::BLACK, 0), Color::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn frame_rate_follows_elapsed_time() {
        let stats = FrameStats { elapsed: Duration::from_millis(20), rows_rendered: 1, cancelled: false };
        assert!((stats.frames_per_second() - 50.0).abs() < 1e-9);
    }
}
