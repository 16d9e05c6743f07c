use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("degree of parallelism must be at least 1")]
    InvalidParallelism,
    #[error("buffer is {actual} pixels but the frame needs {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("failed to start render loop: {0}")]
    Spawn(#[from] std::io::Error),
}
