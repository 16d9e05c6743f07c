use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, SendTimeoutError, Sender};
use tracing::{debug, info};

use crate::animation::advance;
use crate::buffer::{BufferPool, PixelBuffer};
use crate::error::RenderError;
use crate::render::{CancellationToken, FrameStats, Strategy};
use crate::scene::Scene;
use crate::session::RenderSession;

// How often a blocked hand-off re-checks for cancellation.
const HANDOFF_POLL: Duration = Duration::from_millis(20);

/// A finished frame on its way to the display. Dropping it without
/// [`Frame::recycle`] just frees the buffer.
#[derive(Debug)]
pub struct Frame {
    pub index: u64,
    pub buffer: PixelBuffer,
    pub stats: FrameStats,
    pool: Arc<BufferPool>,
}

impl Frame {
    pub fn recycle(self) {
        self.pool.release(self.buffer);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    pub strategy: Strategy,
    pub threads: usize,
    pub max_frames: Option<u64>,
    pub max_duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionSummary {
    pub frames: u64,
    pub render_time: Duration,
    pub wall_time: Duration,
    pub cancelled: bool,
}

impl SessionSummary {
    pub fn average_fps(&self) -> f64 {
        let secs = self.render_time.as_secs_f64();
        if self.frames == 0 || secs <= 0.0 {
            return 0.0;
        }
        self.frames as f64 / secs
    }
}

/// Consumer side of the frame hand-off.
pub trait Display {
    /// Shows one frame. Returning `false` asks the render loop to stop.
    fn present(&mut self, frame: &Frame) -> bool;
}

enum Handoff {
    Delivered,
    Cancelled(Frame),
    Disconnected(Frame),
}

fn hand_off(frames: &Sender<Frame>, mut frame: Frame, cancel: &CancellationToken) -> Handoff {
    loop {
        match frames.send_timeout(frame, HANDOFF_POLL) {
            Ok(()) => return Handoff::Delivered,
            Err(SendTimeoutError::Timeout(f)) => {
                if cancel.is_cancelled() {
                    return Handoff::Cancelled(f);
                }
                frame = f;
            }
            Err(SendTimeoutError::Disconnected(f)) => return Handoff::Disconnected(f),
        }
    }
}

/// Runs frames until cancelled, out of budget, or the display goes away.
///
/// Each iteration takes a buffer, advances the scene, renders, then waits for
/// the display to take the frame before starting the next one.
pub fn run(
    session: &mut RenderSession,
    scene: &mut Scene,
    settings: &LoopSettings,
    frames: &Sender<Frame>,
    cancel: &CancellationToken,
) -> Result<SessionSummary, RenderError> {
    let started = Instant::now();
    let mut summary = SessionSummary::default();
    let (width, height) = session.size();
    info!(width, height, strategy = %settings.strategy, threads = settings.threads, "render loop started");

    loop {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }
        if settings.max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }
        if settings.max_duration.is_some_and(|max| started.elapsed() >= max) {
            break;
        }

        let mut buffer = session.acquire_buffer();
        advance(scene, started.elapsed());

        let stats = match session.render_frame(scene, &mut buffer, settings.strategy, settings.threads, cancel) {
            Ok(stats) => stats,
            Err(e) => {
                session.release_buffer(buffer);
                return Err(e);
            }
        };

        if stats.cancelled {
            debug!(rows = stats.rows_rendered, "dropping partial frame");
            session.release_buffer(buffer);
            summary.cancelled = true;
            break;
        }

        let frame = Frame { index: summary.frames, buffer, stats, pool: session.pool().clone() };
        summary.frames += 1;
        summary.render_time += stats.elapsed;

        match hand_off(frames, frame, cancel) {
            Handoff::Delivered => {}
            Handoff::Cancelled(frame) => {
                frame.recycle();
                summary.cancelled = true;
                break;
            }
            Handoff::Disconnected(frame) => {
                debug!("display hung up");
                frame.recycle();
                break;
            }
        }
    }

    summary.wall_time = started.elapsed();
    info!(
        frames = summary.frames,
        fps = summary.average_fps(),
        cancelled = summary.cancelled,
        "render loop stopped"
    );
    Ok(summary)
}

/// Starts [`run`] on its own thread. The returned receiver is the display's end
/// of a zero-capacity channel, so at most one finished frame is ever waiting.
pub fn spawn(
    mut session: RenderSession,
    mut scene: Scene,
    settings: LoopSettings,
    cancel: CancellationToken,
) -> Result<(JoinHandle<Result<SessionSummary, RenderError>>, Receiver<Frame>), RenderError> {
    let (tx, rx) = channel::bounded(0);
    let handle = thread::Builder::new()
        .name("render-loop".into())
        .spawn(move || run(&mut session, &mut scene, &settings, &tx, &cancel))?;
    Ok((handle, rx))
}

/// Shows frames until the render loop hangs up. Every frame goes back to its
/// pool after it is shown; a display that asks to stop cancels the loop and
/// keeps draining until the loop exits.
pub fn present_frames<D: Display>(frames: &Receiver<Frame>, display: &mut D, cancel: &CancellationToken) -> u64 {
    let mut shown = 0;
    for frame in frames.iter() {
        if !cancel.is_cancelled() {
            shown += 1;
            if !display.present(&frame) {
                cancel.cancel();
            }
        }
        frame.recycle();
    }
    return shown;
}
