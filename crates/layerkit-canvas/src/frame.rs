//! Frame scheduling for the redraw loop.
//!
//! The canvas repaints every frame whether or not anything changed; a
//! scheduler only decides when frames happen.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

/// Refresh rate assumed when none is configured.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Invokes a callback once per display refresh.
pub trait FrameScheduler {
    /// Runs frames until the callback breaks or the scheduler stops.
    ///
    /// The callback receives the zero-based frame number.
    fn run(&mut self, on_frame: &mut dyn FnMut(u64) -> ControlFlow<()>);
}

/// Scheduler that ticks at a fixed interval on the calling thread.
#[derive(Debug, Clone)]
pub struct FixedRateScheduler {
    interval: Duration,
    max_frames: Option<u64>,
}

impl FixedRateScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_frames: None,
        }
    }

    /// Stops after `frames` frames.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_frames(&self) -> Option<u64> {
        self.max_frames
    }
}

impl Default for FixedRateScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn run(&mut self, on_frame: &mut dyn FnMut(u64) -> ControlFlow<()>) {
        let mut frame = 0;
        while self.max_frames.map_or(true, |max| frame < max) {
            let started = Instant::now();
            if on_frame(frame).is_break() {
                tracing::debug!("Frame loop stopped by callback at frame {}", frame);
                break;
            }
            frame += 1;

            if let Some(remaining) = self.interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }
}
