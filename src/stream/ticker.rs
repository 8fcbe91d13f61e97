//! Frame ticker: a dedicated thread that paces repaints.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// One frame signal.
#[derive(Debug, Clone, Copy)]
pub struct FrameTick {
    /// Monotonically increasing frame number.
    pub frame: u64,
    /// Time since the ticker started.
    pub elapsed: Duration,
}

/// Emits [`FrameTick`]s at a fixed interval from its own thread.
///
/// The channel buffer is tiny and sends are non-blocking: when the consumer
/// falls behind, ticks are dropped rather than queued, so a stalled repaint
/// loop never faces a backlog of stale frames.
pub struct FrameTicker {
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    ticks: Receiver<FrameTick>,
}

impl FrameTicker {
    /// Spawn the ticker thread with the given frame interval.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn the thread.
    #[must_use]
    pub fn spawn(interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let (tx, ticks) = bounded(2);

        let handle = thread::Builder::new()
            .name("tidemark-ticker".to_string())
            .spawn(move || run(&tx, &stop_flag, interval))
            .expect("failed to spawn ticker thread");

        Self {
            handle: Some(handle),
            stop,
            ticks,
        }
    }

    /// The tick receiver, for `select!`-driven frame loops.
    #[inline]
    #[must_use]
    pub const fn receiver(&self) -> &Receiver<FrameTick> {
        &self.ticks
    }

    /// Ask the ticker thread to stop.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Stop and wait for the thread to exit.
    pub fn join(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(tx: &Sender<FrameTick>, stop: &AtomicBool, interval: Duration) {
    let start = Instant::now();
    let mut frame = 0u64;
    let mut deadline = start + interval;

    while !stop.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            // Dropped when the buffer is full; the consumer is behind.
            let _ = tx.try_send(FrameTick {
                frame,
                elapsed: now - start,
            });
            frame += 1;
            deadline += interval;
            if deadline < now {
                deadline = now + interval;
            }
        } else {
            thread::sleep((deadline - now).min(Duration::from_millis(1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_arrive() {
        let ticker = FrameTicker::spawn(Duration::from_millis(5));
        let tick = ticker
            .receiver()
            .recv_timeout(Duration::from_millis(200))
            .expect("first tick");
        assert_eq!(tick.frame, 0);
        ticker.join();
    }

    #[test]
    fn test_stop_is_clean() {
        let ticker = FrameTicker::spawn(Duration::from_millis(50));
        ticker.stop();
        ticker.join();
    }
}
