//! Single-consumer frame hand-off that keeps only the newest frame.
//!
//! The capture side never blocks: when the gesture worker hasn't picked up
//! the previous frame yet, that frame is evicted and counted as dropped.
//! The worker therefore always processes the most recent frame, never a
//! backlog.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use log::trace;

/// The consumer side has gone away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueClosed;

#[derive(Debug, Default)]
struct Shared {
    dropped: AtomicU64,
    closed:  AtomicBool,
}

/// Create a connected sender/receiver pair.
pub fn latest_frame_queue<F>() -> (FrameSender<F>, FrameReceiver<F>) {
    let (tx, rx) = bounded(1);
    let shared = Arc::new(Shared::default());
    (
        FrameSender { tx, evict: rx.clone(), shared: Arc::clone(&shared) },
        FrameReceiver { rx, shared },
    )
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSender
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameSender<F> {
    tx:     Sender<F>,
    /// Producer-side handle on the slot, used only to evict a stale frame.
    evict:  Receiver<F>,
    shared: Arc<Shared>,
}

impl<F> FrameSender<F> {
    /// Offer a frame, replacing any frame still waiting in the slot.
    pub fn send(&self, frame: F) -> Result<(), QueueClosed> {
        if self.shared.closed.load(Ordering::Acquire) {
            return Err(QueueClosed);
        }
        let mut frame = frame;
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(f)) => {
                    if self.evict.try_recv().is_ok() {
                        let n = self.shared.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                        trace!("late frame evicted ({} dropped so far)", n);
                    }
                    frame = f;
                }
                Err(TrySendError::Disconnected(_)) => return Err(QueueClosed),
            }
        }
    }

    pub fn dropped(&self) -> u64 { self.shared.dropped.load(Ordering::Relaxed) }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameReceiver
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameReceiver<F> {
    rx:     Receiver<F>,
    shared: Arc<Shared>,
}

impl<F> FrameReceiver<F> {
    /// Wait up to `timeout` for the next frame.  `Disconnected` once the
    /// sender is gone and the slot is empty.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<F, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Frames evicted before they were received.
    pub fn dropped(&self) -> u64 { self.shared.dropped.load(Ordering::Relaxed) }

    /// Shared counter handle, for reporting after the receiver moves to
    /// another thread.
    pub fn dropped_counter(&self) -> DroppedCounter {
        DroppedCounter(Arc::clone(&self.shared))
    }
}

impl<F> Drop for FrameReceiver<F> {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::Release);
    }
}

/// Read-only view of a queue's drop count.
#[derive(Clone, Debug)]
pub struct DroppedCounter(Arc<Shared>);

impl DroppedCounter {
    pub fn get(&self) -> u64 { self.0.dropped.load(Ordering::Relaxed) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const WAIT: Duration = Duration::from_millis(200);

    #[test]
    fn delivers_in_order_when_consumer_keeps_up() {
        let (tx, rx) = latest_frame_queue();
        for i in 0..5 {
            tx.send(i).unwrap();
            assert_eq!(rx.recv_timeout(WAIT).unwrap(), i);
        }
        assert_eq!(rx.dropped(), 0);
    }

    #[test]
    fn newest_frame_replaces_unconsumed_one() {
        let (tx, rx) = latest_frame_queue();
        for i in 0..10 {
            tx.send(i).unwrap();
        }
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), 9);
        assert_eq!(rx.dropped(), 9);
        assert_eq!(tx.dropped(), 9);
        assert!(matches!(rx.recv_timeout(Duration::from_millis(10)), Err(RecvTimeoutError::Timeout)));
    }

    #[test]
    fn dropping_sender_disconnects_receiver() {
        let (tx, rx) = latest_frame_queue::<u32>();
        tx.send(1).unwrap();
        drop(tx);
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), 1);
        assert!(matches!(rx.recv_timeout(WAIT), Err(RecvTimeoutError::Disconnected)));
    }

    #[test]
    fn dropping_receiver_closes_sender() {
        let (tx, rx) = latest_frame_queue::<u32>();
        drop(rx);
        assert_eq!(tx.send(1), Err(QueueClosed));
    }

    #[test]
    fn never_reorders_under_contention() {
        let (tx, rx) = latest_frame_queue::<u64>();
        let producer = thread::spawn(move || {
            for i in 0..10_000u64 {
                if tx.send(i).is_err() { break; }
            }
        });
        let mut last = None;
        while let Ok(v) = rx.recv_timeout(WAIT) {
            if let Some(prev) = last {
                assert!(v > prev, "{} after {}", v, prev);
            }
            last = Some(v);
        }
        producer.join().unwrap();
        assert_eq!(last, Some(9_999));
    }
}
