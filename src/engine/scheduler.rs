//! Single-threaded "call me before the next repaint" scheduler.
//!
//! Semantics follow `requestAnimationFrame`:
//! - a callback runs at most once, on the first frame after it was requested
//! - callbacks requested while a frame is running fire on the following frame
//! - a callback cancelled earlier in the same frame does not run
//!
//! Callbacks run strictly one after another on the caller's thread, so each
//! one is fully processed before the next starts.

use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::trace;

/// Receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

#[derive(Default)]
struct Inner {
    next_id: u64,
    pending: BTreeMap<FrameHandle, FrameCallback>,
}

#[derive(Default)]
pub struct FrameScheduler {
    inner: RefCell<Inner>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = FrameHandle(inner.next_id);
        inner.next_id += 1;
        inner.pending.insert(handle, callback);
        handle
    }

    /// Returns false if the handle already ran or was cancelled.
    pub fn cancel_frame(&self, handle: FrameHandle) -> bool {
        let removed = self.inner.borrow_mut().pending.remove(&handle).is_some();
        trace!(?handle, removed, "cancel_frame");
        removed
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Run every callback that was pending when the frame started.
    /// Returns how many ran.
    pub fn run_frame(&self, timestamp_ms: f64) -> usize {
        let due: Vec<FrameHandle> = self.inner.borrow().pending.keys().copied().collect();

        let mut ran = 0;
        for handle in due {
            // Release the borrow before calling out: callbacks re-enter to
            // request or cancel frames.
            let callback = self.inner.borrow_mut().pending.remove(&handle);
            if let Some(callback) = callback {
                callback(timestamp_ms);
                ran += 1;
            }
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn callbacks_run_once_in_request_order() {
        let scheduler = FrameScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let log = log.clone();
            scheduler.request_frame(Box::new(move |ts| log.borrow_mut().push((tag, ts))));
        }

        assert_eq!(scheduler.run_frame(16.0), 3);
        assert_eq!(scheduler.run_frame(32.0), 0);
        assert_eq!(*log.borrow(), vec![("a", 16.0), ("b", 16.0), ("c", 16.0)]);
    }

    #[test]
    fn requests_made_during_a_frame_wait_for_the_next() {
        let scheduler = Rc::new(FrameScheduler::new());
        let hits = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&scheduler);
        let inner_hits = hits.clone();
        scheduler.request_frame(Box::new(move |_| {
            inner_hits.set(inner_hits.get() + 1);
            if let Some(s) = weak.upgrade() {
                let again = inner_hits.clone();
                s.request_frame(Box::new(move |_| again.set(again.get() + 10)));
            }
        }));

        assert_eq!(scheduler.run_frame(1.0), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.run_frame(2.0), 1);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn cancel_within_a_frame_suppresses_later_callback() {
        let scheduler = Rc::new(FrameScheduler::new());
        let victim_ran = Rc::new(Cell::new(false));
        let victim_handle = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&scheduler);
        let slot = victim_handle.clone();
        scheduler.request_frame(Box::new(move |_| {
            if let (Some(s), Some(h)) = (weak.upgrade(), slot.get()) {
                assert!(s.cancel_frame(h));
            }
        }));
        let flag = victim_ran.clone();
        let h = scheduler.request_frame(Box::new(move |_| flag.set(true)));
        victim_handle.set(Some(h));

        assert_eq!(scheduler.run_frame(16.0), 1);
        assert!(!victim_ran.get());
        assert!(!scheduler.cancel_frame(h));
    }
}
