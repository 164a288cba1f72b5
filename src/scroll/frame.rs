//! Animation-frame scheduling.
//!
//! Hosts expose their frame primitive through [`FrameScheduler`]. The detector
//! keeps at most one request outstanding through a [`FrameGate`].

use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub trait FrameScheduler {
    /// Ask the host to call back on the next rendering frame.
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw an outstanding request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Pending-flag gate: a new frame is requested only when none is outstanding.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Option<FrameHandle>,
}

impl FrameGate {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Request a frame unless one is already pending. Returns whether it did.
    pub fn schedule(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Accept a fired frame. Stale or cancelled handles are rejected.
    pub fn fire(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        match self.pending.take() {
            Some(handle) => {
                scheduler.cancel_frame(handle);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Default)]
struct FrameQueue {
    next_id: u64,
    queued: Vec<FrameHandle>,
    cancelled: u64,
}

/// Frame scheduler driven explicitly by its owner.
///
/// Clones share one queue, so the host keeps a clone and drains it whenever it
/// decides a frame has elapsed.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    inner: Rc<RefCell<FrameQueue>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every queued frame in request order.
    pub fn take_queued(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.inner.borrow_mut().queued)
    }

    /// Outstanding frames without consuming them.
    pub fn queued(&self) -> Vec<FrameHandle> {
        self.inner.borrow().queued.clone()
    }

    pub fn queued_len(&self) -> usize {
        self.inner.borrow().queued.len()
    }

    pub fn cancelled_count(&self) -> u64 {
        self.inner.borrow().cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut queue = self.inner.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle(queue.next_id);
        queue.queued.push(handle);
        trace!(?handle, "Frame requested");
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut queue = self.inner.borrow_mut();
        let before = queue.queued.len();
        queue.queued.retain(|queued| *queued != handle);
        if queue.queued.len() != before {
            queue.cancelled += 1;
            trace!(?handle, "Frame cancelled");
        }
    }
}
