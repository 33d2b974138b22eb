//! Frame and timer bookkeeping.
//!
//! The browser primitives (`requestAnimationFrame`, `setTimeout`) sit behind
//! [`Scheduler`]. Drivers keep every outstanding handle in a slot so that
//! stopping them cancels exactly what is pending, and a callback that arrives
//! for an empty slot is ignored.

use std::fmt;
use std::time::Duration;

pub trait Scheduler {
    type Handle: Copy + PartialEq + fmt::Debug;

    /// Ask for one callback on the next display frame. `None` if the host
    /// refused the request.
    fn request_frame(&mut self) -> Option<Self::Handle>;
    fn cancel_frame(&mut self, handle: Self::Handle);
    /// Ask for one callback after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> Option<Self::Handle>;
    fn clear_timeout(&mut self, handle: Self::Handle);
}

/// At most one outstanding frame request.
#[derive(Debug)]
pub struct FrameRequest<H> {
    pending: Option<H>,
}

impl<H> Default for FrameRequest<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H: Copy + PartialEq + fmt::Debug> FrameRequest<H> {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Request a frame unless one is already pending.
    pub fn ensure<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if self.pending.is_none() {
            self.pending = scheduler.request_frame();
        }
    }

    /// Replace any pending request with a fresh one.
    pub fn supersede<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler);
        self.pending = scheduler.request_frame();
    }

    /// Mark the pending request as delivered. False for stray callbacks.
    pub fn fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let Some(h) = self.pending.take() {
            scheduler.cancel_frame(h);
        }
    }
}

/// At most one outstanding timer; restarting it debounces.
#[derive(Debug)]
pub struct Timeout<H> {
    pending: Option<H>,
}

impl<H> Default for Timeout<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H: Copy + PartialEq + fmt::Debug> Timeout<H> {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Clear the pending timer, if any, and arm a new one.
    pub fn restart<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S, delay: Duration) {
        self.cancel(scheduler);
        self.pending = scheduler.set_timeout(delay);
    }

    pub fn fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let Some(h) = self.pending.take() {
            scheduler.clear_timeout(h);
        }
    }
}
