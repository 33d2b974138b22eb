//! Long-running loops over a [`Scheduler`].
//!
//! Each loop is a resource handle: `start` acquires the first frame or timer,
//! the host forwards callbacks to the `on_*` methods, and `stop` (or dropping
//! the loop) cancels whatever is still pending. Callbacks that arrive with
//! nothing pending are ignored, so a stale browser callback cannot restart
//! work after teardown.

use crate::connector::LineSegment;
use crate::constants::{CONNECTOR_SETTLE_MS, RESIZE_DEBOUNCE_MS, TYPEWRITER_STEP_MS};
use crate::field::{DrawList, ParticleField};
use crate::geometry::{PageMetrics, Rect, ViewBand};
use crate::schedule::{FrameRequest, Scheduler, Timeout};
use crate::tracker::{Observation, SectionTracker};
use crate::typewriter::Typewriter;
use crate::visibility::{ViewportBand, VisibilitySource};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(RESIZE_DEBOUNCE_MS);
pub const CONNECTOR_SETTLE: Duration = Duration::from_millis(CONNECTOR_SETTLE_MS);
pub const TYPEWRITER_STEP: Duration = Duration::from_millis(TYPEWRITER_STEP_MS);

// ---------------- Background ----------------

/// Drives a [`ParticleField`]: one step per frame, full reinit after the
/// window has stopped resizing for the debounce period.
pub struct BackgroundLoop<S: Scheduler, R: Rng = StdRng> {
    field: ParticleField<R>,
    scheduler: S,
    frame: FrameRequest<S::Handle>,
    resize: Timeout<S::Handle>,
    debounce: Duration,
    reinits: usize,
}

impl<S: Scheduler, R: Rng> BackgroundLoop<S, R> {
    pub fn start(field: ParticleField<R>, scheduler: S, page: PageMetrics) -> Self {
        Self::start_with_debounce(field, scheduler, page, RESIZE_DEBOUNCE)
    }

    pub fn start_with_debounce(
        mut field: ParticleField<R>,
        mut scheduler: S,
        page: PageMetrics,
        debounce: Duration,
    ) -> Self {
        field.reinit(page);
        let mut frame = FrameRequest::default();
        frame.ensure(&mut scheduler);
        Self {
            field,
            scheduler,
            frame,
            resize: Timeout::default(),
            debounce,
            reinits: 0,
        }
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    /// Reinitializations caused by resizes (the initial one is not counted).
    pub fn reinit_count(&self) -> usize {
        self.reinits
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Animation frame callback. Steps the field and schedules the next frame.
    pub fn on_frame(&mut self, view: ViewBand) -> Option<&DrawList> {
        if !self.frame.fired() {
            return None;
        }
        self.frame.ensure(&mut self.scheduler);
        Some(self.field.step(view))
    }

    /// Window resize event; (re)starts the quiet-period timer.
    pub fn on_resize(&mut self) {
        self.resize.restart(&mut self.scheduler, self.debounce);
    }

    /// Debounce timer callback. Regenerates the field for `page`, paints one
    /// frame right away and resumes the loop.
    pub fn on_resize_settled(&mut self, page: PageMetrics, view: ViewBand) -> Option<&DrawList> {
        if !self.resize.fired() {
            return None;
        }
        self.frame.cancel(&mut self.scheduler);
        self.field.reinit(page);
        self.reinits += 1;
        self.frame.ensure(&mut self.scheduler);
        Some(self.field.step(view))
    }

    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.frame.cancel(&mut self.scheduler);
        self.resize.cancel(&mut self.scheduler);
    }
}

impl<S: Scheduler, R: Rng> Drop for BackgroundLoop<S, R> {
    fn drop(&mut self) {
        self.release();
    }
}

// ---------------- Connector ----------------

/// Output of one connector recomputation.
#[derive(Debug)]
pub struct ConnectorUpdate<'a> {
    pub observation: Observation,
    pub segments: &'a [LineSegment],
}

/// Keeps the active section and connector segments in sync with the page.
///
/// Scroll, resize and active changes all funnel into
/// [`request_update`](Self::request_update), which coalesces to one
/// recomputation per frame.
pub struct ConnectorLoop<S: Scheduler, V: VisibilitySource = ViewportBand> {
    tracker: SectionTracker<V>,
    scheduler: S,
    frame: FrameRequest<S::Handle>,
    settle: Timeout<S::Handle>,
    segments: Vec<LineSegment>,
}

impl<S: Scheduler, V: VisibilitySource> ConnectorLoop<S, V> {
    /// Attach every section, recompute on the next frame and once more after
    /// the layout had `settle` to stabilize.
    pub fn start(mut tracker: SectionTracker<V>, mut scheduler: S, settle: Duration) -> Self {
        tracker.attach_all();
        let mut settle_timer = Timeout::default();
        settle_timer.restart(&mut scheduler, settle);
        let mut frame = FrameRequest::default();
        frame.supersede(&mut scheduler);
        Self {
            tracker,
            scheduler,
            frame,
            settle: settle_timer,
            segments: Vec::new(),
        }
    }

    pub fn tracker(&self) -> &SectionTracker<V> {
        &self.tracker
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn active(&self) -> Option<&str> {
        self.tracker.active()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    /// Scroll or resize happened; a newer request replaces a pending one.
    pub fn request_update(&mut self) {
        self.frame.supersede(&mut self.scheduler);
    }

    pub fn on_settle_timeout(&mut self) {
        if self.settle.fired() {
            self.request_update();
        }
    }

    /// Push-style visibility report for `id`.
    pub fn report_visible(&mut self, id: &str) -> Observation {
        let obs = self.tracker.report_visible(id);
        if obs.active_changed() {
            self.request_update();
        }
        obs
    }

    pub fn attach(&mut self, id: &str) -> bool {
        let ok = self.tracker.attach(id);
        if ok {
            self.request_update();
        }
        ok
    }

    pub fn detach(&mut self, id: &str) -> bool {
        let ok = self.tracker.detach(id);
        if ok {
            self.request_update();
        }
        ok
    }

    /// Frame callback: sample visibility, then rebuild the segments so they
    /// reflect any active-section change from this same sample.
    pub fn on_frame<F>(&mut self, viewport: &Rect, mut rect_of: F) -> Option<ConnectorUpdate<'_>>
    where
        F: FnMut(&str) -> Option<Rect>,
    {
        if !self.frame.fired() {
            return None;
        }
        let observation = self.tracker.observe(viewport, &mut rect_of);
        self.segments = self.tracker.segments(&mut rect_of);
        Some(ConnectorUpdate {
            observation,
            segments: &self.segments,
        })
    }

    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.frame.cancel(&mut self.scheduler);
        self.settle.cancel(&mut self.scheduler);
        self.tracker.detach_all();
    }
}

impl<S: Scheduler, V: VisibilitySource> Drop for ConnectorLoop<S, V> {
    fn drop(&mut self) {
        self.release();
    }
}

// ---------------- Header ----------------

/// Types the header name out on a fixed timer, then goes idle.
pub struct TypewriterLoop<S: Scheduler> {
    typewriter: Typewriter,
    scheduler: S,
    timer: Timeout<S::Handle>,
    step: Duration,
}

impl<S: Scheduler> TypewriterLoop<S> {
    pub fn start(typewriter: Typewriter, mut scheduler: S, step: Duration) -> Self {
        let mut timer = Timeout::default();
        if !typewriter.is_done() {
            timer.restart(&mut scheduler, step);
        }
        Self {
            typewriter,
            scheduler,
            timer,
            step,
        }
    }

    pub fn visible(&self) -> &str {
        self.typewriter.visible()
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Timer callback: reveal one character and re-arm while text remains.
    pub fn on_timeout(&mut self) -> Option<&str> {
        if !self.timer.fired() {
            return None;
        }
        if self.typewriter.tick() {
            self.timer.restart(&mut self.scheduler, self.step);
        }
        Some(self.typewriter.visible())
    }

    pub fn stop(mut self) {
        self.timer.cancel(&mut self.scheduler);
    }
}

impl<S: Scheduler> Drop for TypewriterLoop<S> {
    fn drop(&mut self) {
        self.timer.cancel(&mut self.scheduler);
    }
}
