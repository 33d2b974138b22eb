//! Platform-independent logic behind the résumé page: the circuit-board
//! particle background, the active-section tracker and the connector overlay.
//!
//! Nothing here touches the DOM. The web front-end samples geometry, forwards
//! browser callbacks to the loops in [`driver`], and paints what they return.

pub mod connector;
pub mod constants;
pub mod driver;
pub mod error;
pub mod field;
pub mod geometry;
pub mod schedule;
pub mod tracker;
pub mod typewriter;
pub mod visibility;

pub use connector::{
    compute_segments, segments_between, LineSegment, Marker, NodeStyle, SegmentStyle,
};
pub use constants::*;
pub use driver::{
    BackgroundLoop, ConnectorLoop, ConnectorUpdate, TypewriterLoop, CONNECTOR_SETTLE,
    RESIZE_DEBOUNCE, TYPEWRITER_STEP,
};
pub use error::ParamsError;
pub use field::{
    particle_opacity, retarget, Anchor, DrawList, FieldParams, Glow, GlowKind, Particle,
    ParticleField, StepReport,
};
pub use geometry::{PageMetrics, Rect, ViewBand};
pub use schedule::{FrameRequest, Scheduler, Timeout};
pub use tracker::{Observation, SectionTracker, TrackerParams};
pub use typewriter::{title_case, Typewriter};
pub use visibility::{ViewportBand, VisibilitySource};
