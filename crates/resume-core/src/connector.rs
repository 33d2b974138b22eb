//! Connector lines between consecutive sections.
//!
//! Segments are derived data: the full ordered list is rebuilt from current
//! section geometry on every update and never patched in place.

use crate::constants::{ARROWHEAD_MIN_GAP, CONNECTOR_CLEARANCE};
use crate::geometry::Rect;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub from_id: String,
    pub to_id: String,
    /// Just below the bottom-center of the earlier section.
    pub start: Vec2,
    /// Just above the top-center of the later section.
    pub end: Vec2,
    pub source_active: bool,
    pub target_active: bool,
}

impl LineSegment {
    pub fn key(&self) -> String {
        format!("line-{}-{}", self.from_id, self.to_id)
    }

    #[inline]
    pub fn is_active_path(&self) -> bool {
        self.source_active || self.target_active
    }

    /// Arrowheads only fit when the line runs clearly downwards.
    #[inline]
    pub fn has_arrowhead(&self) -> bool {
        self.end.y > self.start.y + ARROWHEAD_MIN_GAP
    }

    pub fn style(&self) -> SegmentStyle {
        if self.is_active_path() {
            SegmentStyle::ACTIVE
        } else {
            SegmentStyle::INACTIVE
        }
    }

    pub fn source_node(&self) -> NodeStyle {
        NodeStyle::for_activity(self.source_active)
    }

    pub fn target_node(&self) -> NodeStyle {
        NodeStyle::for_activity(self.target_active)
    }
}

/// Build one segment per adjacent pair of `ids`.
///
/// `rect_of` returns a section's bounds in overlay coordinates, or `None`
/// when the element is not mounted; pairs with a missing side are skipped.
pub fn compute_segments<S, F>(
    ids: &[S],
    mut rect_of: F,
    active: Option<&str>,
    clearance: f32,
) -> Vec<LineSegment>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Option<Rect>,
{
    if ids.len() < 2 {
        return Vec::new();
    }
    // Sample each section once; neighbours share a rect.
    let rects: Vec<Option<Rect>> = ids.iter().map(|id| rect_of(id.as_ref())).collect();
    let mut out = Vec::with_capacity(ids.len() - 1);
    for (i, pair) in ids.windows(2).enumerate() {
        let (Some(a), Some(b)) = (rects[i], rects[i + 1]) else {
            continue;
        };
        let from_id = pair[0].as_ref();
        let to_id = pair[1].as_ref();
        out.push(LineSegment {
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            start: a.bottom_center() + Vec2::new(0.0, clearance),
            end: b.top_center() - Vec2::new(0.0, clearance),
            source_active: active == Some(from_id),
            target_active: active == Some(to_id),
        });
    }
    out
}

/// [`compute_segments`] with the default endpoint clearance.
pub fn segments_between<S, F>(ids: &[S], rect_of: F, active: Option<&str>) -> Vec<LineSegment>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Option<Rect>,
{
    compute_segments(ids, rect_of, active, CONNECTOR_CLEARANCE)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    ArrowActive,
    ArrowInactive,
}

impl Marker {
    pub fn id(self) -> &'static str {
        match self {
            Marker::ArrowActive => "arrowhead-active",
            Marker::ArrowInactive => "arrowhead-inactive",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentStyle {
    pub stroke: &'static str,
    pub stroke_width: f32,
    pub marker: Marker,
}

impl SegmentStyle {
    pub const ACTIVE: SegmentStyle = SegmentStyle {
        stroke: "rgba(100, 255, 150, 0.7)",
        stroke_width: 2.0,
        marker: Marker::ArrowActive,
    };
    pub const INACTIVE: SegmentStyle = SegmentStyle {
        stroke: "rgba(0, 255, 80, 0.3)",
        stroke_width: 1.5,
        marker: Marker::ArrowInactive,
    };
}

/// Endpoint marker: a faint halo with a small dot on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub halo_fill: &'static str,
    pub dot_fill: &'static str,
    pub dot_stroke: &'static str,
    pub pulse: bool,
}

impl NodeStyle {
    pub const HALO_RADIUS: f32 = 5.0;
    pub const DOT_RADIUS: f32 = 2.5;
    pub const DOT_STROKE_WIDTH: f32 = 0.5;

    pub const ACTIVE: NodeStyle = NodeStyle {
        halo_fill: "rgba(100, 255, 150, 0.25)",
        dot_fill: "rgba(100, 255, 150, 0.9)",
        dot_stroke: "rgba(100, 255, 150, 0.9)",
        pulse: true,
    };
    pub const INACTIVE: NodeStyle = NodeStyle {
        halo_fill: "rgba(0, 255, 80, 0.15)",
        dot_fill: "rgba(50, 255, 100, 0.5)",
        dot_stroke: "rgba(100,255,150,0.6)",
        pulse: false,
    };

    pub fn for_activity(active: bool) -> Self {
        if active {
            Self::ACTIVE
        } else {
            Self::INACTIVE
        }
    }
}
