use crate::constants::*;
use glam::Vec2;
use resume_core::{Glow, GlowKind, LineSegment, Marker, NodeStyle};
use std::fmt::Write;

#[inline]
fn rgba(rgb: [u8; 3], alpha: f32) -> String {
    format!("rgba({}, {}, {}, {})", rgb[0], rgb[1], rgb[2], alpha.clamp(0.0, 1.0))
}

/// Fill colour for a background glow.
pub fn glow_fill(g: &Glow) -> String {
    match g.kind {
        GlowKind::Anchor => rgba(ANCHOR_RGB, g.opacity),
        GlowKind::Particle => rgba(PARTICLE_RGB, g.opacity),
    }
}

/// Shadow colour for a background glow.
pub fn glow_shadow(g: &Glow) -> String {
    match g.kind {
        GlowKind::Anchor => ANCHOR_SHADOW.to_string(),
        GlowKind::Particle => rgba(PARTICLE_SHADOW_RGB, g.opacity * PARTICLE_SHADOW_GAIN),
    }
}

/// Inline style for the connector overlay: document-sized, never hit-tested.
pub fn overlay_style(height: f32) -> String {
    format!(
        "position:absolute;top:0;left:0;width:100%;height:{}px;z-index:{};pointer-events:none",
        height.max(0.0).round(),
        OVERLAY_Z_INDEX
    )
}

/// Inline style for the background canvas.
pub fn canvas_style(height: f32) -> String {
    format!(
        "position:absolute;top:0;left:0;width:100%;height:{}px;z-index:{};pointer-events:none",
        height.max(0.0).round(),
        BACKGROUND_Z_INDEX
    )
}

fn marker_def(out: &mut String, marker: Marker, (w, h, fill): (f32, f32, &str)) {
    let half = h / 2.0;
    _ = write!(
        out,
        "<marker id=\"{id}\" markerWidth=\"{w}\" markerHeight=\"{h}\" refX=\"0\" refY=\"{half}\" orient=\"auto\">\
         <polygon points=\"0 0, {w} {half}, 0 {h}\" fill=\"{fill}\"/></marker>",
        id = marker.id(),
    );
}

fn node(out: &mut String, at: Vec2, style: NodeStyle) {
    let class = if style.pulse { NODE_PULSE_CLASS } else { "" };
    _ = write!(
        out,
        "<circle cx=\"{x}\" cy=\"{y}\" r=\"{r}\" fill=\"{fill}\" class=\"{class}\"/>",
        x = at.x,
        y = at.y,
        r = NodeStyle::HALO_RADIUS,
        fill = style.halo_fill,
    );
    _ = write!(
        out,
        "<circle cx=\"{x}\" cy=\"{y}\" r=\"{r}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{sw}\"/>",
        x = at.x,
        y = at.y,
        r = NodeStyle::DOT_RADIUS,
        fill = style.dot_fill,
        stroke = style.dot_stroke,
        sw = NodeStyle::DOT_STROKE_WIDTH,
    );
}

/// Inner SVG markup for the connector overlay. `origin` is the overlay's own
/// position in the document; segments are given in document coordinates.
pub fn connector_svg(segments: &[LineSegment], origin: Vec2) -> String {
    let mut out = String::with_capacity(256 + segments.len() * 640);
    out.push_str("<defs>");
    marker_def(&mut out, Marker::ArrowActive, ARROW_ACTIVE);
    marker_def(&mut out, Marker::ArrowInactive, ARROW_INACTIVE);
    out.push_str("</defs>");
    _ = write!(
        out,
        "<g transform=\"translate({} {})\">",
        -origin.x,
        -origin.y
    );
    for s in segments {
        let style = s.style();
        _ = write!(
            out,
            "<g data-key=\"{key}\" class=\"{CONNECTOR_GROUP_CLASS}\">",
            key = s.key()
        );
        _ = write!(
            out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" style=\"transition: {STROKE_TRANSITION}\"",
            s.start.x, s.start.y, s.end.x, s.end.y, style.stroke, style.stroke_width,
        );
        if s.has_arrowhead() {
            _ = write!(out, " marker-end=\"url(#{})\"", style.marker.id());
        }
        out.push_str("/>");
        node(&mut out, s.start, s.source_node());
        node(&mut out, s.end, s.target_node());
        out.push_str("</g>");
    }
    out.push_str("</g>");
    out
}
