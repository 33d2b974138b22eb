// Host-side tests for the connector overlay markup and glow palette.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod markup {
    include!("../src/markup.rs");
}

use glam::Vec2;
use markup::*;
use resume_core::*;
use std::collections::HashMap;

fn segments(active: Option<&str>) -> Vec<LineSegment> {
    let mut m = HashMap::new();
    m.insert("intro", Rect::new(0.0, 0.0, 1000.0, 500.0));
    m.insert("work", Rect::new(0.0, 600.0, 1000.0, 400.0));
    // Tight gap: no room for an arrowhead.
    m.insert("skills", Rect::new(0.0, 1020.0, 1000.0, 300.0));
    segments_between(&["intro", "work", "skills"], |id: &str| m.get(id).copied(), active)
}

fn glow(kind: GlowKind, opacity: f32) -> Glow {
    Glow {
        kind,
        position: Vec2::ZERO,
        radius: 1.0,
        opacity,
        blur: 3.0,
    }
}

#[test]
fn markers_are_defined_once() {
    let svg = connector_svg(&segments(None), Vec2::ZERO);
    assert_eq!(svg.matches("<defs>").count(), 1);
    assert!(svg.contains("id=\"arrowhead-active\""));
    assert!(svg.contains("id=\"arrowhead-inactive\""));
    assert!(svg.contains("markerWidth=\"6\" markerHeight=\"4.2\""));
    assert!(svg.contains("markerWidth=\"5\" markerHeight=\"3.5\""));
}

#[test]
fn each_segment_gets_a_keyed_group_with_line_and_nodes() {
    let svg = connector_svg(&segments(None), Vec2::ZERO);
    assert!(svg.contains("data-key=\"line-intro-work\""));
    assert!(svg.contains("data-key=\"line-work-skills\""));
    assert_eq!(svg.matches("<line ").count(), 2);
    // Halo and dot at both ends of both segments.
    assert_eq!(svg.matches("<circle ").count(), 8);
    assert!(svg.contains("x1=\"500\" y1=\"508\" x2=\"500\" y2=\"592\""));
}

#[test]
fn arrowheads_only_where_the_gap_allows() {
    let svg = connector_svg(&segments(None), Vec2::ZERO);
    assert_eq!(svg.matches("marker-end=").count(), 1);
    assert!(svg.contains("marker-end=\"url(#arrowhead-inactive)\""));
}

#[test]
fn active_section_switches_styles_and_pulses_its_nodes() {
    let idle = connector_svg(&segments(None), Vec2::ZERO);
    assert!(!idle.contains("node-pulse"));
    assert!(!idle.contains(SegmentStyle::ACTIVE.stroke));

    let svg = connector_svg(&segments(Some("work")), Vec2::ZERO);
    assert_eq!(svg.matches(SegmentStyle::ACTIVE.stroke).count(), 2);
    assert!(svg.contains("marker-end=\"url(#arrowhead-active)\""));
    // Only the two endpoints that sit on "work" pulse.
    assert_eq!(svg.matches("class=\"node-pulse\"").count(), 2);
    assert!(svg.contains("transition: stroke 0.5s ease"));
}

#[test]
fn overlay_origin_is_compensated() {
    let svg = connector_svg(&segments(None), Vec2::new(0.0, 120.0));
    assert!(svg.contains("translate(-0 -120)") || svg.contains("translate(0 -120)"));
}

#[test]
fn empty_overlay_still_carries_defs() {
    let svg = connector_svg(&[], Vec2::ZERO);
    assert!(svg.starts_with("<defs>"));
    assert!(!svg.contains("<line"));
}

#[test]
fn overlay_never_intercepts_pointers() {
    let style = overlay_style(4321.4);
    assert!(style.contains("pointer-events:none"));
    assert!(style.contains("height:4321px"));
    assert!(canvas_style(10.0).contains("z-index:-20"));
}

#[test]
fn glow_palette_matches_kind() {
    assert_eq!(glow_fill(&glow(GlowKind::Anchor, 0.1)), "rgba(0, 255, 80, 0.1)");
    assert_eq!(glow_shadow(&glow(GlowKind::Anchor, 0.1)), "rgba(0, 255, 80, 0.3)");
    assert_eq!(glow_fill(&glow(GlowKind::Particle, 0.5)), "rgba(50, 255, 150, 0.5)");
    // Shadow alpha is boosted but never above one.
    assert_eq!(glow_shadow(&glow(GlowKind::Particle, 0.9)), "rgba(100, 255, 180, 1)");
}
