// DOM hooks, CSS classes and palette shared by the web front-end.
// The host page provides the elements named here.

// Elements looked up by id
pub const BACKGROUND_CANVAS_ID: &str = "background-canvas";
pub const CONNECTOR_OVERLAY_ID: &str = "section-connector";
pub const HEADER_NAME_ID: &str = "header-name";
pub const HEADER_NAME_ATTR: &str = "data-name";

// Classes applied to section elements
pub const SECTION_IN_VIEW_CLASS: &str = "section-in-view"; // set once, never removed
pub const SECTION_FOCUSED_CLASS: &str = "section-focused";
pub const NODE_PULSE_CLASS: &str = "node-pulse";
pub const CONNECTOR_GROUP_CLASS: &str = "connector-group";

// Stacking: background at the bottom, connectors above it, content on top
pub const BACKGROUND_Z_INDEX: i32 = -20;
pub const OVERLAY_Z_INDEX: i32 = 0;

// Glow palette (rgb triples; alpha comes from the glow)
pub const ANCHOR_RGB: [u8; 3] = [0, 255, 80];
pub const ANCHOR_SHADOW: &str = "rgba(0, 255, 80, 0.3)";
pub const PARTICLE_RGB: [u8; 3] = [50, 255, 150];
pub const PARTICLE_SHADOW_RGB: [u8; 3] = [100, 255, 180];
pub const PARTICLE_SHADOW_GAIN: f32 = 1.2;

// Arrowhead markers: (width, height, fill)
pub const ARROW_ACTIVE: (f32, f32, &str) = (6.0, 4.2, "rgba(100, 255, 150, 0.9)");
pub const ARROW_INACTIVE: (f32, f32, &str) = (5.0, 3.5, "rgba(0, 255, 80, 0.4)");

pub const STROKE_TRANSITION: &str = "stroke 0.5s ease, stroke-width 0.5s ease";
