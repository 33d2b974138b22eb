// Shared tuning constants for the background field and the section connectors.

// Anchor population
pub const ANCHOR_DENSITY_DIVISOR: f32 = 20_000.0; // px² of sampled area per anchor
pub const ANCHOR_SAMPLE_VIEWPORTS: f32 = 2.0; // sampled height capped at this many viewports
pub const ANCHOR_RADIUS_RANGE: [f32; 2] = [0.5, 2.0];
pub const ANCHOR_OPACITY_RANGE: [f32; 2] = [0.05, 0.15]; // very subtle base

// Particle population
pub const MAX_PARTICLES: usize = 60;
pub const PARTICLES_PER_ANCHOR: f32 = 0.5;
pub const PARTICLE_RADIUS_RANGE: [f32; 2] = [1.0, 3.5];

// Particle motion (px per frame, frames)
pub const PARTICLE_SPEED_RANGE: [f32; 2] = [0.3, 0.8];
pub const PARTICLE_MIN_LIFETIME: f32 = 50.0;
pub const DRIFT_SPEED: f32 = 0.15; // idle wander, per axis in [-v, v)
pub const DRIFT_LIFETIME_RANGE: [f32; 2] = [100.0, 300.0];

// Opacity ramp: remaining/total * SPAN + FLOOR
pub const PARTICLE_OPACITY_SPAN: f32 = 0.7;
pub const PARTICLE_OPACITY_FLOOR: f32 = 0.3;

// Viewport culling margins (px above and below the visible band)
pub const ANCHOR_VIEW_MARGIN: f32 = 100.0;
pub const PARTICLE_VIEW_MARGIN: f32 = 50.0;

// Glow sizing
pub const ANCHOR_GLOW_BASE: f32 = 2.0;
pub const PARTICLE_GLOW_BASE: f32 = 4.0;
pub const PARTICLE_GLOW_PER_RADIUS: f32 = 1.5;

// Visibility band: sections only count inside the top 60% of the viewport
pub const VISIBLE_BAND_FRACTION: f32 = 0.6;
pub const VISIBLE_RATIO_THRESHOLD: f32 = 0.1;

// Connector geometry
pub const CONNECTOR_CLEARANCE: f32 = 8.0; // px between section border and endpoint
pub const ARROWHEAD_MIN_GAP: f32 = 20.0;

// Driver timing (milliseconds)
pub const RESIZE_DEBOUNCE_MS: u64 = 250;
pub const CONNECTOR_SETTLE_MS: u64 = 200;
pub const TYPEWRITER_STEP_MS: u64 = 100;
