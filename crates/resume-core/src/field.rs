//! Circuit-board background: a dim field of fixed anchors and a smaller set of
//! particles travelling between them.
//!
//! The field is a plain state machine. A driver calls [`ParticleField::reinit`]
//! whenever the page size changes and [`ParticleField::step`] once per display
//! frame; each step advances the simulation and returns the glows to paint.
//! Scheduling and painting live elsewhere.

use crate::constants::*;
use crate::error::{check_fraction, check_non_negative, check_range, ParamsError};
use crate::geometry::{PageMetrics, ViewBand};
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct FieldParams {
    pub density_divisor: f32,
    pub sample_viewports: f32,
    pub max_particles: usize,
    pub particles_per_anchor: f32,
    pub anchor_radius: [f32; 2],
    pub anchor_opacity: [f32; 2],
    pub particle_radius: [f32; 2],
    pub speed: [f32; 2],
    pub min_lifetime: f32,
    pub drift_speed: f32,
    pub drift_lifetime: [f32; 2],
    pub anchor_margin: f32,
    pub particle_margin: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            density_divisor: ANCHOR_DENSITY_DIVISOR,
            sample_viewports: ANCHOR_SAMPLE_VIEWPORTS,
            max_particles: MAX_PARTICLES,
            particles_per_anchor: PARTICLES_PER_ANCHOR,
            anchor_radius: ANCHOR_RADIUS_RANGE,
            anchor_opacity: ANCHOR_OPACITY_RANGE,
            particle_radius: PARTICLE_RADIUS_RANGE,
            speed: PARTICLE_SPEED_RANGE,
            min_lifetime: PARTICLE_MIN_LIFETIME,
            drift_speed: DRIFT_SPEED,
            drift_lifetime: DRIFT_LIFETIME_RANGE,
            anchor_margin: ANCHOR_VIEW_MARGIN,
            particle_margin: PARTICLE_VIEW_MARGIN,
        }
    }
}

impl FieldParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.density_divisor > 0.0) {
            return Err(ParamsError::DensityDivisor(self.density_divisor));
        }
        check_non_negative("sample viewports", self.sample_viewports)?;
        check_fraction("particles per anchor", self.particles_per_anchor)?;
        check_range("anchor radius", self.anchor_radius)?;
        check_range("anchor opacity", self.anchor_opacity)?;
        check_range("particle radius", self.particle_radius)?;
        check_range("speed", self.speed)?;
        check_range("drift lifetime", self.drift_lifetime)?;
        // Zero speed would give infinite lifetimes.
        if self.speed[0] <= 0.0 {
            return Err(ParamsError::Range {
                name: "speed",
                min: self.speed[0],
                max: self.speed[1],
            });
        }
        if !(self.min_lifetime >= 1.0) {
            return Err(ParamsError::Range {
                name: "min lifetime",
                min: self.min_lifetime,
                max: f32::INFINITY,
            });
        }
        check_non_negative("drift speed", self.drift_speed)?;
        check_non_negative("anchor margin", self.anchor_margin)?;
        check_non_negative("particle margin", self.particle_margin)?;
        Ok(())
    }

    /// Anchors for a page: sampled area (full width times at most
    /// `sample_viewports` viewports of height) over the density divisor.
    pub fn anchor_count(&self, page: &PageMetrics) -> usize {
        let sampled_height = (page.viewport_height * self.sample_viewports).min(page.document_height);
        let n = (page.viewport_width * sampled_height / self.density_divisor).floor();
        if n.is_finite() && n > 0.0 {
            n as usize
        } else {
            0
        }
    }

    pub fn particle_count(&self, anchor_count: usize) -> usize {
        let half = (anchor_count as f32 * self.particles_per_anchor).floor() as usize;
        half.min(self.max_particles)
    }
}

/// Fixed point of the field. Immutable until the next reinit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub velocity: Vec2,
    /// Frames left before the particle is respawned.
    pub life: f32,
    /// `life` as assigned by the last retarget.
    pub max_life: f32,
    /// Anchor the particle is heading to; `None` while drifting.
    pub target: Option<Vec2>,
}

impl Particle {
    /// Particle resting at `position` with no heading yet.
    pub fn at(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            opacity: 1.0,
            velocity: Vec2::ZERO,
            life: 0.0,
            max_life: 0.0,
            target: None,
        }
    }

    fn outside(&self, width: f32, height: f32) -> bool {
        let r = self.radius;
        let p = self.position;
        p.x < -r || p.x > width + r || p.y < -r || p.y > height + r
    }
}

/// Opacity for a particle with `life` of `max_life` frames left.
///
/// Linear ramp from 1.0 down to the floor, clamped to `[0, 1]` so other
/// lifetime ranges can never push it out of the displayable range.
#[inline]
pub fn particle_opacity(life: f32, max_life: f32) -> f32 {
    if max_life <= 0.0 {
        return PARTICLE_OPACITY_FLOOR;
    }
    ((life / max_life) * PARTICLE_OPACITY_SPAN + PARTICLE_OPACITY_FLOOR).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlowKind {
    Anchor,
    Particle,
}

/// One soft dot to paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub kind: GlowKind,
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub blur: f32,
}

/// Everything a painter needs for one frame. The whole surface is cleared
/// before the glows are drawn in order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub width: f32,
    pub height: f32,
    pub glows: Vec<Glow>,
}

impl DrawList {
    pub fn count(&self, kind: GlowKind) -> usize {
        self.glows.iter().filter(|g| g.kind == kind).count()
    }
}

/// What happened to the particle set during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub respawned: usize,
    pub removed: usize,
}

pub struct ParticleField<R: Rng = StdRng> {
    params: FieldParams,
    rng: R,
    width: f32,
    height: f32,
    anchors: Vec<Anchor>,
    particles: Vec<Particle>,
    draw: DrawList,
    last_report: StepReport,
}

impl ParticleField<StdRng> {
    pub fn with_seed(params: FieldParams, seed: u64) -> Result<Self, ParamsError> {
        Self::new(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticleField<R> {
    /// Empty field; call [`reinit`](Self::reinit) before stepping.
    pub fn new(params: FieldParams, rng: R) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            rng,
            width: 0.0,
            height: 0.0,
            anchors: Vec::new(),
            particles: Vec::new(),
            draw: DrawList::default(),
            last_report: StepReport::default(),
        })
    }

    /// Field with a caller-provided layout, bypassing generation.
    pub fn from_parts(
        params: FieldParams,
        rng: R,
        width: f32,
        height: f32,
        anchors: Vec<Anchor>,
        particles: Vec<Particle>,
    ) -> Result<Self, ParamsError> {
        let mut field = Self::new(params, rng)?;
        field.width = width;
        field.height = height;
        field.anchors = anchors;
        field.particles = particles;
        Ok(field)
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Canvas surface size in document pixels.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    /// Throw away anchors and particles and regenerate both for `page`.
    /// The surface covers the viewport width and the full document height.
    pub fn reinit(&mut self, page: PageMetrics) {
        self.width = page.viewport_width.max(0.0);
        self.height = page.document_height.max(0.0);
        self.anchors.clear();
        self.particles.clear();

        if self.width > 0.0 && self.height > 0.0 {
            let n = self.params.anchor_count(&page);
            self.anchors.reserve(n);
            for _ in 0..n {
                let anchor = Anchor {
                    position: Vec2::new(
                        self.rng.gen_range(0.0..self.width),
                        self.rng.gen_range(0.0..self.height),
                    ),
                    radius: sample(&mut self.rng, self.params.anchor_radius),
                    opacity: sample(&mut self.rng, self.params.anchor_opacity),
                };
                self.anchors.push(anchor);
            }
        }

        let n = self.params.particle_count(self.anchors.len());
        for _ in 0..n {
            let Some(start) = pick_anchor(&mut self.rng, &self.anchors, None) else {
                break;
            };
            let mut p = Particle::at(
                self.anchors[start].position,
                sample(&mut self.rng, self.params.particle_radius),
            );
            retarget(&mut p, Some(start), &self.anchors, &self.params, &mut self.rng);
            self.particles.push(p);
        }
        log::debug!(
            "[field] reinit {}x{} anchors={} particles={}",
            self.width,
            self.height,
            self.anchors.len(),
            self.particles.len()
        );
    }

    /// Advance one frame and return the glows to paint for `view`.
    ///
    /// Anchors outside the view band (plus the anchor margin) are skipped.
    /// Each particle moves by its velocity and loses one frame of life;
    /// particles that expire or leave the surface are respawned at a random
    /// anchor in the same frame, or removed when there are no anchors.
    pub fn step(&mut self, view: ViewBand) -> &DrawList {
        let Self {
            params,
            rng,
            width,
            height,
            anchors,
            particles,
            draw,
            last_report,
        } = self;
        draw.width = *width;
        draw.height = *height;
        draw.glows.clear();
        let mut report = StepReport::default();

        for a in anchors.iter() {
            if view.contains_with_margin(a.position.y, params.anchor_margin) {
                draw.glows.push(Glow {
                    kind: GlowKind::Anchor,
                    position: a.position,
                    radius: a.radius,
                    opacity: a.opacity,
                    blur: ANCHOR_GLOW_BASE + a.radius,
                });
            }
        }

        particles.retain_mut(|p| {
            p.position += p.velocity;
            p.life -= 1.0;
            p.opacity = particle_opacity(p.life, p.max_life);

            if p.life <= 0.0 || p.outside(*width, *height) {
                let Some(start) = pick_anchor(rng, anchors, None) else {
                    report.removed += 1;
                    return false;
                };
                p.position = anchors[start].position;
                p.radius = sample(rng, params.particle_radius);
                retarget(p, Some(start), anchors, params, rng);
                report.respawned += 1;
                return true;
            }

            if view.contains_with_margin(p.position.y, params.particle_margin) {
                draw.glows.push(Glow {
                    kind: GlowKind::Particle,
                    position: p.position,
                    radius: p.radius,
                    opacity: p.opacity,
                    blur: PARTICLE_GLOW_BASE + p.radius * PARTICLE_GLOW_PER_RADIUS,
                });
            }
            true
        });

        *last_report = report;
        draw
    }
}

#[inline]
fn sample<R: Rng>(rng: &mut R, range: [f32; 2]) -> f32 {
    rng.gen_range(range[0]..range[1])
}

/// Random anchor index, avoiding `exclude` whenever another anchor exists.
fn pick_anchor<R: Rng>(rng: &mut R, anchors: &[Anchor], exclude: Option<usize>) -> Option<usize> {
    match (anchors.len(), exclude) {
        (0, _) => None,
        (1, _) => Some(0),
        (n, Some(skip)) if skip < n => {
            let i = rng.gen_range(0..n - 1);
            Some(if i >= skip { i + 1 } else { i })
        }
        (n, _) => Some(rng.gen_range(0..n)),
    }
}

/// Point `p` at a fresh anchor.
///
/// The velocity follows the straight line to the target at a random speed and
/// the lifetime is the travel time, floored at `min_lifetime` frames. With no
/// anchors the particle wanders with a small random drift instead.
pub fn retarget<R: Rng>(
    p: &mut Particle,
    from: Option<usize>,
    anchors: &[Anchor],
    params: &FieldParams,
    rng: &mut R,
) {
    match pick_anchor(rng, anchors, from) {
        Some(i) => {
            let target = anchors[i].position;
            let delta = target - p.position;
            let dist = delta.length();
            let speed = sample(rng, params.speed);
            p.velocity = delta.normalize_or_zero() * speed;
            p.life = (dist / speed).max(params.min_lifetime);
            p.target = Some(target);
        }
        None => {
            let drift = params.drift_speed;
            p.velocity = Vec2::new(
                (rng.gen::<f32>() - 0.5) * 2.0 * drift,
                (rng.gen::<f32>() - 0.5) * 2.0 * drift,
            );
            p.life = sample(rng, params.drift_lifetime);
            p.target = None;
        }
    }
    p.max_life = p.life;
    p.opacity = particle_opacity(p.life, p.max_life);
}
