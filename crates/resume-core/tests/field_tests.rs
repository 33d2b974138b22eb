// Host-side tests for the background particle field.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use resume_core::*;

fn page() -> PageMetrics {
    PageMetrics {
        viewport_width: 1200.0,
        viewport_height: 800.0,
        document_height: 5000.0,
    }
}

fn seeded(seed: u64) -> ParticleField {
    let mut f = ParticleField::with_seed(FieldParams::default(), seed).unwrap();
    f.reinit(page());
    f
}

fn anchor(x: f32, y: f32) -> Anchor {
    Anchor {
        position: Vec2::new(x, y),
        radius: 1.0,
        opacity: 0.1,
    }
}

fn moving(position: Vec2, velocity: Vec2, life: f32) -> Particle {
    Particle {
        position,
        radius: 2.0,
        opacity: 1.0,
        velocity,
        life,
        max_life: life,
        target: None,
    }
}

fn custom_field(anchors: Vec<Anchor>, particles: Vec<Particle>) -> ParticleField {
    ParticleField::from_parts(
        FieldParams::default(),
        StdRng::seed_from_u64(7),
        1000.0,
        1000.0,
        anchors,
        particles,
    )
    .unwrap()
}

#[test]
fn anchor_count_follows_sampled_area() {
    let params = FieldParams::default();
    // Height is capped at two viewports: 1200 * 1600 / 20000.
    assert_eq!(params.anchor_count(&page()), 96);
    // Short documents use their own height: 1200 * 1000 / 20000.
    let short = PageMetrics {
        document_height: 1000.0,
        ..page()
    };
    assert_eq!(params.anchor_count(&short), 60);
    let empty = PageMetrics {
        viewport_width: 0.0,
        ..page()
    };
    assert_eq!(params.anchor_count(&empty), 0);
}

#[test]
fn particle_count_is_half_the_anchors_capped_at_sixty() {
    let params = FieldParams::default();
    assert_eq!(params.particle_count(0), 0);
    assert_eq!(params.particle_count(1), 0);
    assert_eq!(params.particle_count(97), 48);
    assert_eq!(params.particle_count(500), 60);
}

#[test]
fn reinit_populates_field_within_bounds() {
    let f = seeded(1);
    assert_eq!(f.anchors().len(), 96);
    assert_eq!(f.particles().len(), 48);
    let (w, h) = f.size();
    assert_eq!((w, h), (1200.0, 5000.0));
    for a in f.anchors() {
        assert!(a.position.x >= 0.0 && a.position.x < w);
        assert!(a.position.y >= 0.0 && a.position.y < h);
        assert!(a.radius >= 0.5 && a.radius < 2.0);
        assert!(a.opacity >= 0.05 && a.opacity < 0.15);
    }
}

#[test]
fn same_seed_generates_same_field() {
    let a = seeded(42);
    let b = seeded(42);
    assert_eq!(a.anchors(), b.anchors());
    assert_eq!(a.particles(), b.particles());
    let c = seeded(43);
    assert_ne!(a.anchors(), c.anchors());
}

#[test]
fn spawned_particles_head_for_an_anchor_at_a_consistent_speed() {
    let f = seeded(3);
    for p in f.particles() {
        assert!(p.life > 0.0);
        assert_eq!(p.life, p.max_life);
        assert!(p.radius >= 1.0 && p.radius < 3.5);
        let target = p.target.expect("anchors exist, so every particle has a target");
        assert!(f.anchors().iter().any(|a| a.position == target));
        let dist = (target - p.position).length();
        let speed = p.velocity.length();
        if dist > 0.0 {
            assert!(speed >= 0.3 - 1e-4 && speed < 0.8 + 1e-4, "speed {speed}");
            let dir = (target - p.position) / dist;
            assert!((p.velocity / speed - dir).length() < 1e-3);
            let expected = (dist / speed).max(50.0);
            assert!((p.life - expected).abs() / expected < 1e-3);
        }
        assert!(p.life >= 50.0);
    }
}

#[test]
fn life_drops_by_exactly_one_per_frame() {
    let start = Vec2::new(500.0, 500.0);
    let mut f = custom_field(
        vec![anchor(10.0, 10.0), anchor(900.0, 900.0)],
        vec![moving(start, Vec2::new(0.5, 0.0), 120.0)],
    );
    let view = ViewBand::new(0.0, 1000.0);
    for frame in 1..=10 {
        f.step(view);
        let p = &f.particles()[0];
        assert_eq!(p.life, 120.0 - frame as f32);
        assert_eq!(p.position, start + Vec2::new(0.5 * frame as f32, 0.0));
    }
    assert_eq!(f.last_report(), StepReport::default());
}

#[test]
fn expired_particle_is_respawned_in_the_same_frame() {
    let anchors = vec![anchor(100.0, 100.0), anchor(800.0, 600.0)];
    let mut f = custom_field(
        anchors.clone(),
        vec![moving(Vec2::new(400.0, 400.0), Vec2::ZERO, 1.0)],
    );
    f.step(ViewBand::new(0.0, 1000.0));
    assert_eq!(f.last_report().respawned, 1);
    let p = &f.particles()[0];
    assert!(anchors.iter().any(|a| a.position == p.position));
    assert!(p.life >= 50.0);
    assert_eq!(p.life, p.max_life);
}

#[test]
fn particle_leaving_the_surface_is_respawned_and_not_drawn_outside() {
    let anchors = vec![anchor(100.0, 100.0), anchor(800.0, 600.0)];
    let p = Particle {
        radius: 2.0,
        ..moving(Vec2::new(998.5, 500.0), Vec2::new(5.0, 0.0), 200.0)
    };
    let mut f = custom_field(anchors.clone(), vec![p]);
    let draw = f.step(ViewBand::new(0.0, 1000.0)).clone();
    assert_eq!(f.last_report().respawned, 1);

    let p = &f.particles()[0];
    assert!(anchors.iter().any(|a| a.position == p.position));
    for g in draw.glows.iter().filter(|g| g.kind == GlowKind::Particle) {
        assert!(g.position.x <= 1000.0 + g.radius);
    }
    // Respawned particles are drawn from the next frame on.
    assert_eq!(draw.count(GlowKind::Particle), 0);
}

#[test]
fn particles_are_removed_when_no_anchor_exists() {
    let mut f = custom_field(
        Vec::new(),
        vec![
            moving(Vec2::new(10.0, 10.0), Vec2::new(-20.0, 0.0), 100.0),
            moving(Vec2::new(500.0, 500.0), Vec2::ZERO, 1.0),
            moving(Vec2::new(600.0, 600.0), Vec2::ZERO, 100.0),
        ],
    );
    f.step(ViewBand::new(0.0, 1000.0));
    assert_eq!(f.last_report().removed, 2);
    assert_eq!(f.particles().len(), 1);
}

#[test]
fn retarget_without_anchors_falls_back_to_drift() {
    let params = FieldParams::default();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..200 {
        let mut p = Particle::at(Vec2::new(50.0, 50.0), 2.0);
        retarget(&mut p, None, &[], &params, &mut rng);
        assert!(p.target.is_none());
        assert!(p.velocity.x >= -0.15 && p.velocity.x < 0.15);
        assert!(p.velocity.y >= -0.15 && p.velocity.y < 0.15);
        assert!(p.life >= 100.0 && p.life < 300.0);
        assert_eq!(p.max_life, p.life);
    }
}

#[test]
fn retarget_to_the_only_anchor_uses_the_lifetime_floor() {
    let params = FieldParams::default();
    let mut rng = StdRng::seed_from_u64(5);
    let only = [anchor(300.0, 300.0)];
    let mut p = Particle::at(Vec2::new(300.0, 300.0), 2.0);
    retarget(&mut p, Some(0), &only, &params, &mut rng);
    assert_eq!(p.velocity, Vec2::ZERO);
    assert_eq!(p.life, 50.0);
    assert!(p.velocity.x.is_finite() && p.velocity.y.is_finite());
}

#[test]
fn retarget_prefers_a_different_anchor() {
    let params = FieldParams::default();
    let mut rng = StdRng::seed_from_u64(11);
    let anchors = [anchor(0.0, 0.0), anchor(500.0, 0.0)];
    for _ in 0..50 {
        let mut p = Particle::at(anchors[0].position, 2.0);
        retarget(&mut p, Some(0), &anchors, &params, &mut rng);
        assert_eq!(p.target, Some(anchors[1].position));
    }
}

#[test]
fn opacity_stays_within_unit_range() {
    assert_eq!(particle_opacity(100.0, 100.0), 1.0);
    assert!((particle_opacity(0.0, 100.0) - 0.3).abs() < 1e-6);
    // Out-of-range inputs are clamped rather than trusted.
    assert_eq!(particle_opacity(500.0, 100.0), 1.0);
    assert_eq!(particle_opacity(-1000.0, 100.0), 0.0);
    assert_eq!(particle_opacity(10.0, 0.0), 0.3);

    let mut f = seeded(8);
    let view = ViewBand::new(0.0, 5000.0);
    for _ in 0..400 {
        let draw = f.step(view);
        for g in &draw.glows {
            assert!((0.0..=1.0).contains(&g.opacity));
        }
        for p in f.particles() {
            assert!(p.life > 0.0);
            assert!((0.0..=1.0).contains(&p.opacity));
        }
    }
}

#[test]
fn anchors_outside_the_view_margin_are_culled() {
    let anchors = vec![
        anchor(10.0, 50.0),  // above band, inside margin
        anchor(10.0, 250.0), // in band
        anchor(10.0, 510.0), // below band, inside margin
        anchor(10.0, 700.0), // culled
    ];
    let mut f = custom_field(anchors, Vec::new());
    let draw = f.step(ViewBand::new(100.0, 320.0));
    assert_eq!(draw.count(GlowKind::Anchor), 3);
    assert!(draw.glows.iter().all(|g| g.position.y < 700.0));
    let g = draw.glows[0];
    assert_eq!(g.blur, 2.0 + g.radius);
}

#[test]
fn particles_draw_brighter_than_anchors() {
    let mut f = custom_field(
        vec![anchor(10.0, 10.0), anchor(900.0, 900.0)],
        vec![moving(Vec2::new(200.0, 200.0), Vec2::ZERO, 100.0)],
    );
    let draw = f.step(ViewBand::new(0.0, 1000.0));
    let a = draw.glows.iter().find(|g| g.kind == GlowKind::Anchor).unwrap();
    let p = draw.glows.iter().find(|g| g.kind == GlowKind::Particle).unwrap();
    assert!(p.opacity > a.opacity);
    assert!(p.blur > a.blur);
    // Anchors are listed before particles.
    assert_eq!(draw.glows.last().unwrap().kind, GlowKind::Particle);
}

#[test]
fn invalid_params_are_rejected() {
    let bad = FieldParams {
        density_divisor: 0.0,
        ..FieldParams::default()
    };
    assert_eq!(
        ParticleField::with_seed(bad, 1).err(),
        Some(ParamsError::DensityDivisor(0.0))
    );
    let inverted = FieldParams {
        speed: [0.8, 0.3],
        ..FieldParams::default()
    };
    assert!(matches!(
        inverted.validate(),
        Err(ParamsError::Range { name: "speed", .. })
    ));
    assert!(FieldParams::default().validate().is_ok());
}

#[test]
fn reinit_replaces_everything() {
    let mut f = seeded(21);
    let before = f.anchors().to_vec();
    f.reinit(PageMetrics {
        viewport_width: 600.0,
        viewport_height: 400.0,
        document_height: 3000.0,
    });
    // 600 * 800 / 20000
    assert_eq!(f.anchors().len(), 24);
    assert_eq!(f.particles().len(), 12);
    assert_ne!(f.anchors(), &before[..24]);
    assert_eq!(f.size(), (600.0, 3000.0));
}
