//! Explosions: a growing pool of particles fired in staggered radial waves,
//! plus a glow marker that fades out while falling.
//!
//! An explosion moves through these states:
//!
//! ```text
//! Empty -> Spawning (respawn > 0) -> Draining (respawn == 0, particles alive) -> Inactive
//! ```
//!
//! Inactive explosions keep their particle storage so the slot can be
//! [`cleared`](Explosion::clear) and reused without reallocating.

use std::f64::consts::TAU;

use crate::clock::Clock;
use crate::constants::*;
use crate::entities::Particle;
use crate::rendering::DrawSink;
use crate::types::{Rgb, Vector2D, rainbow, wrap_hue};
use rand::Rng;

/// Particle parameters for a single wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub speed: f64,
    pub life_time: f64,
    pub radius: f64,
}

impl Burst {
    pub fn random(rng: &mut impl Rng) -> Self {
        let count = rng.gen_range(PARTICLE_COUNT_RANGE);
        let speed = rng.gen_range(PARTICLE_SPEED_RANGE) as f64;
        let life_time = rng.gen_range(PARTICLE_LIFE_RANGE);
        let mut radius = rng.gen_range(PARTICLE_RADIUS_RANGE);
        if count < SMALL_WAVE_THRESHOLD {
            radius *= rng.gen_range(SMALL_WAVE_RADIUS_BOOST);
        }
        Burst { count, speed, life_time, radius }
    }
}

// --- Glow marker ---
#[derive(Clone, Debug)]
pub struct GlowMarker {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub color: Rgb,
    pub alpha: f64,
    pub age: Clock,
}

impl GlowMarker {
    fn new() -> Self {
        GlowMarker {
            position: Vector2D::ZERO,
            velocity: Vector2D::ZERO,
            color: Rgb::WHITE,
            alpha: GLOW_MAX_ALPHA,
            age: Clock::new(),
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.age.advance(dt);
        let fraction = self.age.elapsed_fraction(GLOW_FADE_SECONDS);
        self.alpha = GLOW_MAX_ALPHA * (1.0 - fraction);
        // Vertical only: the glow sinks while it fades
        self.velocity.y += GRAVITY * dt;
        self.position.y += self.velocity.y * dt;
    }

    pub fn draw(&self, sink: &mut impl DrawSink) {
        sink.draw_glow(self.position, GLOW_SCALE, self.color.with_alpha(self.alpha.round() as u8));
    }
}

// --- Explosion ---
#[derive(Clone, Debug)]
pub struct Explosion {
    pub particles: Vec<Particle>,
    pub position: Vector2D,
    pub hue: f64,
    pub start_color: Option<Rgb>,
    pub end_color: Option<Rgb>,
    pub respawn: usize,
    pub respawn_interval: f64,
    pub respawn_clock: Clock,
    pub glow: GlowMarker,
    pub waves: usize,
}

impl Default for Explosion {
    fn default() -> Self {
        Explosion::new()
    }
}

impl Explosion {
    pub fn new() -> Self {
        let mut explosion = Explosion {
            particles: Vec::new(),
            position: Vector2D::ZERO,
            hue: 0.0,
            start_color: None,
            end_color: None,
            respawn: 0,
            respawn_interval: 0.0,
            respawn_clock: Clock::new(),
            glow: GlowMarker::new(),
            waves: 0,
        };
        explosion.clear();
        explosion
    }

    pub fn set_position(&mut self, position: Vector2D) {
        self.position = position;
        self.glow.position = position;
    }

    pub fn set_hue(&mut self, hue: f64) {
        self.hue = wrap_hue(hue);
    }

    /// True while any particle is still visible.
    pub fn active(&self) -> bool {
        self.particles.iter().any(|p| p.active)
    }

    /// A slot may be reclaimed once nothing is visible and no waves are pending.
    pub fn is_reusable(&self) -> bool {
        self.respawn == 0 && !self.active()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn active_particles(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.glow.age.reset();
        self.glow.velocity = Vector2D::ZERO;
        self.glow.alpha = GLOW_MAX_ALPHA;
        self.respawn_clock.reset();
        self.start_color = None;
        self.end_color = None;
        self.respawn = 0;
        self.waves = 0;
    }

    /// Fires one wave of `count` particles and sets the policy for the waves that follow.
    pub fn spawn(&mut self, count: usize, speed: f64, respawn: usize, respawn_interval: f64, life_time: f64, radius: f64) {
        self.respawn = respawn;
        self.respawn_interval = respawn_interval;
        self.spawn_wave(Burst { count, speed, life_time, radius });
    }

    pub fn spawn_random(&mut self, rng: &mut impl Rng) {
        let burst = Burst::random(rng);
        let respawn = rng.gen_range(RESPAWN_WAVES_RANGE);
        let respawn_interval = rng.gen_range(RESPAWN_INTERVAL_RANGE);
        self.spawn(burst.count, burst.speed, respawn, respawn_interval, burst.life_time, burst.radius);
    }

    /// Appends a radial fan of particles; earlier waves are left untouched.
    fn spawn_wave(&mut self, burst: Burst) {
        self.glow.age.reset();
        let (start_color, end_color) = self.colors();

        self.particles.reserve(burst.count);
        for i in 0..burst.count {
            let angle = i as f64 / burst.count as f64 * TAU;
            let velocity = Vector2D::from_angle(angle).scale(burst.speed);
            self.particles.push(Particle::new(self.position, velocity, burst.life_time, burst.radius, start_color, end_color));
        }
        self.waves += 1;
    }

    /// Palette for this explosion, picked on the first wave after a clear.
    fn colors(&mut self) -> (Rgb, Rgb) {
        if let (Some(start), Some(end)) = (self.start_color, self.end_color) {
            return (start, end);
        }
        let base = rainbow(self.hue);
        let start = base.interpolated(Rgb::WHITE, WHITE_BLEND);
        let end = rainbow(wrap_hue(self.hue + END_HUE_OFFSET));
        self.start_color = Some(start);
        self.end_color = Some(end);
        self.glow.color = base;
        (start, end)
    }

    pub fn update(&mut self, dt: f64, rng: &mut impl Rng) {
        self.respawn_clock.advance(dt);
        if self.respawn > 0 && self.respawn_clock.has_elapsed_reset(self.respawn_interval) {
            self.spawn_wave(Burst::random(rng));
            self.respawn -= 1;
        }
        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.glow.update(dt);
    }

    pub fn draw(&self, sink: &mut impl DrawSink) {
        if !self.active() {
            return;
        }
        for particle in &self.particles {
            particle.draw(sink);
        }
        self.glow.draw(sink);
    }
}
