use crate::clock::Clock;
use crate::constants::*;
use crate::rendering::DrawSink;
use crate::types::{Rgb, Vector2D, rainbow};
use rand::Rng;

/// Advances a ballistic body by one frame: position first, then gravity on the velocity.
pub fn integrate(position: &mut Vector2D, velocity: &mut Vector2D, dt: f64) {
    *position = position.add(velocity.scale(dt));
    *velocity = velocity.add(Vector2D::new(0.0, GRAVITY * dt));
}

// --- Particle: a fading, shrinking circle ---
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub base_radius: f64,
    pub radius: f64,
    pub life_time: f64,
    pub age: Clock,
    pub active: bool,
    pub start_color: Rgb,
    pub end_color: Rgb,
    pub color: Rgb,
}

impl Particle {
    pub fn new(position: Vector2D, velocity: Vector2D, life_time: f64, radius: f64, start_color: Rgb, end_color: Rgb) -> Self {
        Particle {
            position,
            velocity,
            base_radius: radius,
            radius: Particle::radius_at(radius, 0.0),
            life_time,
            age: Clock::new(),
            active: true,
            start_color,
            end_color,
            color: Particle::color_at(start_color, end_color, 0.0),
        }
    }

    /// Display radius at the given fraction of the particle's life.
    pub fn radius_at(base_radius: f64, fraction: f64) -> f64 {
        base_radius * (1.0 - fraction.clamp(0.0, 1.0))
    }

    /// Display color at the given fraction of the particle's life.
    pub fn color_at(start: Rgb, end: Rgb, fraction: f64) -> Rgb {
        start.interpolated(end, 1.0 - fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(&self) -> f64 {
        self.age.elapsed_fraction(self.life_time)
    }

    pub fn update(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.age.advance(dt);
        integrate(&mut self.position, &mut self.velocity, dt);

        if self.age.has_elapsed(self.life_time) {
            self.active = false;
            return;
        }
        let fraction = self.fraction();
        self.radius = Particle::radius_at(self.base_radius, fraction);
        self.color = Particle::color_at(self.start_color, self.end_color, fraction);
    }

    pub fn draw(&self, sink: &mut impl DrawSink) {
        if !self.active {
            return;
        }
        sink.draw_circle(self.position, self.radius, self.color.with_alpha(255));
    }
}

// --- Rocket: rises from the bottom edge until gravity stops it ---
#[derive(Clone, Debug)]
pub struct Rocket {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub hue: f64,
    pub radius: f64,
    pub color: Rgb,
    pub active: bool,
}

impl Default for Rocket {
    fn default() -> Self {
        Rocket::new()
    }
}

impl Rocket {
    /// An idle slot; it does nothing until launched.
    pub fn new() -> Self {
        Rocket {
            position: Vector2D::ZERO,
            velocity: Vector2D::ZERO,
            hue: 0.0,
            radius: ROCKET_BASE_RADIUS,
            color: Rgb::WHITE,
            active: false,
        }
    }

    pub fn launch(&mut self, position: Vector2D, velocity: Vector2D, hue: f64) {
        self.position = position;
        self.velocity = velocity;
        self.hue = hue;
        self.radius = ROCKET_BASE_RADIUS;
        self.color = rainbow(hue).interpolated(Rgb::WHITE, WHITE_BLEND);
        self.active = true;
    }

    /// Launches from a random spot on the bottom edge of a `width` x `height` viewport.
    pub fn randomize(&mut self, hue: f64, width: f64, height: f64, rng: &mut impl Rng) {
        let x = if width > 2.0 * ROCKET_SPAWN_MARGIN {
            rng.gen_range(ROCKET_SPAWN_MARGIN..width - ROCKET_SPAWN_MARGIN)
        } else {
            width / 2.0
        };
        let velocity = Vector2D::new(
            rng.gen_range(ROCKET_VELOCITY_X_RANGE) as f64,
            rng.gen_range(ROCKET_VELOCITY_Y_RANGE) as f64,
        );
        self.launch(Vector2D::new(x, height), velocity, hue);
    }

    /// Returns true on the single frame the rocket passes its apex.
    pub fn update(&mut self, dt: f64) -> bool {
        if !self.active {
            return false;
        }
        integrate(&mut self.position, &mut self.velocity, dt);

        let slowdown = 1.0 - (-self.velocity.y / ROCKET_RADIUS_SPEED).clamp(0.0, 1.0);
        self.radius = ROCKET_MIN_RADIUS + ROCKET_RADIUS_GROWTH * slowdown;

        if self.velocity.y >= 0.0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn draw(&self, sink: &mut impl DrawSink) {
        if !self.active {
            return;
        }
        sink.draw_circle(self.position, self.radius, self.color.with_alpha(255));
    }
}
