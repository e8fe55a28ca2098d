use log::{debug, info};
use rand::Rng;

use crate::clock::Clock;
use crate::constants::*;
use crate::entities::Rocket;
use crate::explosion::Explosion;
use crate::rendering::DrawSink;
use crate::types::{Vector2D, wrap_hue};

/// Visible area in world units; rockets launch from its bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Launch interval that drifts smoothly between random targets inside `[min, max]`.
#[derive(Clone, Debug)]
pub struct LaunchInterval {
    min: f64,
    max: f64,
    from: f64,
    to: f64,
    progress: f64,
}

impl LaunchInterval {
    pub fn new(min: f64, max: f64) -> Self {
        let middle = (min + max) / 2.0;
        LaunchInterval { min, max, from: middle, to: middle, progress: 1.0 }
    }

    pub fn update(&mut self, dt: f64, rng: &mut impl Rng) {
        self.progress += dt.max(0.0) / LAUNCH_INTERVAL_DRIFT_SECONDS;
        if self.progress >= 1.0 {
            self.from = self.to;
            self.to = if self.max > self.min { rng.gen_range(self.min..self.max) } else { self.min };
            self.progress = 0.0;
        }
    }

    pub fn get(&self) -> f64 {
        // Smoothstep keeps the walk free of sudden jumps at the targets
        let t = self.progress.clamp(0.0, 1.0);
        let eased = t * t * (3.0 - 2.0 * t);
        self.from + (self.to - self.from) * eased
    }
}

pub struct Simulation {
    rockets: Vec<Rocket>,
    explosions: Vec<Explosion>,
    launch_interval: LaunchInterval,
    launch_clock: Clock,
    run_time: f64,
    paused: bool,
    ignited: Vec<usize>, // Explosion slots born during the current frame
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Simulation {
            rockets: Vec::new(),
            explosions: Vec::new(),
            launch_interval: LaunchInterval::new(LAUNCH_INTERVAL_MIN, LAUNCH_INTERVAL_MAX),
            launch_clock: Clock::new(),
            run_time: 0.0,
            paused: false,
            ignited: Vec::new(),
        }
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn active_rockets(&self) -> usize {
        self.rockets.iter().filter(|r| r.active).count()
    }

    pub fn active_explosions(&self) -> usize {
        self.explosions.iter().filter(|e| e.active()).count()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Closes or opens the pause gate; while closed every entity is frozen.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn run_time(&self) -> f64 {
        self.run_time
    }

    /// Slow global hue cycle that launches are tinted from.
    pub fn color_cycle(&self) -> f64 {
        wrap_hue(self.run_time / COLOR_CYCLE_SECONDS + COLOR_CYCLE_OFFSET)
    }

    pub fn update(&mut self, dt: f64, viewport: Viewport, rng: &mut impl Rng) {
        if self.paused {
            return;
        }
        let dt = dt.max(0.0);
        self.run_time += dt;

        self.launch_interval.update(dt, rng);
        self.launch_clock.advance(dt);
        if self.launch_clock.has_elapsed_reset(self.launch_interval.get()) {
            let hue = wrap_hue(self.color_cycle() + rng.gen_range(-HUE_JITTER..HUE_JITTER));
            self.launch_rocket(hue, viewport, rng);
        }

        self.ignited.clear();
        for slot in 0..self.rockets.len() {
            if self.rockets[slot].update(dt) {
                let (position, hue) = (self.rockets[slot].position, self.rockets[slot].hue);
                let explosion = self.ignite_explosion(position, hue, rng);
                self.ignited.push(explosion);
            }
        }

        // Explosions born this frame already hold their first wave; their physics start next frame
        for (slot, explosion) in self.explosions.iter_mut().enumerate() {
            if self.ignited.contains(&slot) {
                continue;
            }
            explosion.update(dt, rng);
        }
    }

    /// Launches into the first idle rocket slot, growing the pool only when all are busy.
    pub fn launch_rocket(&mut self, hue: f64, viewport: Viewport, rng: &mut impl Rng) -> usize {
        let slot = match self.rockets.iter().position(|r| !r.active) {
            Some(slot) => slot,
            None => {
                self.rockets.push(Rocket::new());
                info!("Rocket pool grew to {}", self.rockets.len());
                self.rockets.len() - 1
            }
        };
        self.rockets[slot].randomize(hue, viewport.width, viewport.height, rng);
        debug!("Launched rocket in slot {} with hue {:.3}", slot, hue);
        slot
    }

    /// Starts an explosion in the first reusable slot, growing the pool only when none is free.
    pub fn ignite_explosion(&mut self, position: Vector2D, hue: f64, rng: &mut impl Rng) -> usize {
        let slot = match self.explosions.iter().position(|e| e.is_reusable()) {
            Some(slot) => {
                self.explosions[slot].clear();
                slot
            }
            None => {
                self.explosions.push(Explosion::new());
                info!("Explosion pool grew to {}", self.explosions.len());
                self.explosions.len() - 1
            }
        };
        let explosion = &mut self.explosions[slot];
        explosion.set_hue(hue);
        explosion.set_position(position);
        explosion.spawn_random(rng);
        debug!(
            "Ignited explosion in slot {} at ({:.1}, {:.1}) with {} particles",
            slot,
            position.x,
            position.y,
            explosion.particle_count()
        );
        slot
    }

    /// Rockets first, then explosions in pool order.
    pub fn draw(&self, sink: &mut impl DrawSink) {
        for rocket in &self.rockets {
            rocket.draw(sink);
        }
        for explosion in &self.explosions {
            explosion.draw(sink);
        }
    }
}
