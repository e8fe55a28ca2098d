use std::io::{self, Write};
use std::time::Duration;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    style::ResetColor,
};
use rand::Rng;
use log::{debug, error, info};

use crate::clock::FrameTimer;
use crate::constants::*;
use crate::rendering::{Canvas, OutputTarget};
use crate::simulation::Simulation;
use crate::terminal_io::SimulatedInput;

pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    simulation: Simulation,
    canvas: Canvas,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        let mut simulation = Simulation::new();
        // The show waits behind the pause gate until Space is pressed
        simulation.set_paused(true);
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
            simulation,
            canvas: Canvas::new(terminal_width, terminal_height),
        }
    }

    #[cfg(test)]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn run(&mut self) -> io::Result<u64> {
        let mut rng = rand::thread_rng();
        self.run_with(&mut rng)
    }

    /// Runs frames until quit or the frame limit; returns the number of frames shown.
    pub fn run_with(&mut self, rng: &mut impl Rng) -> io::Result<u64> {
        let mut frame_timer = FrameTimer::new(MAX_FRAME_DELTA);
        let mut running = true;
        let mut frame_count = 0;

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            self.handle_input(&mut running, frame_count)?;
            if !running {
                break;
            }

            let dt = if self.debug_mode_active { DEBUG_FRAME_DELTA } else { frame_timer.tick() };
            self.simulation.update(dt, self.canvas.viewport(), rng);

            self.canvas.clear();
            self.simulation.draw(&mut self.canvas);
            self.render(frame_count)?;

            frame_count += 1;
        }

        info!(
            "Stopped after {} frames with {} rocket and {} explosion slots",
            frame_count,
            self.simulation.rockets().len(),
            self.simulation.explosions().len()
        );
        Ok(frame_count)
    }

    fn handle_input(&mut self, running: &mut bool, frame_count: u64) -> io::Result<()> {
        let current_event = if let Some(sim_input) = &mut self.simulated_input {
            sim_input.next_event(frame_count)
        } else if event::poll(Duration::from_millis(FRAME_POLL_MILLIS)).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            Some(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?)
        } else {
            None
        };

        match current_event {
            Some(Event::Key(key_event)) if key_event.kind != KeyEventKind::Release => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => *running = false,
                KeyCode::Char(' ') => {
                    let paused = !self.simulation.is_paused();
                    self.simulation.set_paused(paused);
                }
                _ => {}
            },
            Some(Event::Resize(new_width, new_height)) => {
                info!("Terminal resized to {}x{}", new_width, new_height);
                self.terminal_width = new_width;
                self.terminal_height = new_height;
                self.canvas = Canvas::new(new_width, new_height);
            }
            _ => {}
        }
        Ok(())
    }

    fn status_line(&self) -> String {
        let particles: usize = self.simulation.explosions().iter().map(|e| e.active_particles()).sum();
        let mut status = format!(
            "Fireworks  rockets {}/{}  explosions {}/{}  particles {}  t={:.1}s",
            self.simulation.active_rockets(),
            self.simulation.rockets().len(),
            self.simulation.active_explosions(),
            self.simulation.explosions().len(),
            particles,
            self.simulation.run_time()
        );
        if self.simulation.is_paused() {
            status.push_str("  [paused - Space to resume]");
        }
        status.truncate(self.terminal_width as usize);
        status
    }

    fn render(&mut self, frame_count: u64) -> io::Result<()> {
        self.canvas.render(&mut self.stdout_target)?;

        let status = self.status_line();
        self.stdout_target.queue_command(ResetColor)?;
        self.stdout_target.move_to(0, 0)?;
        write!(self.stdout_target, "{}", status)?;

        let controls = "Space: pause/resume  q: quit";
        self.stdout_target.move_to(0, self.terminal_height.saturating_sub(1))?;
        write!(self.stdout_target, "{}", controls)?;

        self.stdout_target.flush()?;

        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            debug!("Frame {}: {} lit pixels", frame_count, self.canvas.lit_pixels());
            sb.print_to_log(frame_count);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::ScreenBuffer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn headless_game(width: u16, height: u16, input: SimulatedInput, max_frames: Option<u64>) -> Game {
        let target = OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height));
        Game::new(width, height, target, Some(input), true, max_frames)
    }

    #[test]
    fn scripted_run_quits_on_schedule() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut game = headless_game(80, 24, SimulatedInput::scripted(240), None);
        let frames = game.run_with(&mut rng).unwrap();
        assert_eq!(frames, 240);
        assert!(!game.simulation().is_paused());
        assert!(!game.simulation().rockets().is_empty());
    }

    #[test]
    fn frame_limit_stops_the_loop() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut game = headless_game(40, 12, SimulatedInput::scripted(1000), Some(30));
        assert_eq!(game.run_with(&mut rng).unwrap(), 30);
    }

    #[test]
    fn starts_behind_the_pause_gate() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut game = headless_game(40, 12, SimulatedInput::new(Default::default()), Some(60));
        game.run_with(&mut rng).unwrap();
        assert!(game.simulation().is_paused());
        assert_eq!(game.simulation().run_time(), 0.0);
        assert!(game.simulation().rockets().is_empty());
    }

    #[test]
    fn status_line_is_written_to_the_screen() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut game = headless_game(80, 24, SimulatedInput::scripted(10), None);
        game.run_with(&mut rng).unwrap();
        match &game.stdout_target {
            OutputTarget::ScreenBuffer(sb) => {
                assert!(sb.row(0).starts_with("Fireworks  rockets"));
                assert!(sb.row(23).starts_with("Space: pause/resume"));
            }
            OutputTarget::Stdout(_) => panic!("expected a screen buffer"),
        }
    }
}
