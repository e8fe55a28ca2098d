use std::collections::HashMap;
use crossterm::event::{Event, KeyCode};

// --- SimulatedInput: scripted key presses for headless debug runs ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events }
    }

    /// Opens the pause gate on the first frame and quits after `quit_frame` frames.
    pub fn scripted(quit_frame: u64) -> Self {
        let mut events = HashMap::new();
        events.insert(0, Event::Key(KeyCode::Char(' ').into()));
        events.insert(quit_frame, Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    /// The event scheduled for `frame`, consumed on read.
    pub fn next_event(&mut self, frame: u64) -> Option<Event> {
        self.events.remove(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_releases_gate_then_quits() {
        let mut input = SimulatedInput::scripted(5);
        assert_eq!(input.next_event(0), Some(Event::Key(KeyCode::Char(' ').into())));
        assert_eq!(input.next_event(0), None);
        assert_eq!(input.next_event(3), None);
        assert_eq!(input.next_event(5), Some(Event::Key(KeyCode::Char('q').into())));
        assert_eq!(input.next_event(5), None);
    }
}
