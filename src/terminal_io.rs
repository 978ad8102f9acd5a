use std::collections::HashMap;
use std::io;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

/// What a key press asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Confirm, // Space or Enter: start, flap, resume, retry
    Back,    // Esc: pause, or leave to the menu
    Quit,
}

pub fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Key(KeyEvent { code, kind, .. }) if *kind != KeyEventKind::Release => match code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => Some(Command::Confirm),
            KeyCode::Esc => Some(Command::Back),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}

// --- SimulatedInput for headless runs ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    /// Start from the menu, flap every 24 frames, pause once, then quit.
    pub fn demo_script() -> Self {
        let mut events = HashMap::new();
        events.insert(1, Event::Key(KeyCode::Char(' ').into()));
        for frame in (14..120).step_by(24) {
            events.insert(frame, Event::Key(KeyCode::Char(' ').into()));
        }
        events.insert(121, Event::Key(KeyCode::Esc.into()));
        events.insert(125, Event::Key(KeyCode::Char(' ').into()));
        events.insert(200, Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.contains_key(&frame_count))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.events.remove(&self.current_frame) {
            Ok(event)
        } else {
            Ok(Event::Key(KeyCode::Null.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for(&Event::Key(KeyCode::Char(' ').into())), Some(Command::Confirm));
        assert_eq!(command_for(&Event::Key(KeyCode::Enter.into())), Some(Command::Confirm));
        assert_eq!(command_for(&Event::Key(KeyCode::Esc.into())), Some(Command::Back));
        assert_eq!(command_for(&Event::Key(KeyCode::Char('q').into())), Some(Command::Quit));
        assert_eq!(command_for(&Event::Key(KeyCode::Char('x').into())), None);
        assert_eq!(command_for(&Event::Resize(10, 10)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent::new_with_kind(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(command_for(&Event::Key(release)), None);
    }

    #[test]
    fn simulated_events_fire_once_on_their_frame() {
        let mut events = HashMap::new();
        events.insert(3, Event::Key(KeyCode::Esc.into()));
        let mut input = SimulatedInput::new(events);
        assert!(!input.poll(2).unwrap());
        assert!(input.poll(3).unwrap());
        assert_eq!(command_for(&input.read().unwrap()), Some(Command::Back));
        assert!(!input.poll(3).unwrap());
    }
}
