use anyhow::Result;

use crate::snake::Heading;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Steer(Heading),
    /// Any other key press.
    Key,
    /// Window close: Ctrl+C, Esc or `q`.
    Quit,
}

/// Source of the key events that arrived since the previous poll.
pub trait InputSource {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

pub fn quit_requested(events: &[InputEvent]) -> bool {
    events.contains(&InputEvent::Quit)
}

/// The heading the player asked for most recently during a tick.
///
/// Only one heading change is applied per tick, otherwise two quick turns
/// could fold the head back onto the neck before the snake moves.
pub fn last_steer(events: &[InputEvent]) -> Option<Heading> {
    events.iter().rev().find_map(|ev| match ev {
        InputEvent::Steer(heading) => Some(*heading),
        _ => None,
    })
}
