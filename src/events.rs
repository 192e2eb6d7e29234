use crate::Coord;

pub enum Event {
    Sim(SimEvent),
    App(AppEvent),
}

/// Things a user can do to a running simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// Clear the grid and start over with a single agent in the middle
    Reset,

    /// Add an agent at grid cell `(x, y)`
    Spawn { x: Coord, y: Coord },

    /// Start or stop ticking
    TogglePause,

    /// Replace the program with one built from this text, then reset
    SetInstructions(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    EditEvent(EditEvent),

    /// Exit the application
    Exit,
}

/// Editing the instruction line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    Start,
    Push(char),
    Pop,
    Commit,
    Cancel,
}
