pub mod agent;
pub mod clock;
pub mod color;
pub mod config;
pub mod direction;
pub mod engine;
pub mod events;
pub mod grid;
pub mod io;
pub mod program;
pub mod render;
pub mod simulation;

/// Grid coordinate. Signed, since agents can walk off the top and left edges.
pub type Coord = i32;
