use thiserror::Error;
use tracing::trace;
use tracing::warn;

use crate::Coord;
use crate::agent::Agents;
use crate::color::Color;
use crate::grid::Grid;
use crate::program::Program;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    /// A cell holds a color the program never handed out. The grid was built for another
    /// program, which is a bug in the caller.
    #[error("Cell ({x}, {y}) holds {color}, which is not a color of the program")]
    ColorNotInProgram { x: Coord, y: Coord, color: Color },
}

/// Advance every agent by one tick.
///
/// Agents are handled one after the other, in insertion order, and each sees the grid as left by
/// the agents before it. Two agents standing on the same cell thus move that cell two steps
/// through the program.
///
/// For each agent standing on a cell:
/// 1. the instruction bound to the cell's color turns the agent,
/// 2. the agent moves one cell forward,
/// 3. the cell it left takes the color of the next instruction, wrapping around.
///
/// An agent off the grid is skipped. Since nothing moves it back, it stays inert for the rest
/// of the run. This is not an error.
pub fn step(agents: &mut Agents, grid: &mut Grid, program: &Program) -> Result<(), StepError> {
    for agent in agents.iter_mut() {
        let (x, y) = (agent.x, agent.y);

        let Some(cell) = grid.at_mut(x, y) else {
            continue;
        };

        let Some(current) = program.index_of(cell.color) else {
            return Err(StepError::ColorNotInProgram {
                x,
                y,
                color: cell.color,
            });
        };
        let next = program.next_index(current);

        cell.color = program[next].color;

        agent.direction = agent.direction.turn(program[current].turn);
        agent.advance();

        trace!(x, y, current, next, direction = ?agent.direction, "Agent stepped");

        if !grid.contains(agent.x, agent.y) {
            warn!(x = agent.x, y = agent.y, "Agent left the grid and is now inert");
        }
    }

    Ok(())
}
