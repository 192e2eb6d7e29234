use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::Coord;
use crate::agent::Agents;
use crate::config::Config;
use crate::config::ConfigError;
use crate::engine;
use crate::engine::StepError;
use crate::events::SimEvent;
use crate::grid::Grid;
use crate::program::Program;
use crate::program::ProgramError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid instructions: {0}")]
    Program(#[from] ProgramError),

    #[error("Step failed: {0}")]
    Step(#[from] StepError),
}

/// All the state of one simulation.
///
/// A single owner drives it: the host calls [`Simulation::on_tick`] on its own schedule and
/// forwards user input through [`Simulation::on_user_event`]. Both take `&mut self`, so a step
/// can never overlap a reset or a spawn.
#[derive(Debug, Clone)]
pub struct Simulation {
    program: Program,
    grid: Grid,
    agents: Agents,

    /// While paused, ticks are dropped
    paused: bool,

    /// Steps taken since the last reset
    tick: u64,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self, SimulationError> {
        config.validate()?;

        let program = Program::build(&config.instructions)?;

        Ok(Self::with_program(config.rows, config.columns, program))
    }

    /// Create a reset simulation for an already built program
    pub fn with_program(rows: usize, columns: usize, program: Program) -> Self {
        let grid = Grid::new(rows, columns, program.first().color);

        Self {
            program,
            grid,
            agents: Self::center_agent(rows, columns),
            paused: true,
            tick: 0,
        }
    }

    /// The single agent a fresh simulation starts with
    fn center_agent(rows: usize, columns: usize) -> Agents {
        let mut agents = Agents::new();
        agents.spawn((columns / 2) as Coord, (rows / 2) as Coord);

        agents
    }

    /// Repaint the grid with the program's first color and leave a single agent in the middle,
    /// facing up. The simulation is paused afterwards.
    pub fn reset(&mut self) {
        let (rows, columns) = (self.grid.rows(), self.grid.columns());

        self.grid = Grid::new(rows, columns, self.program.first().color);

        self.agents = Self::center_agent(rows, columns);

        self.paused = true;
        self.tick = 0;

        debug!(rows, columns, program = %self.program, "Reset simulation");
    }

    /// Build a new program from `raw` and reset onto it.
    ///
    /// If `raw` holds no instruction, nothing changes and the error is returned.
    pub fn set_instructions(&mut self, raw: &str) -> Result<(), ProgramError> {
        let program = match Program::build(raw) {
            Ok(program) => program,
            Err(e) => {
                warn!(raw, "Rejected instructions: {e}");

                return Err(e);
            }
        };

        self.program = program;
        self.reset();

        Ok(())
    }

    /// Add an agent at `(x, y)`.
    ///
    /// Nothing happens if the cell lies outside the grid or is already taken. Returns whether an
    /// agent was added.
    pub fn spawn(&mut self, x: Coord, y: Coord) -> bool {
        if !self.grid.contains(x, y) {
            return false;
        }

        let spawned = self.agents.spawn(x, y);
        if spawned {
            debug!(x, y, agents = self.agents.len(), "Spawned agent");
        }

        spawned
    }

    /// Returns whether the simulation is now paused
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;

        debug!(paused = self.paused, "Toggled pause");

        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Step once, unless paused. Returns whether a step was taken.
    pub fn on_tick(&mut self) -> Result<bool, StepError> {
        if self.paused {
            return Ok(false);
        }

        self.step()?;

        Ok(true)
    }

    /// Step once, paused or not
    pub fn step(&mut self) -> Result<(), StepError> {
        engine::step(&mut self.agents, &mut self.grid, &self.program)?;
        self.tick += 1;

        Ok(())
    }

    pub fn on_user_event(&mut self, event: SimEvent) -> Result<(), SimulationError> {
        match event {
            SimEvent::Reset => self.reset(),
            SimEvent::Spawn { x, y } => {
                self.spawn(x, y);
            }
            SimEvent::TogglePause => {
                self.toggle_pause();
            }
            SimEvent::SetInstructions(raw) => self.set_instructions(&raw)?,
        }

        Ok(())
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agents(&self) -> &Agents {
        &self.agents
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
