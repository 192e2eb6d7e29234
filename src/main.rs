use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use turmite::clock::TickClock;
use turmite::config;
use turmite::config::Config;
use turmite::events::AppEvent;
use turmite::events::Event;
use turmite::events::SimEvent;
use turmite::io::LineEditor;
use turmite::io::Viewport;
use turmite::io::convert_event;
use turmite::render::Frame;
use turmite::render::status_line;
use turmite::simulation::Simulation;
use turmite::simulation::SimulationError;

const FRAMERATE: u32 = 60;
const FRAMETIME: Duration = Duration::from_millis((1_000 / FRAMERATE) as u64);

/// Upper bound on steps per frame, so a high tick rate can't stall input handling
const MAX_TICKS_PER_FRAME: u32 = 10_000;

const HELP: &str = "space: run/pause  r: reset  i: edit instructions  click: add ant  q: quit";

/// Run turmites in the terminal
#[derive(Parser)]
#[command(name = "turmite", about = "Langton's ant and friends, in the terminal")]
struct Args {
    /// Grid rows
    #[arg(long, default_value_t = config::DEFAULT_ROWS)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = config::DEFAULT_COLUMNS)]
    columns: usize,

    /// Simulation steps per second
    #[arg(long, default_value_t = config::DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Turn instructions, for instance "RL" or "LLRR". Anything but L and R is ignored.
    #[arg(long, default_value = config::DEFAULT_INSTRUCTIONS)]
    instructions: String,

    /// Write logs here. Filter with `RUST_LOG`.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            rows: self.rows,
            columns: self.columns,
            tick_rate: self.tick_rate,
            instructions: self.instructions.clone(),
        }
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {path:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Everything the host loop owns on top of the simulation
struct App {
    sim: Simulation,
    frame: Frame,
    editor: LineEditor,
    viewport: Viewport,

    /// Last rejected instruction edit, shown until the next successful one
    message: Option<String>,
}

impl App {
    /// Returns `false` once the app should exit
    fn handle(&mut self, event: Event) -> anyhow::Result<bool> {
        let sim_event = match event {
            Event::App(AppEvent::Exit) => return Ok(false),
            Event::App(AppEvent::EditEvent(edit)) => match self.editor.apply(edit) {
                Some(event) => event,
                None => return Ok(true),
            },
            Event::Sim(event) => event,
        };

        let reload = matches!(sim_event, SimEvent::SetInstructions(_));

        match self.sim.on_user_event(sim_event) {
            Ok(()) => {
                if reload {
                    self.message = None;
                }
            }
            Err(SimulationError::Program(e)) => {
                self.message = Some(e.to_string());
            }
            Err(e) => return Err(e).context("Failed to handle event"),
        }

        Ok(true)
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.frame.draw(&self.sim);

        queue!(out, terminal::Clear(terminal::ClearType::All))?;
        self.frame.queue(out, self.viewport.col, self.viewport.row)?;

        let below = self
            .viewport
            .row
            .saturating_add(u16::try_from(self.frame.height()).unwrap_or(u16::MAX));

        queue!(
            out,
            cursor::MoveTo(0, below),
            style::Print(status_line(&self.sim)),
            cursor::MoveTo(0, below.saturating_add(1)),
        )?;

        match (self.editor.line(), &self.message) {
            (Some(line), _) => queue!(out, style::Print(format!("instructions> {line}")))?,
            (None, Some(message)) => queue!(out, style::Print(message))?,
            (None, None) => queue!(out, style::Print(HELP))?,
        }

        out.flush()
    }
}

fn run<W: Write>(out: &mut W, config: &Config) -> anyhow::Result<()> {
    let sim = Simulation::new(config).context("Failed to set up simulation")?;

    let mut app = App {
        frame: Frame::new(config.columns, config.rows),
        sim,
        editor: LineEditor::default(),
        viewport: Viewport::default(),
        message: None,
    };

    let mut clock = TickClock::new(config.tick_interval(), Instant::now(), MAX_TICKS_PER_FRAME);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            let event = event::read()?;

            let Some(event) = convert_event(event, app.editor.is_editing(), app.viewport) else {
                continue;
            };

            if !app.handle(event)? {
                return Ok(());
            }
        }

        // No ticks are owed for time spent paused
        if app.sim.is_paused() {
            clock.hold(Instant::now());
        }

        for _ in 0..clock.owed(Instant::now()) {
            app.sim.on_tick().context("Simulation step failed")?;
        }

        app.draw(out)?;

        std::thread::sleep(FRAMETIME.saturating_sub(frame_start.elapsed()));
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = args.config();

    info!(?config, "Starting");

    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(&mut stdout, &config);

    execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &res {
        error!("{e:#}");
    }

    res
}
