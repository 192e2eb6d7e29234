use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color as TermColor;

use crate::Coord;
use crate::simulation::Simulation;

/// Every grid cell is drawn as this many terminal columns, so cells come out roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Agents are painted in this color, `#A00`
const AGENT_COLOR: TermColor = TermColor::Rgb { r: 0xAA, g: 0, b: 0 };

/// Glyphs for program indices `1..`. Index `0` is `.`, indices past the end are `#`.
const INDEX_GLYPHS: &[u8] = b"123456789abcdefghijklmnopqrstuvwxyz";

/// Glyph of a cell holding a color not in the program
const UNKNOWN_GLYPH: char = '?';

#[derive(Clone, Copy)]
struct Pixel {
    glyph: char,
    color: TermColor,
    agent: bool,
}

impl Pixel {
    const BLANK: Self = Self {
        glyph: ' ',
        color: TermColor::Reset,
        agent: false,
    };
}

/// Screen buffer for a simulation.
///
/// [`Frame::draw`] snapshots a simulation into the buffer. From there it can either be turned
/// into plain text with [`Frame::render`], or queued onto a terminal in color with
/// [`Frame::queue`].
pub struct Frame {
    /// The pixel buffer, one pixel per grid cell
    pb: Vec<Pixel>,

    /// The text framebuffer
    fb: String,

    /// Width of the buffer, in grid cells
    w: usize,

    /// Height of the buffer, in grid cells
    h: usize,
}

impl Frame {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            pb: vec![Pixel::BLANK; w * h],
            // One byte per glyph, plus the newlines
            fb: String::with_capacity(w * h + h),
            w,
            h,
        }
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Reset the pixel buffer
    pub fn reset(&mut self) {
        self.pb.fill(Pixel::BLANK);
    }

    /// Copy the grid and agents of `sim` into the pixel buffer. Cells past the edge of the
    /// buffer are cut off.
    pub fn draw(&mut self, sim: &Simulation) {
        self.reset();

        let program = sim.program();

        for cell in sim.grid().cells() {
            let Some(i) = self.xy_from(cell.x, cell.y) else {
                continue;
            };

            let glyph = match program.index_of(cell.color) {
                Some(0) => '.',
                Some(n) => INDEX_GLYPHS.get(n - 1).map_or('#', |&b| b as char),
                None => UNKNOWN_GLYPH,
            };

            let (r, g, b) = cell.color.to_rgb();

            self.pb[i] = Pixel {
                glyph,
                color: TermColor::Rgb { r, g, b },
                agent: false,
            };
        }

        // Inert agents have left the grid, and are never drawn
        for agent in sim.agents() {
            let Some(i) = self.xy_from(agent.x, agent.y) else {
                continue;
            };

            self.pb[i] = Pixel {
                glyph: agent.direction.arrow(),
                color: AGENT_COLOR,
                agent: true,
            };
        }
    }

    /// Plain text view of the buffer, one line per row, without a trailing newline
    pub fn render(&mut self) -> &str {
        self.fb.clear();

        for (i, px) in self.pb.iter().enumerate() {
            if i > 0 && i % self.w == 0 {
                self.fb.push('\n');
            }

            self.fb.push(px.glyph);
        }

        &self.fb
    }

    /// Queue the buffer onto `out` in color, with its top left corner at terminal cell `(col,
    /// row)`.
    pub fn queue<W: Write>(&self, out: &mut W, col: u16, row: u16) -> io::Result<()> {
        for (y, line) in self.pb.chunks(self.w.max(1)).enumerate() {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            queue!(out, cursor::MoveTo(col, row.saturating_add(y)))?;

            for px in line {
                let fg = if px.agent {
                    TermColor::White
                } else {
                    TermColor::DarkGrey
                };

                // Agents get their arrow, cells only their color
                let text = if px.agent {
                    format!("{:<width$}", px.glyph, width = CELL_WIDTH as usize)
                } else {
                    " ".repeat(CELL_WIDTH as usize)
                };

                queue!(
                    out,
                    style::SetBackgroundColor(px.color),
                    style::SetForegroundColor(fg),
                    style::Print(text),
                )?;
            }

            queue!(out, style::ResetColor)?;
        }

        Ok(())
    }

    fn xy_from(&self, x: Coord, y: Coord) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;

        (x < self.w && y < self.h).then_some(y * self.w + x)
    }
}

/// One line summary of a simulation, shown under the grid
pub fn status_line(sim: &Simulation) -> String {
    let state = if sim.is_paused() { "paused" } else { "running" };
    let agents = sim.agents().len();
    let noun = if agents == 1 { "agent" } else { "agents" };

    format!(
        "{} | tick {} | {agents} {noun} | {state}",
        sim.program(),
        sim.tick(),
    )
}
