use crate::Coord;

/// A turn, read from an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// Parse a single instruction symbol, ignoring case. Anything other than `L` or `R` is not a
    /// turn.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'L' | 'l' => Some(Turn::Left),
            'R' | 'r' => Some(Turn::Right),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Turn::Left => 'L',
            Turn::Right => 'R',
        }
    }
}

/// Compass facing of an agent. `Up` is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Rotate 90 degrees counter-clockwise.
    pub const fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Down,
            Direction::Right => Direction::Up,
        }
    }

    /// Rotate 90 degrees clockwise.
    pub const fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Right => Direction::Down,
        }
    }

    pub const fn turn(self, turn: Turn) -> Self {
        match turn {
            Turn::Left => self.turn_left(),
            Turn::Right => self.turn_right(),
        }
    }

    /// Unit vector `(dx, dy)` of one step in this direction
    pub const fn offset(self) -> (Coord, Coord) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Glyph used by the text renderer
    pub const fn arrow(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}
