use crate::Coord;
use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
    pub color: Color,
}

/// A fixed size, row-major grid of colored cells.
///
/// The grid never changes shape. Every cell color is expected to be a color of the program the
/// grid was created for; the grid itself doesn't check this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a `rows` by `columns` grid with every cell set to `color`.
    pub fn new(rows: usize, columns: usize, color: Color) -> Self {
        let cells = (0..rows)
            .flat_map(|y| {
                (0..columns).map(move |x| Cell {
                    x: x as Coord,
                    y: y as Coord,
                    color,
                })
            })
            .collect();

        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether `(x, y)` lies in `[0, columns) x [0, rows)`
    pub fn contains(&self, x: Coord, y: Coord) -> bool {
        self.xy_from(x, y).is_some()
    }

    pub fn at(&self, x: Coord, y: Coord) -> Option<&Cell> {
        let i = self.xy_from(x, y)?;

        self.cells.get(i)
    }

    pub fn at_mut(&mut self, x: Coord, y: Coord) -> Option<&mut Cell> {
        let i = self.xy_from(x, y)?;

        self.cells.get_mut(i)
    }

    /// All cells, row by row
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn xy_from(&self, x: Coord, y: Coord) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;

        (x < self.columns && y < self.rows).then_some(y * self.columns + x)
    }
}
