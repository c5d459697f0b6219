use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::player::Side;
use crate::error::MoveError;

/// Board geometry. On a cylinder the leftmost and rightmost columns are
/// neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Rectangle,
    Cylinder,
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::Rectangle => "Rectangle",
            Shape::Cylinder => "Cylinder",
        }
    }

    pub fn wraps(self) -> bool {
        self == Shape::Cylinder
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rectangle" => Ok(Shape::Rectangle),
            "cylinder" => Ok(Shape::Cylinder),
            _ => Err(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    First,
    Second,
}

impl Cell {
    /// The side occupying this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::First => Some(Side::First),
            Cell::Second => Some(Side::Second),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Fixed-size grid with gravity placement.
///
/// Row 0 is the top, row `height - 1` the bottom. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    shape: Shape,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(height: usize, width: usize, shape: Shape) -> Self {
        Board {
            height,
            width,
            shape,
            cells: vec![Cell::Empty; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Get the cell at a position.
    ///
    /// On a cylinder the column is first wrapped into `[0, width)`, so callers
    /// may probe columns outside the board. Anything still out of bounds reads
    /// as empty.
    pub fn get(&self, row: isize, col: isize) -> Cell {
        match self.index(row, col) {
            Some(idx) => self.cells[idx],
            None => Cell::Empty,
        }
    }

    /// Overwrite a cell directly, bypassing gravity. Out-of-bounds writes are
    /// ignored. Used to place and retract speculative pieces during search.
    pub fn set(&mut self, row: isize, col: isize, cell: Cell) {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return;
        }
        let idx = row as usize * self.width + col as usize;
        self.cells[idx] = cell;
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width || self.height == 0 {
            return true;
        }
        !self.cells[col].is_empty()
    }

    /// Row a piece dropped into `col` would land in.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.cells[row * self.width + col].is_empty())
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, side: Side) -> Result<usize, MoveError> {
        if col >= self.width {
            return Err(MoveError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }

        let row = self
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull { column: col })?;
        self.cells[row * self.width + col] = side.to_cell();
        Ok(row)
    }

    /// Check if the board is completely full (every top-row cell occupied)
    pub fn is_full(&self) -> bool {
        (0..self.width).all(|col| self.is_column_full(col))
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Columns that can still accept a piece, left to right.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    fn index(&self, row: isize, col: isize) -> Option<usize> {
        if self.width == 0 {
            return None;
        }
        let col = if self.shape.wraps() {
            col.rem_euclid(self.width as isize)
        } else {
            col
        };
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Board {
        Board::new(6, 7, Shape::Rectangle)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = classic();
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = classic();

        let row = board.drop_piece(3, Side::First).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::First);

        let row = board.drop_piece(3, Side::Second).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Second);
    }

    #[test]
    fn test_column_full() {
        let mut board = classic();
        for _ in 0..6 {
            board.drop_piece(0, Side::First).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.lowest_empty_row(0), None);
        assert_eq!(
            board.drop_piece(0, Side::Second),
            Err(MoveError::ColumnFull { column: 0 })
        );
    }

    #[test]
    fn test_invalid_column() {
        let mut board = classic();
        assert_eq!(
            board.drop_piece(7, Side::First),
            Err(MoveError::InvalidColumn { column: 7, width: 7 })
        );
        assert!(board.is_column_full(7));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(3, 3, Shape::Rectangle);
        for col in 0..3 {
            for _ in 0..3 {
                board.drop_piece(col, Side::First).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.open_columns().is_empty());
    }

    #[test]
    fn test_full_means_top_row_only() {
        let mut board = Board::new(3, 2, Shape::Rectangle);
        board.set(0, 0, Cell::First);
        board.set(0, 1, Cell::Second);
        assert!(board.is_full());
    }

    #[test]
    fn test_rectangle_out_of_bounds_reads_empty() {
        let mut board = classic();
        board.drop_piece(0, Side::First).unwrap();
        assert_eq!(board.get(5, -7), Cell::Empty);
        assert_eq!(board.get(5, 7), Cell::Empty);
        assert_eq!(board.get(-1, 0), Cell::Empty);
        assert_eq!(board.get(6, 0), Cell::Empty);
    }

    #[test]
    fn test_cylinder_wraps_columns() {
        let mut board = Board::new(6, 7, Shape::Cylinder);
        board.drop_piece(0, Side::First).unwrap();
        board.drop_piece(6, Side::Second).unwrap();
        assert_eq!(board.get(5, 7), Cell::First);
        assert_eq!(board.get(5, -1), Cell::Second);
        assert_eq!(board.get(5, -14), Cell::First);
        // Rows never wrap
        assert_eq!(board.get(6, 0), Cell::Empty);
    }

    #[test]
    fn test_set_ignores_out_of_bounds() {
        let mut board = classic();
        let before = board.clone();
        board.set(-1, 0, Cell::First);
        board.set(0, 7, Cell::First);
        board.set(6, 0, Cell::First);
        assert_eq!(board, before);

        board.set(2, 2, Cell::Second);
        assert_eq!(board.get(2, 2), Cell::Second);
        board.set(2, 2, Cell::Empty);
        assert_eq!(board, before);
    }

    #[test]
    fn test_shape_parse() {
        assert_eq!("Cylinder".parse::<Shape>(), Ok(Shape::Cylinder));
        assert_eq!("rectangle".parse::<Shape>(), Ok(Shape::Rectangle));
        assert!("Torus".parse::<Shape>().is_err());
        assert_eq!(Shape::Cylinder.to_string(), "Cylinder");
    }
}
