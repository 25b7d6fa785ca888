//! The 9x9 Tablut board and its special squares.

use std::fmt;
use std::str::FromStr;

use super::TablutParseError;

/// Width and height of the board
pub const BOARD_SIZE: usize = 9;

/// The central square the king starts on
pub const THRONE: Square = Square::new(4, 4);

/// The four camps the attackers start in, one group of four squares each
pub const CAMPS: [[Square; 4]; 4] = [
    // a4 a5 a6 b5
    [Square::new(3, 0), Square::new(4, 0), Square::new(5, 0), Square::new(4, 1)],
    // i4 i5 i6 h5
    [Square::new(3, 8), Square::new(4, 8), Square::new(5, 8), Square::new(4, 7)],
    // d1 e1 f1 e2
    [Square::new(0, 3), Square::new(0, 4), Square::new(0, 5), Square::new(1, 4)],
    // d9 e9 f9 e8
    [Square::new(8, 3), Square::new(8, 4), Square::new(8, 5), Square::new(7, 4)],
];

/// Edge squares the king escapes through
pub const ESCAPES: [Square; 16] = [
    Square::new(0, 1),
    Square::new(0, 2),
    Square::new(0, 6),
    Square::new(0, 7),
    Square::new(8, 1),
    Square::new(8, 2),
    Square::new(8, 6),
    Square::new(8, 7),
    Square::new(1, 0),
    Square::new(2, 0),
    Square::new(6, 0),
    Square::new(7, 0),
    Square::new(1, 8),
    Square::new(2, 8),
    Square::new(6, 8),
    Square::new(7, 8),
];

/// Up, down, left, right
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A board coordinate, 0-based
///
/// Displayed as column letter plus 1-based row: `Square::new(0, 4)` is `e1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Self {
        Square { row, col }
    }

    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Returns the square `(dr, dc)` away, or `None` off the board
    pub fn offset(self, dr: isize, dc: isize) -> Option<Square> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let square = Square::new(row, col);
        square.is_on_board().then_some(square)
    }

    /// Returns the index of the camp containing this square
    pub fn camp(self) -> Option<usize> {
        CAMPS.iter().position(|camp| camp.contains(&self))
    }

    pub fn is_camp(self) -> bool {
        self.camp().is_some()
    }

    pub fn is_throne(self) -> bool {
        self == THRONE
    }

    pub fn is_escape(self) -> bool {
        ESCAPES.contains(&self)
    }

    /// Returns true for the four squares orthogonally next to the throne
    pub fn is_next_to_throne(self) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| THRONE.offset(dr, dc) == Some(self))
    }
}

impl fmt::Display for Square {
    /// Off-board squares print as raw `(row,col)` coordinates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({},{})", self.row, self.col);
        }
        let col = char::from(b'a' + self.col as u8);
        write!(f, "{}{}", col, self.row + 1)
    }
}

impl FromStr for Square {
    type Err = TablutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TablutParseError::InvalidSquare(s.to_string());

        let mut chars = s.trim().chars();
        let col = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        if !col.is_ascii_lowercase() {
            return Err(invalid());
        }
        let row: usize = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        let square = Square::new(row - 1, (col as u8 - b'a') as usize);
        if square.is_on_board() {
            Ok(square)
        } else {
            Err(invalid())
        }
    }
}

/// Contents of a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pawn {
    #[default]
    Empty,
    White,
    Black,
    King,
}

impl Pawn {
    /// Returns true for the defenders: white soldiers and the king
    pub fn is_white_side(self) -> bool {
        matches!(self, Pawn::White | Pawn::King)
    }
}

/// A 9x9 grid of pawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Pawn; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board with no pieces
    pub fn empty() -> Self {
        Board {
            cells: [[Pawn::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates the Ashton starting setup
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for square in CAMPS.iter().flatten() {
            board.set(*square, Pawn::Black);
        }
        for (row, col) in [(2, 4), (3, 4), (5, 4), (6, 4), (4, 2), (4, 3), (4, 5), (4, 6)] {
            board.set(Square::new(row, col), Pawn::White);
        }
        board.set(THRONE, Pawn::King);
        board
    }

    /// Returns the pawn on `square`
    ///
    /// # Panics
    ///
    /// Panics if the square is off the board.
    pub fn get(&self, square: Square) -> Pawn {
        self.cells[square.row][square.col]
    }

    pub fn set(&mut self, square: Square, pawn: Pawn) {
        self.cells[square.row][square.col] = pawn;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square) == Pawn::Empty
    }

    /// Iterates over every occupied square with its pawn, row by row
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Pawn)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
            .map(|square| (square, self.get(square)))
            .filter(|(_, pawn)| *pawn != Pawn::Empty)
    }

    /// Returns where the king stands, if it is still on the board
    pub fn king(&self) -> Option<Square> {
        self.pieces()
            .find(|(_, pawn)| *pawn == Pawn::King)
            .map(|(square, _)| square)
    }

    pub fn count(&self, pawn: Pawn) -> usize {
        self.pieces().filter(|(_, p)| *p == pawn).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = Square::new(row, col);
                let c = match self.get(square) {
                    Pawn::Empty if square.is_throne() => 'T',
                    Pawn::Empty => 'O',
                    Pawn::White => 'W',
                    Pawn::Black => 'B',
                    Pawn::King => 'K',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = TablutParseError;

    /// Parses nine lines of nine cells: `O` or `T` empty, `W`, `B`, `K`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(TablutParseError::InvalidBoard(format!(
                "expected {} rows, found {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(TablutParseError::InvalidBoard(format!(
                    "row {} has {} cells",
                    row + 1,
                    cells.len()
                )));
            }
            for (col, c) in cells.into_iter().enumerate() {
                let pawn = match c.to_ascii_uppercase() {
                    'O' | 'T' | '.' => Pawn::Empty,
                    'W' => Pawn::White,
                    'B' => Pawn::Black,
                    'K' => Pawn::King,
                    other => {
                        return Err(TablutParseError::InvalidBoard(format!(
                            "unknown cell '{}' at {}",
                            other,
                            Square::new(row, col)
                        )))
                    }
                };
                board.set(Square::new(row, col), pawn);
            }
        }
        Ok(board)
    }
}
