//! Core domain types for tic-tac-toe.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::position::Position;

/// Character used for a blank cell in the string form of a board.
pub const BLANK: char = '-';

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum Mark {
    /// Mark X.
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Character used for this mark in the string form of a board.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => BLANK,
            Cell::Occupied(mark) => mark.symbol(),
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        if c == BLANK {
            Some(Cell::Empty)
        } else {
            Mark::from_symbol(c).map(Cell::Occupied)
        }
    }
}

/// Why a board string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The board does not have exactly nine cells.
    #[display("board must have 9 cells, found {found}")]
    WrongLength {
        /// Number of characters received.
        found: usize,
    },
    /// A cell holds something other than `X`, `O` or `-`.
    #[display("illegal character {found:?} at index {index}")]
    IllegalCharacter {
        /// Offending character.
        found: char,
        /// Cell index of the offending character.
        index: usize,
    },
    /// A new board may hold at most one mark.
    #[display("a new board may hold at most one mark, found {found}")]
    TooManyMarks {
        /// Number of marks on the board.
        found: usize,
    },
}

/// 3x3 tic-tac-toe board.
///
/// Serialized as a nine character string in row-major order, e.g. `"X---O----"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Checks if the cell at `pos` is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of marks placed on the board.
    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells
            .iter()
            .try_for_each(|cell| write!(f, "{}", cell.symbol()))
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.chars().count();
        if found != 9 {
            return Err(BoardError::WrongLength { found });
        }

        let mut cells = [Cell::Empty; 9];
        for (index, c) in s.chars().enumerate() {
            cells[index] =
                Cell::from_symbol(c).ok_or(BoardError::IllegalCharacter { found: c, index })?;
        }
        Ok(Self { cells })
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Status of a game.
///
/// `Running` is the only status from which further moves are accepted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum GameStatus {
    /// Game is ongoing.
    #[serde(rename = "RUNNING")]
    #[strum(serialize = "RUNNING")]
    Running,
    /// X has three in a row.
    #[serde(rename = "X_WON")]
    #[strum(serialize = "X_WON")]
    XWon,
    /// O has three in a row.
    #[serde(rename = "O_WON")]
    #[strum(serialize = "O_WON")]
    OWon,
    /// Board is full with no winner.
    #[serde(rename = "DRAW")]
    #[strum(serialize = "DRAW")]
    Draw,
}

impl GameStatus {
    /// Status for a win by `mark`.
    pub fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::X => GameStatus::XWon,
            Mark::O => GameStatus::OWon,
        }
    }

    /// Returns true once the game can no longer change.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Running
    }
}

/// A persisted game.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_new::new)]
pub struct Game {
    /// Opaque identifier assigned by the store.
    id: String,
    /// Current board.
    board: Board,
    /// Current status.
    status: GameStatus,
    /// Mark played by the computer, fixed at creation.
    computer_mark: Mark,
}

impl Game {
    /// Mark played by the human opponent.
    pub fn human_mark(&self) -> Mark {
        self.computer_mark.opponent()
    }

    /// Returns a copy of this game with a new board and status.
    ///
    /// The id and computer mark are carried over unchanged.
    pub fn advance(&self, board: Board, status: GameStatus) -> Self {
        Self {
            id: self.id.clone(),
            board,
            status,
            computer_mark: self.computer_mark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_display_matches_parse_input() {
        let board: Board = "X---O---X".parse().unwrap();
        assert_eq!(board.to_string(), "X---O---X");
        assert_eq!(board.get(Position::Center), Cell::Occupied(Mark::O));
        assert_eq!(board.mark_count(), 3);
    }

    #[test]
    fn test_board_rejects_lowercase() {
        let err = "x--------".parse::<Board>().unwrap_err();
        assert_eq!(err, BoardError::IllegalCharacter { found: 'x', index: 0 });
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(GameStatus::XWon.to_string(), "X_WON");
        assert_eq!("DRAW".parse::<GameStatus>().unwrap(), GameStatus::Draw);
        assert_eq!(
            serde_json::to_string(&GameStatus::Running).unwrap(),
            "\"RUNNING\""
        );
    }

    #[test]
    fn test_mark_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
        assert_eq!("O".parse::<Mark>().unwrap(), Mark::O);
    }
}
