//! Core data model shared by the codec and the client engine.
//!
//! Coordinates follow a single convention end to end: `x` indexes columns and
//! `y` indexes rows. A board lookup is always `board[y][x]`, and a [`Point`]
//! is never transposed between the wire and the view.

use serde::{Deserialize, Deserializer, Serialize};

/// Board edge length. The board is always `BOARD_SIZE × BOARD_SIZE`.
pub const BOARD_SIZE: usize = 8;

/// Number of players that fill a room.
pub const ROOM_CAPACITY: u8 = 2;

/// Server-assigned player identifier.
pub type PlayerId = String;

/// Server-assigned room identifier (the wire calls it `roomUUID`).
pub type RoomId = String;

/// Treats an explicit `null` the same as an absent list.
///
/// The server marshals empty slices as `null`, so every list field goes
/// through here.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Identifier assigned by the server at registration.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
}

/// A room as advertised by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique key.
    #[serde(rename = "roomUUID")]
    pub room_uuid: RoomId,
    /// Display name.
    pub name: String,
    /// Number of players currently seated, in `0..=ROOM_CAPACITY`.
    pub count: u8,
}

impl Room {
    /// Returns true when no further player can join.
    pub fn is_full(&self) -> bool {
        self.count >= ROOM_CAPACITY
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.count > ROOM_CAPACITY {
            return Err(format!(
                "room {} reports {} players (capacity {})",
                self.room_uuid, self.count, ROOM_CAPACITY
            ));
        }
        Ok(())
    }
}

/// A board coordinate: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Column index.
    pub x: u8,
    /// Row index.
    pub y: u8,
}

impl Point {
    /// Creates a point from a column and a row.
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Creates a point from board position `(row, col)`.
    pub fn at(row: usize, col: usize) -> Option<Self> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }
        Some(Self {
            x: col as u8,
            y: row as u8,
        })
    }

    /// Row index (`y`).
    pub fn row(self) -> usize {
        self.y as usize
    }

    /// Column index (`x`).
    pub fn col(self) -> usize {
        self.x as usize
    }

    /// Returns true if the point lies on the board.
    pub fn is_on_board(self) -> bool {
        self.row() < BOARD_SIZE && self.col() < BOARD_SIZE
    }

    /// Algebraic notation: column letter then 1-based row, e.g. `d3`.
    pub fn notation(self) -> Option<String> {
        if !self.is_on_board() {
            return None;
        }
        Some(format!("{}{}", (b'a' + self.x) as char, self.y + 1))
    }

    /// Parses algebraic notation (`a1`..`h8`).
    pub fn from_notation(notation: &str) -> Option<Self> {
        let bytes = notation.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = bytes[0].to_ascii_lowercase().checked_sub(b'a')?;
        let row = bytes[1].checked_sub(b'1')?;
        Self::at(row as usize, col as usize)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.notation() {
            Some(notation) => f.write_str(&notation),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Content of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Token {
    /// No piece.
    #[default]
    Empty,
    /// Player one's piece.
    Black,
    /// Player two's piece.
    White,
}

impl TryFrom<u8> for Token {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Token::Empty),
            1 => Ok(Token::Black),
            2 => Ok(Token::White),
            other => Err(format!("unknown token value {}", other)),
        }
    }
}

impl From<Token> for u8 {
    fn from(token: Token) -> Self {
        match token {
            Token::Empty => 0,
            Token::Black => 1,
            Token::White => 2,
        }
    }
}

/// The 8×8 board, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    cells: [[Token; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn empty() -> Self {
        Self {
            cells: [[Token::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Token at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<Token> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Token under a point (`board[y][x]`).
    pub fn token_at(&self, point: Point) -> Option<Token> {
        self.get(point.row(), point.col())
    }

    /// Places a token, returning false if the point is off the board.
    pub fn set(&mut self, point: Point, token: Token) -> bool {
        if !point.is_on_board() {
            return false;
        }
        self.cells[point.row()][point.col()] = token;
        true
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[[Token; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = String;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE {
            return Err(format!(
                "board has {} rows, expected {}",
                rows.len(),
                BOARD_SIZE
            ));
        }
        let mut board = Board::empty();
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(format!(
                    "board row {} has {} cells, expected {}",
                    row_index,
                    row.len(),
                    BOARD_SIZE
                ));
            }
            for (col_index, value) in row.into_iter().enumerate() {
                board.cells[row_index][col_index] = Token::try_from(value)?;
            }
        }
        Ok(board)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        board
            .cells
            .iter()
            .map(|row| row.iter().map(|token| u8::from(*token)).collect())
            .collect()
    }
}

/// One side of a game snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatePlayer {
    /// Player identifier.
    pub id: PlayerId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Token this player places.
    #[serde(default)]
    pub token: Token,
    /// Current score.
    #[serde(default)]
    pub score: i32,
    /// Moves the server allows this player, in server order.
    ///
    /// Absent or `null` both mean no moves.
    #[serde(
        rename = "possibleMoves",
        alias = "legalMoves",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub legal_moves: Vec<Point>,
}

/// Authoritative game state pushed by the server.
///
/// Always a full replacement of any earlier snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// First player (black).
    pub p1: GameStatePlayer,
    /// Second player (white).
    pub p2: GameStatePlayer,
    /// Round counter.
    #[serde(default)]
    pub round: u32,
    /// Turn counter within the round.
    #[serde(default)]
    pub turn: u32,
    /// Identifier of the player to move.
    #[serde(rename = "currentPlayer")]
    pub current_player_id: PlayerId,
    /// Board contents.
    pub board: Board,
}

impl GameSnapshot {
    /// Returns the side with the given id.
    pub fn player(&self, id: &str) -> Option<&GameStatePlayer> {
        [&self.p1, &self.p2].into_iter().find(|p| p.id == id)
    }

    /// Returns the side to move.
    pub fn current_player(&self) -> Option<&GameStatePlayer> {
        self.player(&self.current_player_id)
    }

    /// Returns true if player one is to move.
    pub fn is_p1_turn(&self) -> bool {
        self.current_player_id == self.p1.id
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.current_player_id != self.p1.id && self.current_player_id != self.p2.id {
            return Err(format!(
                "current player {} is neither {} nor {}",
                self.current_player_id, self.p1.id, self.p2.id
            ));
        }
        for side in [&self.p1, &self.p2] {
            if let Some(point) = side.legal_moves.iter().find(|p| !p.is_on_board()) {
                return Err(format!(
                    "player {} has off-board move ({}, {})",
                    side.id, point.x, point.y
                ));
            }
        }
        Ok(())
    }
}
