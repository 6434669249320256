//! Game state projector.
//!
//! Turns a [`GameSnapshot`] plus the local player id into a [`GameView`]:
//! what every cell shows, which cells the local player may click, and which
//! side is highlighted. Projection is pure and deterministic.

use derive_getters::Getters;
use reversi_protocol::{BOARD_SIZE, GameSnapshot, GameStatePlayer, Point, Token};
use tracing::{instrument, trace};

/// One rendered board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    /// Piece on the cell.
    pub token: Token,
    /// Whether the local player may play here now.
    pub selectable: bool,
}

/// Which side of the board is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Side {
    /// Player one.
    #[strum(serialize = "P1")]
    PlayerOne,
    /// Player two.
    #[strum(serialize = "P2")]
    PlayerTwo,
}

/// Score panel for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPanel {
    /// Player id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Token the player places.
    pub token: Token,
    /// Current score.
    pub score: i32,
    /// Whether this panel belongs to the local player.
    pub is_local: bool,
    /// Whether this player is to move.
    pub highlighted: bool,
}

/// Render-ready projection of a game snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameView {
    /// Cells indexed `[row][col]`.
    cells: [[CellView; BOARD_SIZE]; BOARD_SIZE],
    /// Side to move.
    highlighted: Side,
    /// Player one's panel.
    p1: PlayerPanel,
    /// Player two's panel.
    p2: PlayerPanel,
    /// Round counter.
    round: u32,
    /// Turn counter.
    turn: u32,
    /// Whether the local player is to move.
    is_local_turn: bool,
}

impl GameView {
    /// Cell under a point, `None` off the board.
    pub fn cell(&self, point: Point) -> Option<&CellView> {
        self.cells.get(point.row()).and_then(|row| row.get(point.col()))
    }

    /// Returns true if the local player may play `point` now.
    pub fn is_selectable(&self, point: Point) -> bool {
        self.cell(point).is_some_and(|cell| cell.selectable)
    }

    /// Selectable cells in row-major order.
    pub fn selectable_cells(&self) -> Vec<Point> {
        self.points().filter(|p| self.is_selectable(*p)).collect()
    }

    /// The local player's panel, if the local player is seated in this game.
    pub fn local_panel(&self) -> Option<&PlayerPanel> {
        [&self.p1, &self.p2].into_iter().find(|panel| panel.is_local)
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).filter_map(move |col| Point::at(row, col)))
    }
}

fn panel(side: &GameStatePlayer, snapshot: &GameSnapshot, local_player_id: &str) -> PlayerPanel {
    PlayerPanel {
        id: side.id.clone(),
        name: side.name.clone(),
        token: side.token,
        score: side.score,
        is_local: side.id == local_player_id,
        highlighted: side.id == snapshot.current_player_id,
    }
}

/// Projects a snapshot for the player `local_player_id`.
///
/// A cell is selectable only when the local player is to move and the point
/// is among that player's legal moves. Moves are looked up on the snapshot
/// side whose id is `currentPlayer`, not by p1/p2 position.
#[instrument(level = "trace", skip(snapshot), fields(current = %snapshot.current_player_id))]
pub fn project(snapshot: &GameSnapshot, local_player_id: &str) -> GameView {
    let is_local_turn = snapshot.current_player_id == local_player_id;

    let mut cells = [[CellView::default(); BOARD_SIZE]; BOARD_SIZE];
    for (row, tokens) in snapshot.board.rows().iter().enumerate() {
        for (col, token) in tokens.iter().enumerate() {
            cells[row][col].token = *token;
        }
    }

    let legal_moves = snapshot
        .current_player()
        .filter(|_| is_local_turn)
        .map(|current| current.legal_moves.as_slice())
        .unwrap_or_default();
    for point in legal_moves.iter().filter(|p| p.is_on_board()) {
        cells[point.row()][point.col()].selectable = true;
    }

    let highlighted = if snapshot.is_p1_turn() {
        Side::PlayerOne
    } else {
        Side::PlayerTwo
    };
    trace!(%highlighted, is_local_turn, "Snapshot projected");

    GameView {
        cells,
        highlighted,
        p1: panel(&snapshot.p1, snapshot, local_player_id),
        p2: panel(&snapshot.p2, snapshot, local_player_id),
        round: snapshot.round,
        turn: snapshot.turn,
        is_local_turn,
    }
}
