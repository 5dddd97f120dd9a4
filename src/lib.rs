//! Gobblet Jr. rule engine.
//!
//! Two players (blue and pink) each own six pieces: two small, two medium,
//! two large. Pieces start in six home slots per player beside the board and
//! are placed onto a 3x3 grid. A piece may be dropped on an empty cell or on
//! top of a strictly smaller piece of either color; equal size blocks. Only
//! the most recently placed piece in a cell is visible, and only visible
//! pieces count for covering and win checks. Three visible cells of one color
//! across a row, column, or diagonal win the game. If a single move completes
//! a line for both colors at once, the player who did NOT move wins.
//!
//! The engine is a synchronous state machine driven by a host loop: it holds
//! the authoritative piece list, validates selections and placements, tracks
//! the turn, and reports wins. It never draws, polls input, or blocks.
//! Illegal input is a silent no-op, not an error.
//!
//! ```text
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! Stacking is tracked with an arrival stamp per piece: every successful
//! placement takes the next value of a monotone counter, and the visible
//! occupant of a cell is the piece there with the greatest stamp.

pub mod layout;
#[cfg(feature = "wasm")]
pub mod wasm;

use serde::Serialize;

/// Number of pieces in a game (six per player).
pub const PIECE_COUNT: usize = 12;

/// Home slots per player: two rows of small/medium/large.
pub const HOME_SLOTS: u8 = 6;

/// Player identifier. `One` is the blue side and moves first; `Two` is pink.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Piece size.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Size {
    Small = 0,
    Medium = 1,
    Large = 2,
}

impl Size {
    /// Check if a piece of this size may be dropped on top of `other`.
    /// Equal size blocks, regardless of color.
    #[inline]
    pub fn covers(self, other: Size) -> bool {
        (self as u8) > (other as u8)
    }

    /// Convert from index (0, 1, 2) to Size.
    #[inline]
    pub fn from_index(idx: usize) -> Option<Size> {
        match idx {
            0 => Some(Size::Small),
            1 => Some(Size::Medium),
            2 => Some(Size::Large),
            _ => None,
        }
    }

    /// Get all sizes as an iterator.
    pub fn all() -> impl Iterator<Item = Size> {
        [Size::Small, Size::Medium, Size::Large].into_iter()
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

/// Stable piece identity (0-11). Player One owns ids 0-5, Player Two 6-11;
/// within each player the id order matches the home slot order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct PieceId(pub u8);

impl PieceId {
    /// Index into the piece list.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all 12 piece ids.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..PIECE_COUNT as u8).map(PieceId)
    }
}

/// Where a piece currently sits: an off-board home slot or a board cell.
///
/// Home slots are numbered 0-5 per player, two rows of three: `slot % 3`
/// gives the size column (small, medium, large) and `slot / 3` the row.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Location {
    Home { slot: u8 },
    Cell(Pos),
}

impl Location {
    /// The board cell, if the piece is on the board.
    #[inline]
    pub fn cell(self) -> Option<Pos> {
        match self {
            Location::Cell(pos) => Some(pos),
            Location::Home { .. } => None,
        }
    }

    /// Check if this is a home slot.
    #[inline]
    pub fn is_home(self) -> bool {
        matches!(self, Location::Home { .. })
    }
}

/// A single piece. The twelve pieces are created once per game, mutated in
/// place on every successful move, and rebuilt wholesale on reset.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub id: PieceId,
    pub player: Player,
    pub size: Size,
    pub location: Location,
    /// Placement stamp; greatest stamp in a cell marks the visible occupant.
    /// Zero until the piece first leaves its home slot.
    arrival: u32,
}

/// A held piece and the location it was picked up from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Selection {
    pub piece: PieceId,
    pub origin: Location,
}

/// Why a selection or placement was refused. Every rejection is a silent
/// no-op/revert; there is no fatal error path in the engine.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rejection {
    /// Wrong turn, covered piece, nothing (or something already) held,
    /// or the game is over.
    IllegalSelection,
    /// The target cell's visible occupant is the same size or larger.
    IllegalPlacement,
    /// The target is not a board cell.
    OutOfBounds,
}

/// Outcome of [`Game::attempt_placement`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Placement {
    /// The piece moved to the target cell. `winner` is set when this
    /// placement ended the game.
    Placed { winner: Option<Player> },
    /// The piece stayed where it was picked up and the selection was dropped.
    Reverted(Rejection),
}

/// Set of colors that currently complete a line, packed as a 2-bit mask
/// (bit 0 = Player One, bit 1 = Player Two).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Winners(u8);

impl Winners {
    pub const EMPTY: Winners = Winners(0);

    /// Add a color to the set.
    #[inline]
    pub fn insert(&mut self, player: Player) {
        self.0 |= 1 << (player as u8 - 1);
    }

    /// Check membership.
    #[inline]
    pub fn contains(self, player: Player) -> bool {
        self.0 & (1 << (player as u8 - 1)) != 0
    }

    /// Check if no color completes a line.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of colors in the set.
    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// The single member, if exactly one color completes a line.
    #[inline]
    pub fn sole(self) -> Option<Player> {
        match self.0 {
            0b01 => Some(Player::One),
            0b10 => Some(Player::Two),
            _ => None,
        }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Full game state: the authoritative piece list, the player to move, the
/// held piece (if any), and the terminal flag. Owned by the host loop and
/// driven one input event at a time.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    pieces: [Piece; PIECE_COUNT],
    turn: Player,
    selected: Option<Selection>,
    game_over: bool,
    winner: Option<Player>,
    next_arrival: u32,
}

impl Game {
    /// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
    const WIN_LINES: [[Pos; 3]; 8] = [
        [Pos(0), Pos(1), Pos(2)], // Row 0
        [Pos(3), Pos(4), Pos(5)], // Row 1
        [Pos(6), Pos(7), Pos(8)], // Row 2
        [Pos(0), Pos(3), Pos(6)], // Col 0
        [Pos(1), Pos(4), Pos(7)], // Col 1
        [Pos(2), Pos(5), Pos(8)], // Col 2
        [Pos(0), Pos(4), Pos(8)], // Main diagonal
        [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
    ];

    /// Create a new game: all twelve pieces in their home slots, Player One
    /// to move, nothing selected.
    pub fn new() -> Game {
        let mut pieces = [Piece {
            id: PieceId(0),
            player: Player::One,
            size: Size::Small,
            location: Location::Home { slot: 0 },
            arrival: 0,
        }; PIECE_COUNT];

        for (i, piece) in pieces.iter_mut().enumerate() {
            let slot = (i % HOME_SLOTS as usize) as u8;
            *piece = Piece {
                id: PieceId(i as u8),
                player: if i < HOME_SLOTS as usize {
                    Player::One
                } else {
                    Player::Two
                },
                size: match slot % 3 {
                    0 => Size::Small,
                    1 => Size::Medium,
                    _ => Size::Large,
                },
                location: Location::Home { slot },
                arrival: 0,
            };
        }

        Game {
            pieces,
            turn: Player::One,
            selected: None,
            game_over: false,
            winner: None,
            next_arrival: 1,
        }
    }

    /// All twelve pieces, indexed by [`PieceId`].
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Look up a piece by id.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// The player to move.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// The currently held piece, if any (for highlight rendering).
    #[inline]
    pub fn selected(&self) -> Option<Selection> {
        self.selected
    }

    /// Check if the game has ended. Terminal except for [`Game::reset`].
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winning color once the game is over.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    // ========== Visibility ==========

    /// The visible occupant of a cell: the piece there with the greatest
    /// arrival stamp. Returns None for an empty cell.
    pub fn top_piece(&self, pos: Pos) -> Option<PieceId> {
        self.pieces
            .iter()
            .filter(|p| p.location == Location::Cell(pos))
            .max_by_key(|p| p.arrival)
            .map(|p| p.id)
    }

    /// Whether a piece can currently be lifted: home slots are never
    /// covered; a board piece must be the visible occupant of its cell.
    pub fn is_visible(&self, id: PieceId) -> bool {
        match self.piece(id).location {
            Location::Home { .. } => true,
            Location::Cell(pos) => self.top_piece(pos) == Some(id),
        }
    }

    /// Visible color per cell, indexed by `Pos`.
    pub fn visible_grid(&self) -> [Option<Player>; 9] {
        let mut grid = [None; 9];
        for (i, cell) in grid.iter_mut().enumerate() {
            *cell = self
                .top_piece(Pos(i as u8))
                .map(|id| self.piece(id).player);
        }
        grid
    }

    // ========== Selection & Placement ==========

    /// Pick up a piece. Legal only while the game is running, with nothing
    /// already held, for a visible piece belonging to the player to move.
    /// Rejection leaves the state untouched.
    pub fn select_piece(&mut self, id: PieceId) -> Result<Selection, Rejection> {
        if self.game_over || self.selected.is_some() {
            return Err(Rejection::IllegalSelection);
        }
        let piece = self.piece(id);
        if piece.player != self.turn || !self.is_visible(id) {
            return Err(Rejection::IllegalSelection);
        }
        let selection = Selection {
            piece: id,
            origin: piece.location,
        };
        self.selected = Some(selection);
        Ok(selection)
    }

    /// Drop the held piece on `target` (`None` = outside the board).
    ///
    /// An illegal target reverts: the piece keeps its pre-pickup location
    /// and the turn does not change. A legal drop restamps the piece as the
    /// newest occupant of the cell, then either ends the game or passes the
    /// turn. The selection is cleared in every case.
    pub fn attempt_placement(&mut self, target: Option<Pos>) -> Placement {
        let selection = match self.selected.take() {
            Some(s) => s,
            None => return Placement::Reverted(Rejection::IllegalSelection),
        };
        let pos = match target {
            Some(pos) if pos.is_valid() => pos,
            _ => return Placement::Reverted(Rejection::OutOfBounds),
        };

        let size = self.piece(selection.piece).size;
        if let Some(top) = self.top_piece(pos) {
            // The held piece still tops its old stack, so dropping it back
            // onto its own cell lands here as well (equal size blocks).
            if !size.covers(self.piece(top).size) {
                return Placement::Reverted(Rejection::IllegalPlacement);
            }
        }

        let arrival = self.next_arrival;
        self.next_arrival += 1;
        let piece = &mut self.pieces[selection.piece.index()];
        piece.location = Location::Cell(pos);
        piece.arrival = arrival;

        let winners = self.winning_colors();
        if winners.is_empty() {
            self.turn = self.turn.opponent();
            Placement::Placed { winner: None }
        } else {
            // Mover loses ties: when one move completes a line for both
            // colors, the opponent of the player who moved takes the win.
            let winner = winners.sole().unwrap_or_else(|| self.turn.opponent());
            self.winner = Some(winner);
            self.game_over = true;
            Placement::Placed {
                winner: Some(winner),
            }
        }
    }

    // ========== Win Detection ==========

    /// Colors that currently complete a row, column, or diagonal of visible
    /// pieces. Usually empty or a single color; both at once is possible in
    /// pathological layouts and resolved by [`Game::attempt_placement`].
    pub fn winning_colors(&self) -> Winners {
        let grid = self.visible_grid();
        let mut winners = Winners::EMPTY;
        for line in &Self::WIN_LINES {
            if let Some(player) = grid[line[0].0 as usize] {
                if line.iter().all(|pos| grid[pos.0 as usize] == Some(player)) {
                    winners.insert(player);
                }
            }
        }
        winners
    }

    // ========== Reset ==========

    /// Rebuild the initial state: all pieces home, Player One to move.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    /// Restart-key entry point: resets only once the game has ended.
    /// Returns true if a reset happened.
    pub fn restart(&mut self) -> bool {
        if self.game_over {
            self.reset();
            true
        } else {
            false
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RENDER SNAPSHOT
// ============================================================================

/// Serializable piece view for a presentation layer.
/// `player` is 1 or 2, `size` 1 (small) to 3 (large).
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PieceView {
    pub id: u8,
    pub player: u8,
    pub size: u8,
    pub home_slot: Option<u8>,
    pub cell: Option<[u8; 2]>,
    pub visible: bool,
}

/// Serializable game view: everything a renderer needs per frame.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub pieces: Vec<PieceView>,
    pub turn: u8,
    pub selected: Option<u8>,
    pub game_over: bool,
    pub winner: Option<u8>,
}

impl Game {
    /// Build a render snapshot of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            pieces: self
                .pieces
                .iter()
                .map(|p| PieceView {
                    id: p.id.0,
                    player: p.player as u8,
                    size: p.size as u8 + 1,
                    home_slot: match p.location {
                        Location::Home { slot } => Some(slot),
                        Location::Cell(_) => None,
                    },
                    cell: p.location.cell().map(|pos| [pos.row(), pos.col()]),
                    visible: self.is_visible(p.id),
                })
                .collect(),
            turn: self.turn as u8,
            selected: self.selected.map(|s| s.piece.0),
            game_over: self.game_over,
            winner: self.winner.map(|p| p as u8),
        }
    }
}
