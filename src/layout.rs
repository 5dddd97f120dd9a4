//! Pixel geometry for the board and home rows.
//!
//! The engine itself is coordinate-free; this module carries the classic
//! desktop layout (615x700 window, 300 px board centered, 100 px cells,
//! home rows anchored to the bottom corners) and converts raw pointer
//! coordinates into piece and cell references. A host loop feeds
//! [`Layout::pointer_down`] and draws from the engine's state; nothing here
//! renders or polls input.

use crate::{Game, Location, Piece, PieceId, Placement, Player, Pos, Size, HOME_SLOTS};

impl Size {
    /// On-screen radius of a piece of this size, in pixels.
    #[inline]
    pub fn radius(self) -> f32 {
        match self {
            Size::Small => 10.0,
            Size::Medium => 20.0,
            Size::Large => 30.0,
        }
    }
}

/// Board and home-row geometry, derived from the window dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub window_width: f32,
    pub window_height: f32,
    pub grid_size: f32,
    pub grid_x: f32,
    pub grid_y: f32,
    pub cell_size: f32,
    spacing_x: f32,
    left_x: f32,
    right_x: f32,
    row1_y: f32,
    row2_y: f32,
}

impl Layout {
    /// The classic 615x700 window layout.
    pub fn new() -> Layout {
        Layout::with_window(615.0, 700.0)
    }

    /// Derive the geometry from a window size: a 300 px grid centered in the
    /// window, Player One's home rows to the lower left, Player Two's
    /// mirrored on the lower right.
    pub fn with_window(width: f32, height: f32) -> Layout {
        let grid_size = 300.0;
        let grid_x = ((width - grid_size) / 2.0).floor();
        let grid_y = ((height - grid_size) / 2.0).floor();
        let spacing_x = Size::Large.radius() * 2.0;
        let spacing_y = Size::Large.radius() * 1.5;
        let row2_y = height - Size::Large.radius() - 20.0;
        Layout {
            window_width: width,
            window_height: height,
            grid_size,
            grid_x,
            grid_y,
            cell_size: grid_size / 3.0,
            spacing_x,
            left_x: grid_x - spacing_x * 2.0,
            right_x: grid_x + grid_size + spacing_x * 2.0,
            row1_y: row2_y - spacing_y * 1.5,
            row2_y,
        }
    }

    /// Center of a board cell.
    pub fn cell_center(&self, pos: Pos) -> (f32, f32) {
        (
            self.grid_x + pos.col() as f32 * self.cell_size + self.cell_size / 2.0,
            self.grid_y + pos.row() as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    /// Snap a point to the board cell under it, if any. Points on the grid
    /// border count as inside, clamped to the edge cells.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Pos> {
        if x < self.grid_x
            || x > self.grid_x + self.grid_size
            || y < self.grid_y
            || y > self.grid_y + self.grid_size
        {
            return None;
        }
        let col = (((x - self.grid_x) / self.cell_size) as u8).min(2);
        let row = (((y - self.grid_y) / self.cell_size) as u8).min(2);
        Some(Pos::from_row_col(row, col))
    }

    /// Center of a home slot. `slot % 3` picks the size column (small,
    /// medium, large, counted from the window edge inward; mediums nudged
    /// 12 px toward the board), `slot / 3` the row.
    pub fn home_center(&self, player: Player, slot: u8) -> (f32, f32) {
        debug_assert!(slot < HOME_SLOTS);
        let y = if slot / 3 == 0 { self.row1_y } else { self.row2_y };
        let x = match (player, slot % 3) {
            (Player::One, 0) => self.left_x,
            (Player::One, 1) => self.left_x + self.spacing_x - 12.0,
            (Player::One, _) => self.left_x + self.spacing_x * 2.0,
            (Player::Two, 0) => self.right_x,
            (Player::Two, 1) => self.right_x - self.spacing_x + 12.0,
            (Player::Two, _) => self.right_x - self.spacing_x * 2.0,
        };
        (x, y)
    }

    /// Current on-screen center of a piece.
    pub fn piece_center(&self, piece: &Piece) -> (f32, f32) {
        match piece.location {
            Location::Home { slot } => self.home_center(piece.player, slot),
            Location::Cell(pos) => self.cell_center(pos),
        }
    }

    /// The visible piece whose circular hitbox contains the point, if any.
    /// Covered pieces never hit; visible hitboxes are disjoint in this
    /// layout, so at most one piece can match.
    pub fn piece_at(&self, game: &Game, x: f32, y: f32) -> Option<PieceId> {
        game.pieces()
            .iter()
            .find(|piece| {
                if !game.is_visible(piece.id) {
                    return false;
                }
                let (px, py) = self.piece_center(piece);
                let r = piece.size.radius();
                (x - px).powi(2) + (y - py).powi(2) <= r * r
            })
            .map(|p| p.id)
    }

    /// Dispatch a raw pointer-down event: pick up a piece when empty-handed,
    /// drop the held piece otherwise. Input is ignored entirely while the
    /// game is over; the restart key is the only way out (see
    /// [`Game::restart`]).
    pub fn pointer_down(&self, game: &mut Game, x: f32, y: f32) -> PointerEvent {
        if game.is_game_over() {
            return PointerEvent::Ignored;
        }
        if game.selected().is_none() {
            match self.piece_at(game, x, y) {
                Some(id) => match game.select_piece(id) {
                    Ok(selection) => PointerEvent::Selected(selection.piece),
                    // Wrong color under the pointer: silently ignored.
                    Err(_) => PointerEvent::Ignored,
                },
                None => PointerEvent::Ignored,
            }
        } else {
            PointerEvent::Dropped(game.attempt_placement(self.cell_at(x, y)))
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

/// What a pointer-down event did to the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerEvent {
    /// Nothing under the pointer, an illegal pick, or the game is over.
    Ignored,
    /// A piece was picked up.
    Selected(PieceId),
    /// The held piece was dropped; see the placement outcome.
    Dropped(Placement),
}
