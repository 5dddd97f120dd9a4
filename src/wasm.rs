//! WASM bindings for gobblet-jr
//!
//! Provides a JavaScript-friendly API for the game logic.

use wasm_bindgen::prelude::*;

use crate::layout::{Layout, PointerEvent};
use crate::{Game, PieceId, Placement, Player, Pos, PIECE_COUNT};

/// WASM-friendly wrapper around Game plus the default window layout.
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
    layout: Layout,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game with the classic 615x700 layout.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            inner: Game::new(),
            layout: Layout::new(),
        }
    }

    /// Current player (1 or 2)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.turn() as u8
    }

    /// Winner. Returns 0 (none), 1 (P1), or 2 (P2)
    pub fn winner(&self) -> u8 {
        match self.inner.winner() {
            None => 0,
            Some(Player::One) => 1,
            Some(Player::Two) => 2,
        }
    }

    /// Check if the game has ended.
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    /// Currently held piece id, or 255 when empty-handed.
    #[wasm_bindgen(js_name = selectedPiece)]
    pub fn selected_piece(&self) -> u8 {
        self.inner.selected().map(|s| s.piece.0).unwrap_or(255)
    }

    /// Feed a pointer-down at window coordinates.
    /// Returns "ignored", "selected", "placed", or "reverted".
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> String {
        match self.layout.pointer_down(&mut self.inner, x, y) {
            PointerEvent::Ignored => "ignored".to_string(),
            PointerEvent::Selected(_) => "selected".to_string(),
            PointerEvent::Dropped(Placement::Placed { .. }) => "placed".to_string(),
            PointerEvent::Dropped(Placement::Reverted(_)) => "reverted".to_string(),
        }
    }

    /// Pick up a piece by id. Returns true if the selection was accepted.
    #[wasm_bindgen(js_name = selectPiece)]
    pub fn select_piece(&mut self, id: u8) -> bool {
        if (id as usize) >= PIECE_COUNT {
            return false;
        }
        self.inner.select_piece(PieceId(id)).is_ok()
    }

    /// Drop the held piece on a cell. Returns true if the piece moved.
    #[wasm_bindgen(js_name = placeAt)]
    pub fn place_at(&mut self, row: u8, col: u8) -> bool {
        if row > 2 || col > 2 {
            return false;
        }
        matches!(
            self.inner.attempt_placement(Some(Pos::from_row_col(row, col))),
            Placement::Placed { .. }
        )
    }

    /// Drop the held piece outside the board (revert).
    #[wasm_bindgen(js_name = dropOutside)]
    pub fn drop_outside(&mut self) {
        self.inner.attempt_placement(None);
    }

    /// Restart after game over. Returns true if a reset happened.
    pub fn restart(&mut self) -> bool {
        self.inner.restart()
    }

    /// Reset unconditionally.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Full render state as a JS object (see `GameSnapshot`).
    pub fn state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
