//! WebAssembly bindings over the game and search API.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::ai::{SearchEngine, SearchParams};
use crate::game::{GameState, Opening};
use crate::logging::Logger;
use crate::types::{Color, Token};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// A game between a human (Black) and the engine (White).
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    engine: SearchEngine,
    depth: u32,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(depth: u32, seed: u64) -> WasmGame {
        Self {
            state: GameState::new(Opening::Standard),
            engine: SearchEngine::seeded(Logger::disabled(), seed),
            depth,
        }
    }

    /// Human move. Returns the flipped tokens; an empty list means rejected,
    /// including when it is not Black's turn or the game is over.
    pub fn place(&mut self, x: i32, y: i32) -> Result<JsValue, JsError> {
        let flips = self.play(x, y, Color::Black);
        to_js(&flips)
    }

    /// Engine move. Returns the chosen token, or `null` when it must pass,
    /// it is not White's turn, or the game is over.
    pub fn ai_move(&mut self, budget_ms: u32) -> Result<JsValue, JsError> {
        match self.engine_move(Duration::from_millis(budget_ms.into())) {
            Some(chosen) => to_js(&chosen),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn pass(&mut self) {
        self.state = self.state.pass();
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.state.allowed_moves(self.state.current_player()))
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.state.view())
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.state.result())
    }
}

impl WasmGame {
    pub fn game(&self) -> &GameState {
        &self.state
    }

    fn may_move(&self, color: Color) -> bool {
        self.state.current_player() == color && !self.state.is_end_game()
    }

    fn play(&mut self, x: i32, y: i32, color: Color) -> Vec<Token> {
        if !self.may_move(color) {
            return Vec::new();
        }
        let (next, flips) = self.state.apply_move(x, y, color);
        if !flips.is_empty() {
            self.state = next;
        }
        flips
    }

    fn engine_move(&mut self, time_budget: Duration) -> Option<Token> {
        if !self.may_move(Color::White) {
            return None;
        }
        let params = SearchParams {
            depth: self.depth,
            time_budget,
            ..SearchParams::default()
        };
        let chosen = self
            .engine
            .search(&self.state, Color::White, &params)
            .best_move?;
        self.play(chosen.x, chosen.y, Color::White);
        Some(chosen)
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
