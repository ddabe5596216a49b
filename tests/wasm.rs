#![cfg(target_arch = "wasm32")]

use js_sys::Array;
use othello::wasm::{WasmGame, wasm_ready};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn bindings_are_ready() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn rejected_move_returns_empty_list() {
    let mut game = WasmGame::new(1, 3);

    let flips = Array::from(&game.place(0, 0).unwrap());

    assert_eq!(flips.length(), 0);
}

#[wasm_bindgen_test]
fn opening_offers_four_moves_and_engine_answers() {
    let mut game = WasmGame::new(1, 3);

    assert_eq!(Array::from(&game.legal_moves().unwrap()).length(), 4);
    assert_eq!(Array::from(&game.place(4, 2).unwrap()).length(), 1);
    assert!(game.ai_move(100).unwrap().is_object());
}

#[wasm_bindgen_test]
fn engine_waits_for_its_turn() {
    let mut game = WasmGame::new(1, 3);

    assert!(game.ai_move(100).unwrap().is_null());
    assert_eq!(Array::from(&game.place(4, 2).unwrap()).length(), 1);
    assert_eq!(Array::from(&game.place(2, 5).unwrap()).length(), 0);
}
