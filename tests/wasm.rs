#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::wasm_bindgen_test;

use othello::bindings::{
    current_state, engine_move, legal_moves, load_game, new_game, place, save_game,
};
use othello::wasm_ready;

#[wasm_bindgen_test]
fn ready_probe_reports_true() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn fresh_game_exposes_four_opening_moves() {
    new_game(2).expect("new game must start");
    let moves = legal_moves().expect("legal moves must serialize");

    assert!(js_sys::Array::is_array(&moves));
    assert_eq!(js_sys::Array::from(&moves).length(), 4);
}

#[wasm_bindgen_test]
fn human_move_then_engine_reply_updates_state() {
    new_game(2).expect("new game must start");
    place(2, 3).expect("d3 must be legal");
    engine_move().expect("engine must reply");

    let state = current_state().expect("state must serialize");
    assert!(state.is_object());
}

#[wasm_bindgen_test]
fn save_and_load_round_trip() {
    new_game(0).expect("new game must start");
    place(2, 3).expect("d3 must be legal");

    let bytes = save_game().expect("save must serialize");
    let state = load_game(&bytes).expect("load must restore the session");
    assert!(state.is_object());
}
