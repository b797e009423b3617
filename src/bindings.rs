//! WebAssembly entry points. This layer plays the external caller: it
//! owns the single live session and drives the engine on behalf of the
//! browser UI. No other module carries global state.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use crate::error::EngineError;
use crate::game::GameSession;
use crate::snapshot::GameSnapshot;
use crate::types::Side;

static SESSION: Lazy<Mutex<Option<GameSession>>> = Lazy::new(|| Mutex::new(None));

fn with_session<T>(f: impl FnOnce(&mut GameSession) -> Result<T, JsValue>) -> Result<T, JsValue> {
    let mut slot = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("session lock poisoned"))?;
    let session = slot
        .as_mut()
        .ok_or_else(|| JsValue::from_str("no game in progress"))?;
    f(session)
}

fn install_session(session: GameSession) -> Result<JsValue, JsValue> {
    let state = state_value(&session)?;
    let mut slot = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("session lock poisoned"))?;
    *slot = Some(session);
    Ok(state)
}

fn engine_err(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn state_value(session: &GameSession) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&session.to_game_state()).map_err(JsValue::from)
}

/// Starts a new game and returns its initial state.
/// `engine_side_code` is 0 for two human players, otherwise the 1/2 side
/// code the engine plays.
#[wasm_bindgen]
pub fn new_game(engine_side_code: u8) -> Result<JsValue, JsValue> {
    let engine_side = match engine_side_code {
        0 => None,
        code => Some(Side::from_code(code).map_err(engine_err)?),
    };
    install_session(GameSession::with_default_selector(engine_side))
}

/// Legal targets for the side to move, as an array of `{row, col}`.
#[wasm_bindgen]
pub fn legal_moves() -> Result<JsValue, JsValue> {
    with_session(|session| {
        serde_wasm_bindgen::to_value(&session.legal_moves_for_current()).map_err(JsValue::from)
    })
}

/// Plays a human move and returns the refreshed state.
#[wasm_bindgen]
pub fn place(row: u8, col: u8) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.place(row, col).map_err(engine_err)?;
        state_value(session)
    })
}

/// Plays the engine's move and returns the refreshed state.
#[wasm_bindgen]
pub fn engine_move() -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.engine_move().map_err(engine_err)?;
        state_value(session)
    })
}

/// Records a pass for the side to move.
#[wasm_bindgen]
pub fn pass_turn() -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.pass();
        state_value(session)
    })
}

#[wasm_bindgen]
pub fn current_state() -> Result<JsValue, JsValue> {
    with_session(|session| state_value(session))
}

#[wasm_bindgen]
pub fn game_result() -> Result<JsValue, JsValue> {
    with_session(|session| {
        serde_wasm_bindgen::to_value(&session.to_game_result()).map_err(JsValue::from)
    })
}

/// Serializes the live session into a saved-game blob.
#[wasm_bindgen]
pub fn save_game() -> Result<Vec<u8>, JsValue> {
    with_session(|session| Ok(session.to_snapshot().to_bytes()))
}

/// Replaces the live session with one restored from a saved-game blob.
#[wasm_bindgen]
pub fn load_game(data: &[u8]) -> Result<JsValue, JsValue> {
    let snapshot =
        GameSnapshot::from_bytes(data).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let session = GameSession::from_snapshot(&snapshot).map_err(engine_err)?;
    install_session(session)
}
