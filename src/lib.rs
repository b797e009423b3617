use wasm_bindgen::prelude::*;

pub mod ai;
pub mod bindings;
pub mod board;
pub mod error;
pub mod game;
pub mod snapshot;
pub mod types;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
