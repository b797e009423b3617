//! Error types for board operations, the game session, and the
//! saved-game codec.

use thiserror::Error;

use crate::types::Side;

/// Errors raised by the rules engine and the game session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The move is not currently legal on this board: stale move, wrong
    /// target, or no valid flip direction.
    #[error("invalid move at ({row}, {col})")]
    InvalidMove { row: u8, col: u8 },

    /// A selection was requested for a side that must pass instead.
    #[error("no legal move for {side}")]
    NoLegalMove { side: Side },

    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: u8 },

    #[error("invalid side code: {code}")]
    InvalidSideCode { code: u8 },

    #[error("game is already over")]
    GameOver,

    #[error("it is not {side}'s turn")]
    OutOfTurn { side: Side },

    #[error("session has no engine player")]
    NoEnginePlayer,
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while decoding a saved-game snapshot.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot data too short: expected at least {expected} bytes, got {got}")]
    TooShort { expected: usize, got: usize },

    #[error("invalid snapshot magic (expected OSAV)")]
    BadMagic,

    #[error("unsupported snapshot version: expected {expected}, got {got}")]
    UnsupportedVersion { expected: u32, got: u32 },

    #[error("snapshot payload length mismatch: expected {expected} bytes, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("CRC32 mismatch: expected {expected:#010x}, got {got:#010x}")]
    CrcMismatch { expected: u32, got: u32 },

    #[error("invalid side code: {code}")]
    InvalidSideCode { code: u8 },

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: u8 },
}
