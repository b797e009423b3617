use crate::ai::NetGainSelector;
use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::snapshot::GameSnapshot;
use crate::types::{GameResult, GameState, Move, Position, Side};

const BOARD_WIDTH: usize = 8;

/// Pluggable engine policy. The session re-validates whatever a selector
/// returns before playing it.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side) -> Option<Move>;
}

/// Per-game driver state: whose turn it is, which side (if any) the
/// engine plays, and how the previous action changed the board.
pub struct GameSession {
    board: Board,
    pub current: Side,
    engine_side: Option<Side>,
    consecutive_passes: u8,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<u8>,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    /// Starts a fresh game on the standard center setup, Dark to move.
    /// `engine_side` of `None` is a two-human-player session.
    pub fn new(engine_side: Option<Side>, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            current: Side::Dark,
            engine_side,
            consecutive_passes: 0,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            selector,
        }
    }

    pub fn with_default_selector(engine_side: Option<Side>) -> Self {
        Self::new(engine_side, Box::new(NetGainSelector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine_side(&self) -> Option<Side> {
        self.engine_side
    }

    /// Plays a human move for the current side.
    pub fn place(&mut self, row: u8, col: u8) -> EngineResult<()> {
        if self.is_game_over {
            return Err(EngineError::GameOver);
        }
        if self.engine_side == Some(self.current) {
            return Err(EngineError::OutOfTurn { side: self.current });
        }
        if row as usize >= BOARD_WIDTH || col as usize >= BOARD_WIDTH {
            return Err(EngineError::OutOfRange { row, col });
        }

        let mv = self
            .board
            .legal_moves(self.current)
            .into_iter()
            .find(|mv| mv.target.row == row && mv.target.col == col)
            .ok_or(EngineError::InvalidMove { row, col })?;
        self.apply(&mv)
    }

    /// Asks the configured selector for the engine's move and plays it.
    pub fn engine_move(&mut self) -> EngineResult<()> {
        if self.is_game_over {
            return Err(EngineError::GameOver);
        }
        let engine = self.engine_side.ok_or(EngineError::NoEnginePlayer)?;
        if engine != self.current {
            return Err(EngineError::OutOfTurn { side: self.current });
        }
        if !self.board.has_legal_move(engine) {
            return Err(EngineError::NoLegalMove { side: engine });
        }

        let mv = self
            .selector
            .select_move(&self.board, engine)
            .ok_or(EngineError::NoLegalMove { side: engine })?;
        let is_legal_target = self
            .board
            .legal_moves(engine)
            .iter()
            .any(|legal| legal.target == mv.target);
        if !is_legal_target {
            return Err(EngineError::InvalidMove {
                row: mv.target.row,
                col: mv.target.col,
            });
        }
        self.apply(&mv)
    }

    /// Records a forced skip for the current side. The second consecutive
    /// pass ends the game.
    pub fn pass(&mut self) {
        self.is_pass = true;
        self.flipped.clear();
        self.consecutive_passes += 1;
        self.current = self.current.opponent();
        if self.consecutive_passes >= 2 {
            self.is_game_over = true;
        }
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.board.has_legal_move(self.current)
    }

    /// Targets the current side may play, for rendering and input gating.
    pub fn legal_moves_for_current(&self) -> Vec<Position> {
        self.board
            .legal_moves(self.current)
            .into_iter()
            .map(|mv| mv.target)
            .collect()
    }

    pub fn to_game_state(&self) -> GameState {
        let (dark_count, light_count) = self.board.count();
        GameState {
            board: self.board.to_cells().to_vec(),
            current_player: self.current.code(),
            dark_count,
            light_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (dark_count, light_count) = self.board.count();
        GameResult {
            winner: if dark_count > light_count {
                Side::Dark.code()
            } else if light_count > dark_count {
                Side::Light.code()
            } else {
                0
            },
            dark_count,
            light_count,
        }
    }

    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            engine_side: self.engine_side,
            current: self.current,
            cells: self.board.to_cells(),
        }
    }

    /// Rebuilds a session from a saved snapshot with the default
    /// selector. The pass counter restarts at zero.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> EngineResult<Self> {
        let board = Board::from_cells(&snapshot.cells)?;
        Ok(Self {
            board,
            current: snapshot.current,
            engine_side: snapshot.engine_side,
            consecutive_passes: 0,
            is_game_over: board.is_full(),
            is_pass: false,
            flipped: Vec::new(),
            selector: Box::new(NetGainSelector),
        })
    }

    fn apply(&mut self, mv: &Move) -> EngineResult<()> {
        self.board.apply_move(mv, self.current)?;

        self.is_pass = false;
        self.consecutive_passes = 0;
        self.flipped = mv
            .flipped_cells()
            .into_iter()
            .map(Position::index)
            .collect();
        self.current = self.current.opponent();

        if self.board.is_full() {
            self.is_game_over = true;
        }
        Ok(())
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current: Side) {
        self.board = board;
        self.current = current;
        self.is_game_over = false;
        self.is_pass = false;
        self.consecutive_passes = 0;
        self.flipped.clear();
    }
}
