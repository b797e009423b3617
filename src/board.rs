use crate::error::{EngineError, EngineResult};
use crate::types::{FlipRun, Move, Position, Side};

const BOARD_SIZE: usize = 8;
const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Capture directions in fixed clockwise order starting north. Move and
/// run ordering depends on this order staying fixed.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

const CORNERS: [(u8, u8); 4] = [(0, 0), (0, 7), (7, 0), (7, 7)];

/// Othello board state represented by two bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    dark: u64,
    light: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=light, e4=dark, d5=dark, e5=light.
    pub fn new() -> Self {
        Self {
            dark: bit(28) | bit(35),
            light: bit(27) | bit(36),
        }
    }

    /// Builds a board directly from bitboards. Masks must not overlap.
    pub fn from_bitboards(dark: u64, light: u64) -> Self {
        Self { dark, light }
    }

    /// Decodes a row-major cell array where 0=empty, 1=dark, 2=light.
    pub fn from_cells(cells: &[u8; NUM_CELLS]) -> EngineResult<Self> {
        let mut dark = 0u64;
        let mut light = 0u64;
        for (index, &value) in cells.iter().enumerate() {
            match value {
                0 => {}
                1 => dark |= bit(index),
                2 => light |= bit(index),
                _ => return Err(EngineError::InvalidCell { index, value }),
            }
        }
        Ok(Self { dark, light })
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_cells(&self) -> [u8; NUM_CELLS] {
        let mut cells = [0u8; NUM_CELLS];
        for (pos, cell) in cells.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if (self.dark & square) != 0 {
                1
            } else if (self.light & square) != 0 {
                2
            } else {
                0
            };
        }
        cells
    }

    /// Returns the occupant of a cell, if any.
    pub fn side_at(&self, pos: Position) -> Option<Side> {
        self.occupant(i32::from(pos.row), i32::from(pos.col))
    }

    /// Enumerates every legal move for `side` with its capture runs, in
    /// row-major scan order. An empty result means `side` must pass.
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                if let Some(mv) = self.move_at(row, col, side) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Early-exit existence check used for pass and terminal detection.
    pub fn has_legal_move(&self, side: Side) -> bool {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                if self.occupant(i32::from(row), i32::from(col)).is_none()
                    && DIRECTIONS
                        .iter()
                        .any(|&direction| self.find_anchor(row, col, direction, side).is_some())
                {
                    return true;
                }
            }
        }
        false
    }

    /// Plays `mv` for `side`: places the target chip and converts every
    /// recorded run. Returns the chips gained, counting the placed chip
    /// as 1.
    ///
    /// The move must have come from `legal_moves` on this exact board
    /// state. Every run is re-checked against the current cells before
    /// anything is mutated, so a stale move fails and leaves the board
    /// untouched.
    pub fn apply_move(&mut self, mv: &Move, side: Side) -> EngineResult<u32> {
        let Position { row, col } = mv.target;
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(EngineError::OutOfRange { row, col });
        }
        let invalid = EngineError::InvalidMove { row, col };
        if self.occupant(i32::from(row), i32::from(col)).is_some() || mv.flips.is_empty() {
            return Err(invalid);
        }

        let mut flips = 0u64;
        for run in &mv.flips {
            flips |= self.run_mask(mv.target, run, side).ok_or(invalid)?;
        }

        let move_bit = bit(row as usize * BOARD_SIZE + col as usize);
        match side {
            Side::Dark => {
                self.dark |= move_bit | flips;
                self.light &= !flips;
            }
            Side::Light => {
                self.light |= move_bit | flips;
                self.dark &= !flips;
            }
        }

        Ok(1 + flips.count_ones())
    }

    /// True when `mv` lands inside a 2x2 corner quadrant whose true
    /// corner is still empty. Heuristic only: it does not check whether
    /// the opponent can actually reach that corner.
    pub fn is_corner_threat(&self, mv: &Move) -> bool {
        let Position { row, col } = mv.target;
        CORNERS.iter().any(|&(corner_row, corner_col)| {
            in_quadrant(row, corner_row)
                && in_quadrant(col, corner_col)
                && self
                    .occupant(i32::from(corner_row), i32::from(corner_col))
                    .is_none()
        })
    }

    /// Returns `(dark_count, light_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.dark.count_ones() as u8, self.light.count_ones() as u8)
    }

    /// Returns the number of empty cells.
    pub fn empty_count(&self) -> u8 {
        let (dark_count, light_count) = self.count();
        NUM_CELLS as u8 - dark_count - light_count
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Game end: full board, or neither side has a legal move.
    pub fn is_terminal(&self) -> bool {
        self.is_full()
            || (!self.has_legal_move(Side::Dark) && !self.has_legal_move(Side::Light))
    }

    fn move_at(&self, row: u8, col: u8, side: Side) -> Option<Move> {
        if self.occupant(i32::from(row), i32::from(col)).is_some() {
            return None;
        }

        let mut flips = Vec::new();
        for direction in DIRECTIONS {
            if let Some(anchor) = self.find_anchor(row, col, direction, side) {
                flips.push(FlipRun { direction, anchor });
            }
        }

        if flips.is_empty() {
            None
        } else {
            Some(Move {
                target: Position { row, col },
                flips,
            })
        }
    }

    /// Walks outward from an empty cell: a run of opponent chips closed
    /// by one of `side`'s own chips yields that chip as the anchor.
    /// Walking off the board or onto an empty cell ends the direction
    /// with no anchor.
    fn find_anchor(&self, row: u8, col: u8, direction: (i32, i32), side: Side) -> Option<Position> {
        let (dr, dc) = direction;
        let mut r = i32::from(row) + dr;
        let mut c = i32::from(col) + dc;
        let mut seen_opponent = false;

        while in_bounds(r, c) {
            match self.occupant(r, c) {
                Some(s) if s == side => {
                    return seen_opponent.then_some(Position {
                        row: r as u8,
                        col: c as u8,
                    });
                }
                Some(_) => seen_opponent = true,
                None => return None,
            }
            r += dr;
            c += dc;
        }
        None
    }

    /// Re-validates one recorded run against the current cells and
    /// returns the bit mask of chips it converts. `None` when the run no
    /// longer holds: stale board, fabricated anchor, or a non-unit
    /// direction.
    fn run_mask(&self, target: Position, run: &FlipRun, side: Side) -> Option<u64> {
        if !DIRECTIONS.contains(&run.direction) {
            return None;
        }

        let (dr, dc) = run.direction;
        let anchor = (i32::from(run.anchor.row), i32::from(run.anchor.col));
        let mut r = i32::from(target.row) + dr;
        let mut c = i32::from(target.col) + dc;
        let mut mask = 0u64;

        while in_bounds(r, c) {
            if (r, c) == anchor {
                return (mask != 0 && self.occupant(r, c) == Some(side)).then_some(mask);
            }
            if self.occupant(r, c) != Some(side.opponent()) {
                return None;
            }
            mask |= bit(r as usize * BOARD_SIZE + c as usize);
            r += dr;
            c += dc;
        }
        None
    }

    fn occupant(&self, row: i32, col: i32) -> Option<Side> {
        if !in_bounds(row, col) {
            return None;
        }
        let square = bit(row as usize * BOARD_SIZE + col as usize);
        if (self.dark & square) != 0 {
            Some(Side::Dark)
        } else if (self.light & square) != 0 {
            Some(Side::Light)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_CELLS { 1u64 << pos } else { 0 }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

fn in_quadrant(value: u8, corner: u8) -> bool {
    if corner == 0 { value <= 1 } else { value >= 6 }
}
