use std::fmt;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Chip color of one player. Dark opens every game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    /// Wire code shared with saved games and UI callers: dark=1, light=2.
    pub fn code(self) -> u8 {
        match self {
            Side::Dark => 1,
            Side::Light => 2,
        }
    }

    pub fn from_code(code: u8) -> EngineResult<Side> {
        match code {
            1 => Ok(Side::Dark),
            2 => Ok(Side::Light),
            _ => Err(EngineError::InvalidSideCode { code }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Dark => write!(f, "dark"),
            Side::Light => write!(f, "light"),
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Row-major cell index (0..=63).
    pub fn index(self) -> u8 {
        self.row * 8 + self.col
    }
}

/// One capture run of a move: the unit direction walked from the target
/// and the mover-colored chip that closes the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlipRun {
    pub direction: (i32, i32),
    pub anchor: Position,
}

/// A legal placement together with every run it captures. A move with no
/// runs is not a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub target: Position,
    pub flips: Vec<FlipRun>,
}

impl Move {
    /// Number of opponent chips this move converts.
    pub fn flip_count(&self) -> u32 {
        self.flips
            .iter()
            .map(|run| run_length(self.target, run))
            .sum()
    }

    /// Chips gained by playing this move, counting the placed chip as 1.
    pub fn chip_gain(&self) -> u32 {
        self.flip_count() + 1
    }

    /// Cells strictly between the target and each anchor, in run order.
    pub fn flipped_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for run in &self.flips {
            let (dr, dc) = run.direction;
            let anchor = (i32::from(run.anchor.row), i32::from(run.anchor.col));
            let mut r = i32::from(self.target.row) + dr;
            let mut c = i32::from(self.target.col) + dc;
            while (0..8).contains(&r) && (0..8).contains(&c) {
                if (r, c) == anchor {
                    break;
                }
                cells.push(Position {
                    row: r as u8,
                    col: c as u8,
                });
                r += dr;
                c += dc;
            }
        }
        cells
    }

    /// True when the target is one of the four true corner cells.
    pub fn is_corner(&self) -> bool {
        matches!(
            (self.target.row, self.target.col),
            (0, 0) | (0, 7) | (7, 0) | (7, 7)
        )
    }
}

fn run_length(target: Position, run: &FlipRun) -> u32 {
    let dr = (i32::from(run.anchor.row) - i32::from(target.row)).abs();
    let dc = (i32::from(run.anchor.col) - i32::from(target.col)).abs();
    (dr.max(dc) - 1).max(0) as u32
}

/// Public game state returned across the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub dark_count: u8,
    pub light_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped positions (0..=63).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub dark_count: u8,
    pub light_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_codes_round_trip() {
        assert_eq!(Side::Dark.code(), 1);
        assert_eq!(Side::Light.code(), 2);
        assert_eq!(Side::from_code(1), Ok(Side::Dark));
        assert_eq!(Side::from_code(2), Ok(Side::Light));
        assert_eq!(
            Side::from_code(3),
            Err(EngineError::InvalidSideCode { code: 3 })
        );
        assert_eq!(Side::Dark.opponent(), Side::Light);
    }

    #[test]
    fn flip_counts_follow_run_geometry() {
        let mv = Move {
            target: Position { row: 2, col: 2 },
            flips: vec![
                FlipRun {
                    direction: (0, 1),
                    anchor: Position { row: 2, col: 5 },
                },
                FlipRun {
                    direction: (1, 1),
                    anchor: Position { row: 4, col: 4 },
                },
            ],
        };

        assert_eq!(mv.flip_count(), 3);
        assert_eq!(mv.chip_gain(), 4);
        assert_eq!(
            mv.flipped_cells(),
            vec![
                Position { row: 2, col: 3 },
                Position { row: 2, col: 4 },
                Position { row: 3, col: 3 },
            ]
        );
    }

    #[test]
    fn only_the_four_true_corners_count_as_corners() {
        let corner = |row, col| Move {
            target: Position { row, col },
            flips: Vec::new(),
        };

        assert!(corner(0, 0).is_corner());
        assert!(corner(0, 7).is_corner());
        assert!(corner(7, 0).is_corner());
        assert!(corner(7, 7).is_corner());
        assert!(!corner(1, 1).is_corner());
        assert!(!corner(0, 1).is_corner());
    }
}
