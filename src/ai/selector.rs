use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::game::MoveSelector;
use crate::types::{Move, Side};

/// Picks the engine's move.
///
/// Caller contract: treat an empty `legal_moves` result as a pass before
/// asking for a selection; no legal move here is an error, not a pass.
///
/// Selection order:
/// 1. a sole legal move is returned unscored;
/// 2. the first true-corner move in scan order wins outright;
/// 3. otherwise the best net chip gain wins, first candidate winning
///    ties. A best candidate that opens a corner is excluded while any
///    alternative remains; when every candidate opens one, the original
///    best is accepted as an unavoidable risk.
pub fn select_move(board: &Board, side: Side) -> EngineResult<Move> {
    let mut moves = board.legal_moves(side);
    if moves.is_empty() {
        return Err(EngineError::NoLegalMove { side });
    }
    if moves.len() == 1 {
        return Ok(moves.swap_remove(0));
    }
    if let Some(corner) = moves.iter().position(Move::is_corner) {
        return Ok(moves.swap_remove(corner));
    }

    let gains: Vec<i32> = moves
        .iter()
        .map(|mv| net_chip_gain(board, mv, side))
        .collect();

    let mut best = 0;
    for (candidate, gain) in gains.iter().enumerate().skip(1) {
        if *gain > gains[best] {
            best = candidate;
        }
    }

    let first_best = best;
    let mut excluded = vec![false; moves.len()];
    loop {
        if !board.is_corner_threat(&moves[best]) {
            return Ok(moves.swap_remove(best));
        }
        excluded[best] = true;
        match arg_max_excluding(&gains, &excluded) {
            Some(next) => best = next,
            None => return Ok(moves.swap_remove(first_best)),
        }
    }
}

/// Immediate gain minus the opponent's best single-move answer on the
/// post-move board. No possible answer subtracts nothing.
fn net_chip_gain(board: &Board, mv: &Move, side: Side) -> i32 {
    let mut next = *board;
    let _ = next.apply_move(mv, side);

    let best_reply = next
        .legal_moves(side.opponent())
        .iter()
        .map(|reply| reply.chip_gain() as i32)
        .max()
        .unwrap_or(0);

    mv.chip_gain() as i32 - best_reply
}

fn arg_max_excluding(gains: &[i32], excluded: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (candidate, gain) in gains.iter().enumerate() {
        if excluded[candidate] {
            continue;
        }
        match best {
            Some(current) if gains[current] >= *gain => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Default engine policy for `GameSession`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetGainSelector;

impl MoveSelector for NetGainSelector {
    fn select_move(&self, board: &Board, side: Side) -> Option<Move> {
        select_move(board, side).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD_WIDTH: usize = 8;

    fn cell_bit(row: usize, col: usize) -> u64 {
        1u64 << (row * BOARD_WIDTH + col)
    }

    fn target_of(mv: &Move) -> (u8, u8) {
        (mv.target.row, mv.target.col)
    }

    #[test]
    fn no_legal_move_is_an_error_not_a_pass() {
        let board = Board::from_bitboards(cell_bit(3, 3), 0);

        assert_eq!(
            select_move(&board, Side::Light),
            Err(EngineError::NoLegalMove { side: Side::Light })
        );
    }

    #[test]
    fn sole_legal_move_is_returned_even_with_negative_net_gain() {
        // dark's only move is (0,2), after which light answers (5,4) and
        // converts the whole row-5 run: net gain 2 - 4 < 0
        let dark = cell_bit(0, 0) | cell_bit(5, 1) | cell_bit(5, 2) | cell_bit(5, 3);
        let light = cell_bit(0, 1) | cell_bit(5, 0);
        let board = Board::from_bitboards(dark, light);

        let moves = board.legal_moves(Side::Dark);
        assert_eq!(moves.len(), 1);

        let mv = select_move(&board, Side::Dark).expect("selection must succeed");
        assert_eq!(target_of(&mv), (0, 2));
    }

    #[test]
    fn t06_corner_move_beats_any_net_gain_score() {
        // (0,0) flips a single chip while (4,0) would flip four
        let dark = cell_bit(0, 2) | cell_bit(4, 5);
        let light = cell_bit(0, 1)
            | cell_bit(4, 1)
            | cell_bit(4, 2)
            | cell_bit(4, 3)
            | cell_bit(4, 4);
        let board = Board::from_bitboards(dark, light);

        let mv = select_move(&board, Side::Dark).expect("selection must succeed");
        assert_eq!(target_of(&mv), (0, 0));
    }

    #[test]
    fn first_corner_in_scan_order_wins_when_several_are_open() {
        let dark = cell_bit(0, 2) | cell_bit(0, 5) | cell_bit(5, 0) | cell_bit(7, 5);
        let light = cell_bit(0, 1) | cell_bit(0, 6) | cell_bit(6, 0) | cell_bit(7, 6);
        let board = Board::from_bitboards(dark, light);

        let corners: Vec<(u8, u8)> = board
            .legal_moves(Side::Dark)
            .iter()
            .filter(|mv| mv.is_corner())
            .map(target_of)
            .collect();
        assert_eq!(corners, vec![(0, 0), (0, 7), (7, 0), (7, 7)]);

        let mv = select_move(&board, Side::Dark).expect("selection must succeed");
        assert_eq!(target_of(&mv), (0, 0));
    }

    #[test]
    fn net_gain_accounts_for_the_opponent_best_reply() {
        // (2,1) grabs two chips but exposes the whole row to (2,0);
        // (5,4) grabs one chip and leaves light with no answer at all
        let dark = cell_bit(2, 4) | cell_bit(5, 6);
        let light = cell_bit(2, 2) | cell_bit(2, 3) | cell_bit(2, 5) | cell_bit(5, 5);
        let board = Board::from_bitboards(dark, light);

        let moves: Vec<(u8, u8)> = board.legal_moves(Side::Dark).iter().map(target_of).collect();
        assert_eq!(moves, vec![(2, 1), (2, 6), (5, 4)]);

        let mv = select_move(&board, Side::Dark).expect("selection must succeed");
        assert_eq!(target_of(&mv), (5, 4));
    }

    #[test]
    fn t07_corner_opening_best_move_yields_to_a_safer_alternative() {
        // (0,1) has the better net gain but sits next to the open corner;
        // (4,3) is safe and must win despite scoring lower
        let dark = cell_bit(0, 3) | cell_bit(2, 1) | cell_bit(4, 5);
        let light = cell_bit(0, 2) | cell_bit(1, 1) | cell_bit(4, 4);
        let board = Board::from_bitboards(dark, light);

        let moves: Vec<(u8, u8)> = board.legal_moves(Side::Dark).iter().map(target_of).collect();
        assert_eq!(moves, vec![(0, 1), (4, 3)]);

        let mv = select_move(&board, Side::Dark).expect("selection must succeed");
        assert_eq!(target_of(&mv), (4, 3));
    }

    #[test]
    fn all_corner_opening_candidates_fall_back_to_the_original_best() {
        let dark = cell_bit(0, 3) | cell_bit(4, 0);
        let light = cell_bit(0, 2) | cell_bit(5, 0);
        let board = Board::from_bitboards(dark, light);

        let moves = board.legal_moves(Side::Dark);
        let movetargets: Vec<(u8, u8)> = moves.iter().map(target_of).collect();
        assert_eq!(movetargets, vec![(0, 1), (6, 0)]);
        assert!(moves.iter().all(|mv| board.is_corner_threat(mv)));

        let mv = select_move(&board, Side::Dark).expect("selection must succeed");
        assert_eq!(target_of(&mv), (0, 1));
    }

    #[test]
    fn selector_trait_returns_none_without_legal_moves() {
        let selector = NetGainSelector;
        let board = Board::from_bitboards(cell_bit(3, 3), 0);

        assert!(selector.select_move(&board, Side::Light).is_none());
        assert!(selector.select_move(&board, Side::Dark).is_none());
    }
}
