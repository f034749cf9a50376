//! perft（合法手の数え上げ）

use super::{MoveList, generate_pseudo_legal};
use crate::board::Board;
use crate::types::{Color, Move};

/// `depth` 手先までの末端局面数
///
/// 疑似合法手を適用し、`is_valid` を通ったものだけを数える。
/// 終了時の `board` は呼び出し前と同一。
pub fn perft(board: &mut Board, us: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut list = MoveList::new();
    generate_pseudo_legal(board, us, &mut list);
    let st = board.undo_state();
    let mut nodes = 0;

    for &mv in &list {
        board.do_move(mv);
        if board.is_valid() {
            nodes += if depth == 1 { 1 } else { perft(board, us.opponent(), depth - 1) };
        }
        board.undo_move_with(mv, st);
    }

    nodes
}

/// ルートの指し手ごとのperft
pub fn perft_divide(board: &mut Board, us: Color, depth: u32) -> Vec<(Move, u64)> {
    let mut result = Vec::new();
    if depth == 0 {
        return result;
    }

    let mut list = MoveList::new();
    generate_pseudo_legal(board, us, &mut list);
    let st = board.undo_state();

    for &mv in &list {
        board.do_move(mv);
        if board.is_valid() {
            let nodes = perft(board, us.opponent(), depth - 1);
            result.push((mv, nodes));
        }
        board.undo_move_with(mv, st);
    }

    log::debug!(
        "perft_divide depth={depth}: {} root moves, {} nodes",
        result.len(),
        result.iter().map(|(_, n)| n).sum::<u64>()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;

    #[test]
    fn test_perft_startpos_shallow() {
        let (mut b, us) = Board::from_fen(STARTPOS_FEN).unwrap();
        let before = b;
        assert_eq!(perft(&mut b, us, 1), 20);
        assert_eq!(perft(&mut b, us, 2), 400);
        assert_eq!(perft(&mut b, us, 3), 8902);
        assert_eq!(b, before);
    }

    #[test]
    fn test_perft_divide_sums_to_perft() {
        let (mut b, us) = Board::from_fen(STARTPOS_FEN).unwrap();
        let divide = perft_divide(&mut b, us, 2);
        assert_eq!(divide.len(), 20);
        assert!(divide.iter().all(|&(_, n)| n == 20));
        assert_eq!(divide.iter().map(|&(_, n)| n).sum::<u64>(), perft(&mut b, us, 2));
    }
}
