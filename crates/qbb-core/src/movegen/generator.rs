//! 指し手生成器

use super::MoveList;
use crate::bitboard::{
    BB_RANK_1, BB_RANK_2, BB_RANK_7, BB_RANK_8, Bitboard, Direction, bishop_attacks,
    king_attacks, knight_attacks, lsb, pawn_attacks, queen_attacks, rook_attacks, squares,
};
use crate::board::{Board, CastleRights};
use crate::types::{Color, Move, Piece, PieceType, Square};

/// 成り先の駒種（強い順）
const PROMOTION_TYPES: [PieceType; 4] =
    [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

/// ポーンが前進する方向
#[inline]
const fn forward(us: Color) -> Direction {
    match us {
        Color::White => Direction::North,
        Color::Black => Direction::South,
    }
}

/// 成りが起きる段
#[inline]
const fn promotion_rank(us: Color) -> Bitboard {
    match us {
        Color::White => BB_RANK_8,
        Color::Black => BB_RANK_1,
    }
}

/// 2升進める段
#[inline]
const fn start_rank(us: Color) -> Bitboard {
    match us {
        Color::White => BB_RANK_2,
        Color::Black => BB_RANK_7,
    }
}

/// 移動先候補から指し手を作る（移動先に相手の駒があれば取る手）
#[inline]
fn push_targets(board: &Board, list: &mut MoveList, from: Square, pc: Piece, targets: Bitboard) {
    let hmc = board.halfmove_clock();
    for to in squares(targets) {
        let captured = board.piece_at(to);
        list.push(Move::new(from, to, to, pc, pc, captured, None, hmc, 0));
    }
}

/// ポーンの1手を追加（最終段なら4種の成りに展開）
#[inline]
fn push_pawn_move(
    list: &mut MoveList,
    us: Color,
    from: Square,
    to: Square,
    captured: Piece,
    hmc: u8,
) {
    let pawn = Piece::new(PieceType::Pawn, us);
    if to.bb() & promotion_rank(us) != 0 {
        for pt in PROMOTION_TYPES {
            let promoted = Piece::new(pt, us);
            list.push(Move::new(from, to, to, pawn, promoted, captured, None, hmc, 0));
        }
    } else {
        list.push(Move::new(from, to, to, pawn, pawn, captured, None, hmc, 0));
    }
}

fn generate_pawn_moves(board: &Board, us: Color, list: &mut MoveList) {
    let pawns = board.pieces(us, PieceType::Pawn);
    if pawns == 0 {
        return;
    }
    let empty = !board.occupied();
    let them = board.color_bb(us.opponent());
    let hmc = board.halfmove_clock();
    let fwd = forward(us);

    for from in squares(pawns) {
        let from_bb = from.bb();

        // 前進
        let one = fwd.shift(from_bb) & empty;
        if let Some(to) = lsb(one) {
            push_pawn_move(list, us, from, to, Piece::NONE, hmc);

            if from_bb & start_rank(us) != 0 {
                let two = fwd.shift(one) & empty;
                if let Some(to2) = lsb(two) {
                    let pawn = Piece::new(PieceType::Pawn, us);
                    list.push(Move::new(from, to2, to2, pawn, pawn, Piece::NONE, Some(to), hmc, 0));
                }
            }
        }

        // 取る手
        for to in squares(pawn_attacks(from_bb, us) & them) {
            push_pawn_move(list, us, from, to, board.piece_at(to), hmc);
        }
    }

    // アンパッサン
    if let Some(ep) = board.ep_target() {
        let expected_rank = match us {
            Color::White => 5,
            Color::Black => 2,
        };
        if ep.rank() != expected_rank {
            return;
        }
        let victim_sq = match us {
            Color::White => Square::new(ep.file(), 4),
            Color::Black => Square::new(ep.file(), 3),
        };
        let victim = Piece::new(PieceType::Pawn, us.opponent());
        if board.piece_at(victim_sq) != victim || board.piece_at(ep) != Piece::NONE {
            return;
        }
        let pawn = Piece::new(PieceType::Pawn, us);
        // ep升を攻撃できる自分のポーン = ep升から相手側向きに引いた利き
        for from in squares(pawn_attacks(ep.bb(), us.opponent()) & pawns) {
            list.push(Move::new(from, ep, victim_sq, pawn, pawn, victim, None, hmc, 0));
        }
    }
}

fn generate_piece_moves(board: &Board, us: Color, list: &mut MoveList) {
    let occ = board.occupied();
    let not_own = !board.color_bb(us);

    for from in squares(board.pieces(us, PieceType::Knight)) {
        let pc = Piece::new(PieceType::Knight, us);
        push_targets(board, list, from, pc, knight_attacks(from.bb()) & not_own);
    }
    for from in squares(board.pieces(us, PieceType::Bishop)) {
        let pc = Piece::new(PieceType::Bishop, us);
        push_targets(board, list, from, pc, bishop_attacks(from, occ) & not_own);
    }
    for from in squares(board.pieces(us, PieceType::Rook)) {
        let pc = Piece::new(PieceType::Rook, us);
        push_targets(board, list, from, pc, rook_attacks(from, occ) & not_own);
    }
    for from in squares(board.pieces(us, PieceType::Queen)) {
        let pc = Piece::new(PieceType::Queen, us);
        push_targets(board, list, from, pc, queen_attacks(from, occ) & not_own);
    }
    for from in squares(board.pieces(us, PieceType::King)) {
        let pc = Piece::new(PieceType::King, us);
        push_targets(board, list, from, pc, king_attacks(from.bb()) & not_own);
    }
}

fn generate_castling(board: &Board, us: Color, list: &mut MoveList) {
    let rights = board.castle_rights();
    let home_rank = match us {
        Color::White => 0,
        Color::Black => 7,
    };
    let king_from = Square::new(4, home_rank);
    let king = Piece::new(PieceType::King, us);
    let them = us.opponent();
    let occ = board.occupied();
    let hmc = board.halfmove_clock();

    for kingside in [true, false] {
        if !rights.contains(CastleRights::for_side(us, kingside)) {
            continue;
        }
        // 間の升（空いているべき）と玉の通過升（攻撃されていないべき）
        let shift = home_rank as u32 * 8;
        let (between, transit, king_to): (Bitboard, Bitboard, u8) = if kingside {
            (0x60 << shift, 0x60 << shift, 6)
        } else {
            (0x0E << shift, 0x0C << shift, 2)
        };
        if occ & between != 0 {
            continue;
        }
        if board.is_square_attacked(them, king_from)
            || squares(transit).any(|sq| board.is_square_attacked(them, sq))
        {
            continue;
        }
        let to = Square::new(king_to, home_rank);
        list.push(
            Move::new(king_from, to, to, king, king, Piece::NONE, None, hmc, 0)
                .with_castle(kingside),
        );
    }
}

/// 疑似合法手をすべて生成する（自玉への利きは確認しない）
pub fn generate_pseudo_legal(board: &Board, us: Color, list: &mut MoveList) {
    generate_pawn_moves(board, us, list);
    generate_piece_moves(board, us, list);
    generate_castling(board, us, list);
}

/// 合法手を生成する
pub fn generate_legal(board: &Board, us: Color, list: &mut MoveList) {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal(board, us, &mut pseudo);
    let mut b = *board;
    let st = b.undo_state();
    for mv in pseudo {
        b.do_move(mv);
        if b.is_valid() {
            list.push(mv);
        }
        b.undo_move_with(mv, st);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;

    fn legal(fen: &str) -> (Board, Color, MoveList) {
        let (b, us) = Board::from_fen(fen).unwrap();
        let mut list = MoveList::new();
        generate_legal(&b, us, &mut list);
        (b, us, list)
    }

    #[test]
    fn test_startpos_moves() {
        let (_, _, list) = legal(STARTPOS_FEN);
        assert_eq!(list.len(), 20);
        let double = list.iter().find(|m| m.to_string() == "e2e4").unwrap();
        assert_eq!(double.ep_target(), Some(Square::E3));
        let single = list.iter().find(|m| m.to_string() == "e2e3").unwrap();
        assert_eq!(single.ep_target(), None);
    }

    #[test]
    fn test_promotions_generated() {
        let (_, _, list) = legal("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let promos: Vec<String> =
            list.iter().filter(|m| m.is_promotion()).map(|m| m.to_string()).collect();
        assert_eq!(promos.len(), 4);
        assert!(promos.contains(&"b7b8q".to_string()));
        assert!(promos.contains(&"b7b8n".to_string()));
    }

    #[test]
    fn test_en_passant_generated() {
        let (_, _, list) = legal("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let ep: Vec<&Move> =
            list.iter().filter(|m| m.capture_square() != m.to()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to_string(), "e5d6");
        assert_eq!(ep[0].piece_captured(), Piece::B_PAWN);
    }

    #[test]
    fn test_castling_through_check_excluded() {
        // f8のルークがf1を押さえるのでキングサイドは不可
        let (_, _, list) = legal("k4r2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(list.iter().any(|m| m.is_castle_queenside()));
        assert!(!list.iter().any(|m| m.is_castle_kingside()));
    }

    #[test]
    fn test_moves_carry_clock() {
        let (b, _, list) = legal("4k3/8/8/8/8/8/8/R3K3 w Q - 17 30");
        assert!(list.iter().all(|m| m.halfmove_clock() == b.halfmove_clock()));
    }

    #[test]
    fn test_checkmated_has_no_moves() {
        // バックランクメイト
        let (_, _, list) = legal("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(list.is_empty());
    }
}
