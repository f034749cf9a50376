//! 駒の利き計算
//!
//! 近接駒はマスク付きシフト、遠方駒は先頭の占有升で止まるレイキャストで求める。

use super::{
    BB_NOT_A_FILE, BB_NOT_AB_FILE, BB_NOT_GH_FILE, BB_NOT_H_FILE, Bitboard, Direction,
};
use crate::types::{Color, Square};

/// ポーンの利き（`pawns` は複数升でもよい）
#[inline]
pub const fn pawn_attacks(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => ((pawns << 7) & BB_NOT_H_FILE) | ((pawns << 9) & BB_NOT_A_FILE),
        Color::Black => ((pawns >> 9) & BB_NOT_H_FILE) | ((pawns >> 7) & BB_NOT_A_FILE),
    }
}

/// ナイトの利き（`knights` は複数升でもよい）
#[inline]
pub const fn knight_attacks(knights: Bitboard) -> Bitboard {
    let l1 = (knights >> 1) & BB_NOT_H_FILE;
    let l2 = (knights >> 2) & BB_NOT_GH_FILE;
    let r1 = (knights << 1) & BB_NOT_A_FILE;
    let r2 = (knights << 2) & BB_NOT_AB_FILE;
    let h1 = l1 | r1;
    let h2 = l2 | r2;
    (h1 << 16) | (h1 >> 16) | (h2 << 8) | (h2 >> 8)
}

/// キングの利き
#[inline]
pub const fn king_attacks(kings: Bitboard) -> Bitboard {
    let sides = ((kings << 1) & BB_NOT_A_FILE) | ((kings >> 1) & BB_NOT_H_FILE);
    let row = kings | sides;
    sides | (row << 8) | (row >> 8)
}

/// 1方向のレイ（最初の占有升を含めて止まる）
#[inline]
pub fn ray_attacks(sq: Square, occupied: Bitboard, dir: Direction) -> Bitboard {
    let mut attacks = 0;
    let mut cur = sq.bb();
    loop {
        cur = dir.shift(cur);
        if cur == 0 {
            break;
        }
        attacks |= cur;
        if cur & occupied != 0 {
            break;
        }
    }
    attacks
}

/// ビショップの利き
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::DIAGONAL.iter().fold(0, |acc, &d| acc | ray_attacks(sq, occupied, d))
}

/// ルークの利き
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::ORTHOGONAL.iter().fold(0, |acc, &d| acc | ray_attacks(sq, occupied, d))
}

/// クイーンの利き
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::popcount;

    #[test]
    fn test_pawn_attacks() {
        let e2 = Square::E2.bb();
        assert_eq!(pawn_attacks(e2, Color::White), Square::new(3, 2).bb() | Square::new(5, 2).bb());
        // a筋のポーンはh筋に回り込まない
        let a2 = Square::new(0, 1).bb();
        assert_eq!(pawn_attacks(a2, Color::White), Square::new(1, 2).bb());
        let h7 = Square::new(7, 6).bb();
        assert_eq!(pawn_attacks(h7, Color::Black), Square::new(6, 5).bb());
    }

    #[test]
    fn test_knight_attacks() {
        assert_eq!(popcount(knight_attacks(Square::E4.bb())), 8);
        assert_eq!(popcount(knight_attacks(Square::A1.bb())), 2);
        assert_eq!(popcount(knight_attacks(Square::H8.bb())), 2);
        assert_eq!(
            knight_attacks(Square::B1.bb()),
            Square::new(0, 2).bb() | Square::new(2, 2).bb() | Square::D1.bb() << 8
        );
    }

    #[test]
    fn test_king_attacks() {
        assert_eq!(popcount(king_attacks(Square::E4.bb())), 8);
        assert_eq!(popcount(king_attacks(Square::A1.bb())), 3);
        assert_eq!(popcount(king_attacks(Square::H1.bb())), 3);
    }

    #[test]
    fn test_slider_attacks_blocked() {
        // 空の盤ではルークは14升、ビショップはe4から13升
        assert_eq!(popcount(rook_attacks(Square::E4, 0)), 14);
        assert_eq!(popcount(bishop_attacks(Square::E4, 0)), 13);

        // e6 に駒があれば北のレイは e5, e6 で止まる
        let blocker = Square::new(4, 5).bb();
        let north = ray_attacks(Square::E4, blocker, Direction::North);
        assert_eq!(north, Square::new(4, 4).bb() | blocker);
        assert_eq!(popcount(queen_attacks(Square::E4, blocker)), 14 + 13 - 2);
    }
}
