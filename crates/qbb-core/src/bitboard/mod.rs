//! ビットボードモジュール
//!
//! 64升の集合を `u64` で表現する（bit i = 升 i）。
//!
//! - 筋・段のマスク定数（`BB_FILE_A` など）
//! - 方向シフト（`Direction::shift`）
//! - 近接駒の利き（ポーン・ナイト・キング、マスク付きシフトで計算）
//! - 遠方駒の利き（ビショップ・ルーク、占有に対するレイキャスト）
//!
//! 参照テーブルは持たず、すべて計算で求める。

mod attacks;

pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, ray_attacks,
    rook_attacks,
};

use crate::types::Square;

/// ビットボード
pub type Bitboard = u64;

pub const BB_FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const BB_FILE_B: Bitboard = 0x0202_0202_0202_0202;
pub const BB_FILE_G: Bitboard = 0x4040_4040_4040_4040;
pub const BB_FILE_H: Bitboard = 0x8080_8080_8080_8080;
pub const BB_NOT_A_FILE: Bitboard = !BB_FILE_A;
pub const BB_NOT_H_FILE: Bitboard = !BB_FILE_H;
pub const BB_NOT_AB_FILE: Bitboard = !(BB_FILE_A | BB_FILE_B);
pub const BB_NOT_GH_FILE: Bitboard = !(BB_FILE_G | BB_FILE_H);

pub const BB_RANK_1: Bitboard = 0x0000_0000_0000_00FF;
pub const BB_RANK_2: Bitboard = 0x0000_0000_0000_FF00;
pub const BB_RANK_7: Bitboard = 0x00FF_0000_0000_0000;
pub const BB_RANK_8: Bitboard = 0xFF00_0000_0000_0000;

/// 8方向
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// ルークの4方向
    pub const ORTHOGONAL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    /// ビショップの4方向
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// 1升シフト（盤端を跨ぐビットは落とす）
    #[inline]
    pub const fn shift(self, bb: Bitboard) -> Bitboard {
        match self {
            Direction::North => bb << 8,
            Direction::South => bb >> 8,
            Direction::East => (bb << 1) & BB_NOT_A_FILE,
            Direction::West => (bb >> 1) & BB_NOT_H_FILE,
            Direction::NorthEast => (bb << 9) & BB_NOT_A_FILE,
            Direction::NorthWest => (bb << 7) & BB_NOT_H_FILE,
            Direction::SouthEast => (bb >> 7) & BB_NOT_A_FILE,
            Direction::SouthWest => (bb >> 9) & BB_NOT_H_FILE,
        }
    }
}

/// 最下位ビットの升（空ならNone）
#[inline]
pub fn lsb(bb: Bitboard) -> Option<Square> {
    if bb == 0 { None } else { Square::from_u8(bb.trailing_zeros() as u8) }
}

/// 立っているビットの数
#[inline]
pub const fn popcount(bb: Bitboard) -> u32 {
    bb.count_ones()
}

/// ビットボードの升を下位から列挙する
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let sq = lsb(self.0)?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

/// `for sq in squares(bb)` 用
#[inline]
pub const fn squares(bb: Bitboard) -> BitboardIter {
    BitboardIter(bb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_shift_wraps() {
        // h1 から東へは盤外
        assert_eq!(Direction::East.shift(Square::H1.bb()), 0);
        // a1 から西へは盤外
        assert_eq!(Direction::West.shift(Square::A1.bb()), 0);
        assert_eq!(Direction::North.shift(Square::E4.bb()), Square::new(4, 4).bb());
        assert_eq!(Direction::SouthWest.shift(Square::E4.bb()), Square::new(3, 2).bb());
        assert_eq!(Direction::North.shift(Square::H8.bb()), 0);
    }

    #[test]
    fn test_squares_iter() {
        let bb = Square::A1.bb() | Square::E4.bb() | Square::H8.bb();
        let v: Vec<Square> = squares(bb).collect();
        assert_eq!(v, vec![Square::A1, Square::E4, Square::H8]);
        assert_eq!(squares(bb).size_hint(), (3, Some(3)));
        assert_eq!(lsb(0), None);
        assert_eq!(popcount(bb), 3);
    }
}
