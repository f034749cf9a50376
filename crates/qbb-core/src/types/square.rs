//! 升（Square）
//!
//! a1 = 0, b1 = 1, ..., h8 = 63 のリトルエンディアン・ランク順。

use super::Color;

/// 升（0〜63）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// 升の数
    pub const NUM: usize = 64;

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const E2: Square = Square(12);
    pub const E3: Square = Square(20);
    pub const E4: Square = Square(28);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    /// 筋(0..8)と段(0..8)から生成
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square((rank << 3) | file)
    }

    /// u8から変換（範囲外はNone）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<Square> {
        if n < 64 { Some(Square(n)) } else { None }
    }

    /// 下位6bitだけを見て変換（ムーブのデコード用）
    #[inline]
    pub const fn from_bits(bits: u64) -> Square {
        Square((bits & 0x3F) as u8)
    }

    /// 生の値
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 筋（a=0 .. h=7）
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// 段（1段目=0 .. 8段目=7）
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// 手番から見た相対段
    #[inline]
    pub const fn relative_rank(self, color: Color) -> u8 {
        match color {
            Color::White => self.rank(),
            Color::Black => self.rank() ^ 7,
        }
    }

    /// 上下反転（a1 <-> a8）
    #[inline]
    pub const fn flop(self) -> Square {
        Square(self.0 ^ 56)
    }

    /// この升だけが立ったビットボード
    #[inline]
    pub const fn bb(self) -> u64 {
        1u64 << self.0
    }

    /// 代数表記（"e4" など）から変換
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let f = chars.next()?;
        let r = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&f) || !('1'..='8').contains(&r) {
            return None;
        }
        Some(Square::new(f as u8 - b'a', r as u8 - b'1'))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, (b'1' + self.rank()) as char)
    }
}
