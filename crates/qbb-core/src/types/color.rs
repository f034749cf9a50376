//! 手番（Color）

use serde::{Deserialize, Serialize};

/// 手番（白/黒）
///
/// 値は quad-bitboard の色ビット（`QBB_BLACK` の1ビット）とそのまま一致する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// 両方の手番
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 色ビットから変換（下位1bitのみ参照）
    #[inline]
    pub const fn from_bit(bit: u64) -> Color {
        if bit & 1 == 0 { Color::White } else { Color::Black }
    }

    /// FENの手番文字（'w' / 'b'）
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(!Color::White, Color::Black);
    }

    #[test]
    fn test_color_index() {
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
        assert_eq!(Color::from_bit(0), Color::White);
        assert_eq!(Color::from_bit(3), Color::Black);
    }
}
