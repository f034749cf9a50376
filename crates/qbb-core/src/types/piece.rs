//! 駒種（PieceType）と駒（Piece）
//!
//! 駒は4bitで `(駒種 << 1) | 色` と表現する。
//! この並びは quad-bitboard の4ワード（色, 駒種bit0..2）から1升分を
//! 読み出した値と一致する。

use super::Color;

/// 駒種（3bit）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceType {
    None = 0,
    Pawn = 1,
    Knight = 2,
    King = 3,
    Bishop = 4,
    Rook = 5,
    Queen = 6,
}

impl PieceType {
    /// 駒のある駒種（Noneを除く）
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ];

    /// 3bitの値から変換（7は存在しない駒種）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<PieceType> {
        match n {
            0 => Some(PieceType::None),
            1 => Some(PieceType::Pawn),
            2 => Some(PieceType::Knight),
            3 => Some(PieceType::King),
            4 => Some(PieceType::Bishop),
            5 => Some(PieceType::Rook),
            6 => Some(PieceType::Queen),
            _ => None,
        }
    }

    /// FEN文字（小文字）
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceType::None => '.',
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::King => 'k',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
        }
    }

    /// FEN文字（大小どちらでも）から変換
    #[inline]
    pub const fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'k' => Some(PieceType::King),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            _ => None,
        }
    }
}

/// 駒（4bit）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 駒の種類数（4bitコードの総数）
    pub const NUM: usize = 16;

    pub const NONE: Piece = Piece(0);
    pub const W_PAWN: Piece = Piece::new(PieceType::Pawn, Color::White);
    pub const W_KNIGHT: Piece = Piece::new(PieceType::Knight, Color::White);
    pub const W_KING: Piece = Piece::new(PieceType::King, Color::White);
    pub const W_BISHOP: Piece = Piece::new(PieceType::Bishop, Color::White);
    pub const W_ROOK: Piece = Piece::new(PieceType::Rook, Color::White);
    pub const W_QUEEN: Piece = Piece::new(PieceType::Queen, Color::White);
    pub const B_PAWN: Piece = Piece::new(PieceType::Pawn, Color::Black);
    pub const B_KNIGHT: Piece = Piece::new(PieceType::Knight, Color::Black);
    pub const B_KING: Piece = Piece::new(PieceType::King, Color::Black);
    pub const B_BISHOP: Piece = Piece::new(PieceType::Bishop, Color::Black);
    pub const B_ROOK: Piece = Piece::new(PieceType::Rook, Color::Black);
    pub const B_QUEEN: Piece = Piece::new(PieceType::Queen, Color::Black);

    /// 駒種と色から生成
    #[inline]
    pub const fn new(pt: PieceType, color: Color) -> Piece {
        Piece(((pt as u8) << 1) | color as u8)
    }

    /// 4bitの値から変換（上位ビットは捨てる）
    #[inline]
    pub const fn from_bits(bits: u64) -> Piece {
        Piece((bits & 0xF) as u8)
    }

    /// 生の4bit値
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 駒種（コード7は不正なのでNoneを返す）
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        match PieceType::from_u8((self.0 >> 1) & 0x7) {
            Some(pt) => pt,
            None => PieceType::None,
        }
    }

    /// 色
    #[inline]
    pub const fn color(self) -> Color {
        Color::from_bit(self.0 as u64)
    }

    /// 駒が無いか（駒種がNone）
    #[inline]
    pub const fn is_none(self) -> bool {
        (self.0 >> 1) == 0
    }

    /// 駒種が指定のものか
    #[inline]
    pub fn is(self, pt: PieceType) -> bool {
        self.piece_type() == pt
    }

    /// FEN文字（白は大文字）
    pub fn to_char(self) -> char {
        let c = self.piece_type().to_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// FEN文字から変換
    pub fn from_char(c: char) -> Option<Piece> {
        let pt = PieceType::from_char(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(pt, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_encoding() {
        assert_eq!(Piece::W_PAWN.raw(), 0b0010);
        assert_eq!(Piece::B_PAWN.raw(), 0b0011);
        assert_eq!(Piece::B_QUEEN.raw(), 0b1101);
        assert_eq!(Piece::B_QUEEN.piece_type(), PieceType::Queen);
        assert_eq!(Piece::B_QUEEN.color(), Color::Black);
        assert!(Piece::NONE.is_none());
        assert!(!Piece::W_KING.is_none());
    }

    #[test]
    fn test_piece_invalid_type_code() {
        // 駒種7は存在しない
        assert_eq!(PieceType::from_u8(7), None);
        assert_eq!(Piece::from_bits(0xE).piece_type(), PieceType::None);
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(Piece::W_KNIGHT.to_char(), 'N');
        assert_eq!(Piece::B_BISHOP.to_char(), 'b');
        assert_eq!(Piece::from_char('Q'), Some(Piece::W_QUEEN));
        assert_eq!(Piece::from_char('k'), Some(Piece::B_KING));
        assert_eq!(Piece::from_char('x'), None);
    }
}
