//! 指し手（Move）
//!
//! 指し手は64bitにパックする。
//!
//! ```text
//!  0 -  5  移動元
//!  6 - 11  移動先
//! 12 - 17  駒を取る升（通常は移動先、アンパッサンのみ異なる）
//! 18 - 21  移動元の駒
//! 22 - 25  移動先の駒（成りの場合は成った後の駒）
//! 26 - 29  取った駒
//! 30 - 35  この手で生じるアンパッサン対象升（0 = なし）
//! 36       キングサイド・キャスリング
//! 37       クイーンサイド・キャスリング
//! 38 - 39  未使用
//! 40 - 47  ハーフムーブクロック（50手ルール）
//! 48 - 63  指し手のスコア（符号付き16bit）
//! ```
//!
//! 値の検証は行わない。範囲外のフィールドを渡すのは呼び出し側の誤り。

use super::{Piece, PieceType, Square};

/// 置換表に格納する指し手（下位30bitのみ）
pub type TtMove = u32;

pub const MOVE_IS_CASTLE: u64 = 0x0000_0030_0000_0000;
pub const MOVE_IS_CASTLE_K: u64 = 0x0000_0010_0000_0000;
pub const MOVE_IS_CASTLE_Q: u64 = 0x0000_0020_0000_0000;

/// 盤面に記録する指し手部分（スコア・クロックを除く）
pub const SM_MOVE: u64 = 0x0000_003F_FFFF_FFFF;
pub const SM_SQ_EP: u64 = 0x0000_000F_C000_0000;
pub const SM_HMC: u64 = 0x0000_FF00_0000_0000;
pub const SM_SCORE: u64 = 0xFFFF_0000_0000_0000;
pub const SM_TT_MOVE: u64 = 0x0000_0000_3FFF_FFFF;

const SQ_EP_SHIFT: u32 = 30;
const HMC_SHIFT: u32 = 40;
const SCORE_SHIFT: u32 = 48;

/// 指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Move(u64);

impl Move {
    /// 指し手なし
    pub const NONE: Move = Move(0);
    /// パス（移動元=移動先=b1、駒フィールドはすべて空）
    pub const NULL: Move = Move(0x41);

    /// 全フィールドを指定して生成
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        capture: Square,
        piece_from: Piece,
        piece_to: Piece,
        piece_captured: Piece,
        ep_target: Option<Square>,
        hmc: u8,
        score: i16,
    ) -> Move {
        let ep = match ep_target {
            Some(sq) => sq.raw() as u64,
            None => 0,
        };
        Move(
            from.raw() as u64
                | (to.raw() as u64) << 6
                | (capture.raw() as u64) << 12
                | (piece_from.raw() as u64) << 18
                | (piece_to.raw() as u64) << 22
                | (piece_captured.raw() as u64) << 26
                | ep << SQ_EP_SHIFT
                | (hmc as u64) << HMC_SHIFT
                | ((score as u16) as u64) << SCORE_SHIFT,
        )
    }

    /// 駒を取らない手（成り・キャスリングなし）
    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Move {
        Move::new(from, to, to, piece, piece, Piece::NONE, None, 0, 0)
    }

    /// 生の64bit値から生成
    #[inline]
    pub const fn from_raw(raw: u64) -> Move {
        Move(raw)
    }

    /// 生の64bit値
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 & SM_TT_MOVE == Move::NULL.0
    }

    /// 移動元
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_bits(self.0)
    }

    /// 移動先
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_bits(self.0 >> 6)
    }

    /// 駒を取る升
    #[inline]
    pub const fn capture_square(self) -> Square {
        Square::from_bits(self.0 >> 12)
    }

    /// 移動元の駒
    #[inline]
    pub const fn piece_from(self) -> Piece {
        Piece::from_bits(self.0 >> 18)
    }

    /// 移動先の駒
    #[inline]
    pub const fn piece_to(self) -> Piece {
        Piece::from_bits(self.0 >> 22)
    }

    /// 取った駒（取らない手ではNONE）
    #[inline]
    pub const fn piece_captured(self) -> Piece {
        Piece::from_bits(self.0 >> 26)
    }

    /// この手で生じるアンパッサン対象升
    #[inline]
    pub const fn ep_target(self) -> Option<Square> {
        let sq = (self.0 >> SQ_EP_SHIFT) & 0x3F;
        if sq == 0 { None } else { Some(Square::from_bits(sq)) }
    }

    /// ハーフムーブクロック
    #[inline]
    pub const fn halfmove_clock(self) -> u8 {
        ((self.0 >> HMC_SHIFT) & 0xFF) as u8
    }

    /// 指し手のスコア（符号付き）
    #[inline]
    pub const fn score(self) -> i16 {
        ((self.0 >> SCORE_SHIFT) & 0xFFFF) as u16 as i16
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        !self.piece_captured().is_none()
    }

    /// 成る手（移動元と移動先で駒種が異なる）
    #[inline]
    pub const fn is_promotion(self) -> bool {
        (self.piece_from().raw() >> 1) != (self.piece_to().raw() >> 1)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.0 & MOVE_IS_CASTLE != 0
    }

    #[inline]
    pub const fn is_castle_kingside(self) -> bool {
        self.0 & MOVE_IS_CASTLE_K != 0
    }

    #[inline]
    pub const fn is_castle_queenside(self) -> bool {
        self.0 & MOVE_IS_CASTLE_Q != 0
    }

    /// アンパッサン対象升を差し替える
    #[inline]
    pub const fn with_ep(self, sq: Option<Square>) -> Move {
        let ep = match sq {
            Some(sq) => sq.raw() as u64,
            None => 0,
        };
        Move((self.0 & !SM_SQ_EP) | (ep << SQ_EP_SHIFT))
    }

    /// ハーフムーブクロックを差し替える
    #[inline]
    pub const fn with_hmc(self, hmc: u8) -> Move {
        Move((self.0 & !SM_HMC) | ((hmc as u64) << HMC_SHIFT))
    }

    /// スコアを差し替える
    #[inline]
    pub const fn with_score(self, score: i16) -> Move {
        Move((self.0 & !SM_SCORE) | (((score as u16) as u64) << SCORE_SHIFT))
    }

    /// キャスリングフラグを立てる
    #[inline]
    pub const fn with_castle(self, kingside: bool) -> Move {
        let flag = if kingside { MOVE_IS_CASTLE_K } else { MOVE_IS_CASTLE_Q };
        Move(self.0 | flag)
    }

    /// 置換表用の30bit形式に切り詰める
    #[inline]
    pub const fn to_tt_move(self) -> TtMove {
        (self.0 & SM_TT_MOVE) as u32
    }

    /// 置換表用の30bit形式から復元（キャスリング等のフラグは失われる）
    #[inline]
    pub const fn from_tt_move(mv: TtMove) -> Move {
        Move(mv as u64 & SM_TT_MOVE)
    }

    /// 升と駒だけを残した形（置換表の指し手と比較する用）
    #[inline]
    pub const fn essential(self) -> Move {
        Move(self.0 & SM_TT_MOVE)
    }

    /// 盤面の補助ワードに記録する部分
    #[inline]
    pub const fn board_part(self) -> u64 {
        self.0 & SM_MOVE
    }
}

impl std::fmt::Display for Move {
    /// 長い代数表記（"e2e4", "e7e8q"）。NONE は "0000"。
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() || self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if self.is_promotion() && self.piece_to().piece_type() != PieceType::None {
            write!(f, "{}", self.piece_to().piece_type().to_char())?;
        }
        Ok(())
    }
}
