//! 局面表現（Board）
//!
//! 7ワードのquad-bitboard。4枚のビットボードで各升の4bit駒コードを縦に持ち、
//! 残りの3ワードにキャスリング用の移動済みフラグ、Zobristハッシュ、
//! 直前の指し手（アンパッサン対象升、指した側、ハーフムーブクロックを含む）を置く。
//!
//! 手番は盤面に持たない。呼び出し側が管理し、ハッシュにだけ反映される。

mod attacks;
mod fen;
mod make_move;
mod zobrist;

pub use fen::{FenError, STARTPOS_FEN};
pub use zobrist::{zobrist_castle, zobrist_ep, zobrist_psq, zobrist_side};

use crate::bitboard::Bitboard;
use crate::types::moves::SM_MOVE;
use crate::types::{Color, Move, Piece, PieceType, Square};

/// 黒の駒がある升
pub const QBB_BLACK: usize = 0;
/// 駒種bit0
pub const QBB_P1: usize = 1;
/// 駒種bit1
pub const QBB_P2: usize = 2;
/// 駒種bit2
pub const QBB_P3: usize = 3;
/// 移動済みフラグ
pub const QBB_PMVD: usize = 4;
/// Zobristハッシュ
pub const QBB_HASH: usize = 5;
/// 直前の指し手 + ハーフムーブクロック
pub const QBB_LAST: usize = 6;

/// ハッシュの予約値（置換表で空きを表す）
pub const HASH_NONE: u64 = 0;

/// キャスリング権に関わる升（e1|h1 など）
pub const SMCR_WHITE_K: u64 = 0x0000_0000_0000_0090;
pub const SMCR_WHITE_Q: u64 = 0x0000_0000_0000_0011;
pub const SMCR_BLACK_K: u64 = 0x9000_0000_0000_0000;
pub const SMCR_BLACK_Q: u64 = 0x1100_0000_0000_0000;

const HMC_SHIFT: u32 = 40;
/// 補助ワード: 直前に指した（パスを含む）側が記録されている
const AUX_MOVER_KNOWN: u64 = 1 << 38;
/// 補助ワード: 直前に指した側が黒
const AUX_MOVER_BLACK: u64 = 1 << 39;

/// キャスリング権（4bit）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const WHITE_K: CastleRights = CastleRights(1);
    pub const WHITE_Q: CastleRights = CastleRights(2);
    pub const BLACK_K: CastleRights = CastleRights(4);
    pub const BLACK_Q: CastleRights = CastleRights(8);
    pub const ALL: CastleRights = CastleRights(15);

    /// 権利ごとの移動済みマスク（bit順）
    const MASKS: [u64; 4] = [SMCR_WHITE_K, SMCR_WHITE_Q, SMCR_BLACK_K, SMCR_BLACK_Q];

    /// 移動済みワードから導出
    #[inline]
    pub const fn from_moved(moved: u64) -> CastleRights {
        let mut bits = 0u8;
        let mut i = 0;
        while i < 4 {
            let mask = Self::MASKS[i];
            if moved & mask == 0 {
                bits |= 1 << i;
            }
            i += 1;
        }
        CastleRights(bits)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 手番側のキングサイド/クイーンサイド
    #[inline]
    pub const fn for_side(color: Color, kingside: bool) -> CastleRights {
        match (color, kingside) {
            (Color::White, true) => Self::WHITE_K,
            (Color::White, false) => Self::WHITE_Q,
            (Color::Black, true) => Self::BLACK_K,
            (Color::Black, false) => Self::BLACK_Q,
        }
    }

    /// その権利を保持するために未移動であるべき升
    #[inline]
    pub const fn moved_mask(self) -> u64 {
        let mut mask = 0;
        let mut i = 0;
        while i < 4 {
            if self.0 & (1 << i) != 0 {
                mask |= Self::MASKS[i];
            }
            i += 1;
        }
        mask
    }
}

/// undo_moveに渡す局面情報のスナップショット
///
/// do_moveの前に `Board::undo_state()` で取得し、そのままundo_moveに返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    /// 移動済みフラグのワード（キャスリング権はここから導出される）
    pub cr: u64,
    /// Zobristハッシュ
    pub hash: u64,
    /// 直前の指し手とハーフムーブクロックを含む補助ワード
    pub last: u64,
}

/// 局面
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([u64; 7]);

impl Board {
    /// 空の盤面（ハッシュも0）
    pub const fn empty() -> Board {
        Board([0; 7])
    }

    // ---------------------------------------------------------------
    // 駒の配置
    // ---------------------------------------------------------------

    /// 升の駒コード
    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Piece {
        let s = sq.raw() as u32;
        let code = ((self.0[QBB_BLACK] >> s) & 1)
            | ((self.0[QBB_P1] >> s) & 1) << 1
            | ((self.0[QBB_P2] >> s) & 1) << 2
            | ((self.0[QBB_P3] >> s) & 1) << 3;
        Piece::from_bits(code)
    }

    /// 升を空にする（ハッシュは更新しない）
    #[inline]
    pub(crate) fn clear_square(&mut self, sq: Square) {
        let mask = !sq.bb();
        self.0[QBB_BLACK] &= mask;
        self.0[QBB_P1] &= mask;
        self.0[QBB_P2] &= mask;
        self.0[QBB_P3] &= mask;
    }

    /// 升に駒を置く（ハッシュは更新しない、既存の駒は上書き）
    #[inline]
    pub(crate) fn set_square(&mut self, sq: Square, pc: Piece) {
        self.clear_square(sq);
        let s = sq.raw() as u32;
        let code = pc.raw() as u64;
        self.0[QBB_BLACK] |= (code & 1) << s;
        self.0[QBB_P1] |= ((code >> 1) & 1) << s;
        self.0[QBB_P2] |= ((code >> 2) & 1) << s;
        self.0[QBB_P3] |= ((code >> 3) & 1) << s;
    }

    /// 駒を置く（局面の組み立て用、ハッシュは `refresh_hash` で再計算する）
    pub fn put_piece(&mut self, sq: Square, pc: Piece) {
        if pc.is_none() {
            self.clear_square(sq);
        } else {
            self.set_square(sq, pc);
        }
    }

    /// 駒のある升
    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        self.0[QBB_P1] | self.0[QBB_P2] | self.0[QBB_P3]
    }

    /// 指定した手番の駒のある升
    #[inline]
    pub const fn color_bb(&self, c: Color) -> Bitboard {
        match c {
            Color::White => self.occupied() & !self.0[QBB_BLACK],
            Color::Black => self.0[QBB_BLACK],
        }
    }

    /// 駒種のある升（両手番）
    #[inline]
    pub const fn type_bb(&self, pt: PieceType) -> Bitboard {
        let p1 = self.0[QBB_P1];
        let p2 = self.0[QBB_P2];
        let p3 = self.0[QBB_P3];
        match pt {
            PieceType::None => !(p1 | p2 | p3),
            PieceType::Pawn => p1 & !p2 & !p3,
            PieceType::Knight => !p1 & p2 & !p3,
            PieceType::King => p1 & p2 & !p3,
            PieceType::Bishop => !p1 & !p2 & p3,
            PieceType::Rook => p1 & !p2 & p3,
            PieceType::Queen => !p1 & p2 & p3,
        }
    }

    /// 手番と駒種で絞った升
    #[inline]
    pub const fn pieces(&self, c: Color, pt: PieceType) -> Bitboard {
        self.type_bb(pt) & self.color_bb(c)
    }

    /// 駒種7（不正コード）の升
    #[inline]
    pub(crate) const fn invalid_code_bb(&self) -> Bitboard {
        self.0[QBB_P1] & self.0[QBB_P2] & self.0[QBB_P3]
    }

    // ---------------------------------------------------------------
    // 補助ワード
    // ---------------------------------------------------------------

    /// 移動済みフラグのワード
    #[inline]
    pub const fn moved(&self) -> u64 {
        self.0[QBB_PMVD]
    }

    /// 現在のキャスリング権
    #[inline]
    pub const fn castle_rights(&self) -> CastleRights {
        CastleRights::from_moved(self.0[QBB_PMVD])
    }

    /// 差分更新されたハッシュ
    #[inline]
    pub const fn hash(&self) -> u64 {
        self.0[QBB_HASH]
    }

    /// 補助ワード（直前の指し手 + ハーフムーブクロック）
    #[inline]
    pub const fn last(&self) -> u64 {
        self.0[QBB_LAST]
    }

    /// 直前の指し手（クロック・スコアを除く）
    #[inline]
    pub const fn last_move(&self) -> Move {
        Move::from_raw(self.0[QBB_LAST] & SM_MOVE)
    }

    /// 直前に指した側（パスを含む）
    ///
    /// FENから作った局面では手番でない側。駒を直接置いて組み立てた局面ではNone。
    #[inline]
    pub const fn last_mover(&self) -> Option<Color> {
        let aux = self.0[QBB_LAST];
        if aux & AUX_MOVER_KNOWN == 0 {
            None
        } else if aux & AUX_MOVER_BLACK != 0 {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    /// アンパッサン対象升
    #[inline]
    pub const fn ep_target(&self) -> Option<Square> {
        self.last_move().ep_target()
    }

    /// ハーフムーブクロック
    #[inline]
    pub const fn halfmove_clock(&self) -> u8 {
        ((self.0[QBB_LAST] >> HMC_SHIFT) & 0xFF) as u8
    }

    /// undo_move用のスナップショット
    #[inline]
    pub const fn undo_state(&self) -> UndoState {
        UndoState { cr: self.0[QBB_PMVD], hash: self.0[QBB_HASH], last: self.0[QBB_LAST] }
    }

    #[inline]
    pub(crate) fn set_moved(&mut self, moved: u64) {
        self.0[QBB_PMVD] = moved;
    }

    #[inline]
    pub(crate) fn set_hash(&mut self, hash: u64) {
        self.0[QBB_HASH] = hash;
    }

    #[inline]
    pub(crate) fn set_last(&mut self, mv: Move, hmc: u8, mover: Option<Color>) {
        let mover_bits = match mover {
            Some(Color::White) => AUX_MOVER_KNOWN,
            Some(Color::Black) => AUX_MOVER_KNOWN | AUX_MOVER_BLACK,
            None => 0,
        };
        self.0[QBB_LAST] = mv.board_part() | mover_bits | (hmc as u64) << HMC_SHIFT;
    }
}

impl std::fmt::Debug for Board {
    /// 8段の盤面図と補助ワード
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let pc = self.piece_at(Square::new(file, rank));
                let c = if pc.is_none() { '.' } else { pc.to_char() };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "moved={:#018x} hash={:#018x} last={:#018x}",
            self.0[QBB_PMVD], self.0[QBB_HASH], self.0[QBB_LAST]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_read_piece() {
        let mut b = Board::empty();
        b.put_piece(Square::E4, Piece::B_QUEEN);
        b.put_piece(Square::A1, Piece::W_ROOK);
        assert_eq!(b.piece_at(Square::E4), Piece::B_QUEEN);
        assert_eq!(b.piece_at(Square::A1), Piece::W_ROOK);
        assert_eq!(b.piece_at(Square::H8), Piece::NONE);
        assert_eq!(b.occupied(), Square::E4.bb() | Square::A1.bb());
        assert_eq!(b.color_bb(Color::Black), Square::E4.bb());
        assert_eq!(b.pieces(Color::White, PieceType::Rook), Square::A1.bb());
        assert_eq!(b.pieces(Color::Black, PieceType::Rook), 0);

        // 上書き
        b.put_piece(Square::E4, Piece::W_KNIGHT);
        assert_eq!(b.piece_at(Square::E4), Piece::W_KNIGHT);
        assert_eq!(b.color_bb(Color::Black), 0);

        b.put_piece(Square::E4, Piece::NONE);
        assert_eq!(b.occupied(), Square::A1.bb());
    }

    #[test]
    fn test_type_bitboards_disjoint() {
        let (b, _) = Board::from_fen(STARTPOS_FEN).unwrap();
        let mut seen = 0u64;
        for pt in PieceType::ALL {
            let bb = b.type_bb(pt);
            assert_eq!(seen & bb, 0, "{pt:?}");
            seen |= bb;
        }
        assert_eq!(seen, b.occupied());
        assert_eq!(b.invalid_code_bb(), 0);
    }

    #[test]
    fn test_castle_rights_from_moved() {
        assert_eq!(CastleRights::from_moved(0), CastleRights::ALL);
        // e1 が動けば白の両方を失う
        let cr = CastleRights::from_moved(Square::E1.bb());
        assert!(!cr.contains(CastleRights::WHITE_K));
        assert!(!cr.contains(CastleRights::WHITE_Q));
        assert!(cr.contains(CastleRights::BLACK_K.union(CastleRights::BLACK_Q)));
        // h8 だけならブラックのキングサイドのみ
        let cr = CastleRights::from_moved(Square::H8.bb());
        assert_eq!(cr, CastleRights(0b1011));
        assert_eq!(CastleRights::WHITE_K.moved_mask(), SMCR_WHITE_K);
        assert_eq!(CastleRights::ALL.moved_mask().count_ones(), 6);
    }

    #[test]
    fn test_undo_state_snapshot() {
        let (b, _) = Board::from_fen(STARTPOS_FEN).unwrap();
        let st = b.undo_state();
        assert_eq!(st.cr, b.moved());
        assert_eq!(st.hash, b.hash());
        assert_eq!(st.last, b.last());
        assert_eq!(b.halfmove_clock(), 0);
        assert_eq!(b.ep_target(), None);
    }
}
