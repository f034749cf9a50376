//! 指し手の適用と取り消し
//!
//! do_moveはハッシュを差分更新し、undo_moveはスナップショットから補助ワードを
//! 書き戻す。両者の組は盤面をビット単位で元に戻す。

use super::zobrist::{zobrist_castle, zobrist_ep, zobrist_psq, zobrist_side};
use super::{Board, QBB_LAST, UndoState};
use crate::types::{Color, Move, Piece, PieceType, Square};

/// キャスリングでのルークの移動元・移動先
#[inline]
pub(crate) fn castle_rook_squares(king_from: Square, kingside: bool) -> (Square, Square) {
    let rank = king_from.rank();
    if kingside {
        (Square::new(7, rank), Square::new(5, rank))
    } else {
        (Square::new(0, rank), Square::new(3, rank))
    }
}

impl Board {
    /// 指し手を適用する
    ///
    /// `Move::NONE` は何もしない。`Move::NULL` はパス（手番とクロックのみ進める）。
    /// 盤面と整合しない指し手を渡した場合の結果は未定義。
    pub fn do_move(&mut self, mv: Move) {
        if mv.is_none() {
            return;
        }
        if mv.is_null() {
            self.do_null_move();
            return;
        }

        let from = mv.from();
        let to = mv.to();
        let cpt = mv.capture_square();
        let pfrom = mv.piece_from();
        let pto = mv.piece_to();
        let pcpt = mv.piece_captured();

        let mut hash = self.hash();
        hash ^= zobrist_castle(self.castle_rights());
        if let Some(ep) = self.ep_target() {
            hash ^= zobrist_ep(ep);
        }

        self.clear_square(from);
        hash ^= zobrist_psq(pfrom, from);

        if !pcpt.is_none() {
            self.clear_square(cpt);
            hash ^= zobrist_psq(pcpt, cpt);
        }

        self.set_square(to, pto);
        hash ^= zobrist_psq(pto, to);

        let mut moved = from.bb() | to.bb() | cpt.bb();

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(from, mv.is_castle_kingside());
            let rook = Piece::new(PieceType::Rook, pfrom.color());
            self.clear_square(rook_from);
            self.set_square(rook_to, rook);
            hash ^= zobrist_psq(rook, rook_from) ^ zobrist_psq(rook, rook_to);
            moved |= rook_from.bb() | rook_to.bb();
        }

        self.set_moved(self.moved() | moved);
        hash ^= zobrist_castle(self.castle_rights());
        if let Some(ep) = mv.ep_target() {
            hash ^= zobrist_ep(ep);
        }
        hash ^= zobrist_side();
        self.set_hash(hash);

        let hmc = if pfrom.is(PieceType::Pawn) || !pcpt.is_none() {
            0
        } else {
            self.halfmove_clock().saturating_add(1)
        };
        self.set_last(mv, hmc, Some(pfrom.color()));
    }

    /// パス（ヌルムーブ）
    ///
    /// 駒は動かさず、アンパッサン対象升を消して手番を入れ替える。
    /// パスした側は直前に指した側の相手として記録し、`is_valid` で王手放置を検出できるようにする。
    pub fn do_null_move(&mut self) {
        let passer = self.last_mover().map(Color::opponent);
        let mut hash = self.hash();
        if let Some(ep) = self.ep_target() {
            hash ^= zobrist_ep(ep);
        }
        hash ^= zobrist_side();
        self.set_hash(hash);
        let hmc = self.halfmove_clock().saturating_add(1);
        self.set_last(Move::NULL, hmc, passer);
    }

    /// do_moveを取り消す
    ///
    /// `cr`, `hash`, `last` はdo_moveの直前に `undo_state()` で取得した値。
    pub fn undo_move(&mut self, mv: Move, cr: u64, hash: u64, last: u64) {
        if mv.is_none() {
            return;
        }
        if !mv.is_null() {
            let from = mv.from();
            let to = mv.to();
            let pcpt = mv.piece_captured();

            self.clear_square(to);
            if mv.is_castle() {
                let (rook_from, rook_to) = castle_rook_squares(from, mv.is_castle_kingside());
                self.clear_square(rook_to);
                self.set_square(rook_from, Piece::new(PieceType::Rook, mv.piece_from().color()));
            }
            self.set_square(from, mv.piece_from());
            if !pcpt.is_none() {
                self.set_square(mv.capture_square(), pcpt);
            }
        }
        self.set_moved(cr);
        self.set_hash(hash);
        self.0[QBB_LAST] = last;
    }

    /// `UndoState` を使ってdo_moveを取り消す
    #[inline]
    pub fn undo_move_with(&mut self, mv: Move, st: UndoState) {
        self.undo_move(mv, st.cr, st.hash, st.last);
    }
}
