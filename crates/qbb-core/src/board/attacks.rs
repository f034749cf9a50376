//! 利きの判定と局面の妥当性チェック

use super::Board;
use crate::bitboard::{
    BB_RANK_1, BB_RANK_8, Bitboard, bishop_attacks, king_attacks, knight_attacks, lsb,
    pawn_attacks, rook_attacks,
};
use crate::types::{Color, PieceType, Square};

impl Board {
    /// `by` の駒のうち `sq` に利いているものの集合
    pub fn attackers_to(&self, sq: Square, by: Color) -> Bitboard {
        let occ = self.occupied();
        let them = self.color_bb(by);
        let target = sq.bb();

        // ポーンは逆向きの利きで引く
        let pawns = pawn_attacks(target, by.opponent()) & self.type_bb(PieceType::Pawn);
        let knights = knight_attacks(target) & self.type_bb(PieceType::Knight);
        let kings = king_attacks(target) & self.type_bb(PieceType::King);
        let diag = bishop_attacks(sq, occ)
            & (self.type_bb(PieceType::Bishop) | self.type_bb(PieceType::Queen));
        let ortho = rook_attacks(sq, occ)
            & (self.type_bb(PieceType::Rook) | self.type_bb(PieceType::Queen));

        (pawns | knights | kings | diag | ortho) & them
    }

    /// `sq` が `by` に攻撃されているか
    #[inline]
    pub fn is_square_attacked(&self, by: Color, sq: Square) -> bool {
        self.attackers_to(sq, by) != 0
    }

    /// 玉の位置（玉が無い壊れた局面ではNone）
    #[inline]
    pub fn king_square(&self, side: Color) -> Option<Square> {
        lsb(self.pieces(side, PieceType::King))
    }

    /// `side` の玉に王手がかかっているか
    pub fn in_check(&self, side: Color) -> bool {
        match self.king_square(side) {
            Some(ksq) => self.is_square_attacked(side.opponent(), ksq),
            None => false,
        }
    }

    /// 構造上の不備（無ければNone）
    pub(crate) fn structural_defect(&self) -> Option<&'static str> {
        if self.invalid_code_bb() != 0 {
            return Some("piece type code 7 on board");
        }
        if self.color_bb(Color::Black) & !self.occupied() != 0 {
            return Some("colour bit on an empty square");
        }
        for c in Color::ALL {
            if self.pieces(c, PieceType::King).count_ones() != 1 {
                return Some("each side must have exactly one king");
            }
        }
        if self.type_bb(PieceType::Pawn) & (BB_RANK_1 | BB_RANK_8) != 0 {
            return Some("pawn on the first or last rank");
        }
        None
    }

    /// 局面の妥当性チェック
    ///
    /// 構造上の不備が無く、直前に指した側（パスした側を含む）の玉に利きが無ければtrue。
    /// 疑似合法手を適用した後の合法性判定に使う。
    pub fn is_valid(&self) -> bool {
        if self.structural_defect().is_some() {
            return false;
        }
        match self.last_mover() {
            Some(mover) => !self.in_check(mover),
            None => true,
        }
    }
}
