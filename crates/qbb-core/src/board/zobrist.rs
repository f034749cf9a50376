//! Zobristハッシュ

use super::{Board, CastleRights};
use crate::bitboard::squares;
use crate::types::{Color, Piece, Square};

/// Zobristハッシュ用乱数テーブル
pub struct Zobrist {
    /// 手番用（黒番のときにXORする）
    pub side: u64,
    /// 駒×升 [Piece.index()][Square.index()]
    pub psq: [[u64; Square::NUM]; Piece::NUM],
    /// キャスリング権 [WHITE_K, WHITE_Q, BLACK_K, BLACK_Q]
    pub castle: [u64; 4],
    /// アンパッサン対象升の筋
    pub ep: [u64; 8],
}

impl Zobrist {
    /// テーブル初期化
    pub const fn init() -> Self {
        let mut zobrist = Zobrist {
            side: 0,
            psq: [[0; Square::NUM]; Piece::NUM],
            castle: [0; 4],
            ep: [0; 8],
        };

        // XorShift64で疑似乱数生成
        let mut seed = 0x9E37_79B9_7F4A_7C15u64;

        seed = xorshift64(seed);
        zobrist.side = seed;

        // 駒×升
        // コード0,1（駒なし）は常に0を保つためスキップ
        let mut pc = 2;
        while pc < Piece::NUM {
            let mut sq = 0;
            while sq < Square::NUM {
                seed = xorshift64(seed);
                zobrist.psq[pc][sq] = seed;
                sq += 1;
            }
            pc += 1;
        }

        let mut i = 0;
        while i < 4 {
            seed = xorshift64(seed);
            zobrist.castle[i] = seed;
            i += 1;
        }

        let mut file = 0;
        while file < 8 {
            seed = xorshift64(seed);
            zobrist.ep[file] = seed;
            file += 1;
        }

        zobrist
    }
}

/// XorShift64疑似乱数生成（const fn対応）
const fn xorshift64(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

/// グローバルZobristテーブル
pub static ZOBRIST: Zobrist = Zobrist::init();

/// 駒と升のハッシュを取得
#[inline]
pub fn zobrist_psq(pc: Piece, sq: Square) -> u64 {
    ZOBRIST.psq[pc.index()][sq.index()]
}

/// 手番のハッシュを取得
#[inline]
pub fn zobrist_side() -> u64 {
    ZOBRIST.side
}

/// 保持しているキャスリング権すべてのハッシュ
#[inline]
pub fn zobrist_castle(cr: CastleRights) -> u64 {
    let mut key = 0;
    for (i, k) in ZOBRIST.castle.iter().enumerate() {
        if cr.raw() & (1 << i) != 0 {
            key ^= k;
        }
    }
    key
}

/// アンパッサン対象升のハッシュ
#[inline]
pub fn zobrist_ep(sq: Square) -> u64 {
    ZOBRIST.ep[sq.file() as usize]
}

impl Board {
    /// ハッシュを一から計算する
    pub fn compute_hash(&self, side_to_move: Color) -> u64 {
        let mut key = 0;
        for sq in squares(self.occupied()) {
            key ^= zobrist_psq(self.piece_at(sq), sq);
        }
        key ^= zobrist_castle(self.castle_rights());
        if let Some(ep) = self.ep_target() {
            key ^= zobrist_ep(ep);
        }
        if side_to_move == Color::Black {
            key ^= zobrist_side();
        }
        key
    }

    /// 差分更新したハッシュが再計算と一致するか
    pub fn hash_is_consistent(&self, side_to_move: Color) -> bool {
        let expected = self.compute_hash(side_to_move);
        if expected != self.hash() {
            log::warn!(
                "hash mismatch: incremental={:#018x} computed={:#018x} last_move={}",
                self.hash(),
                expected,
                self.last_move()
            );
            return false;
        }
        true
    }

    /// ハッシュを再計算して格納する（局面の組み立て後に呼ぶ）
    pub fn refresh_hash(&mut self, side_to_move: Color) {
        let key = self.compute_hash(side_to_move);
        self.set_hash(key);
    }
}
