//! 置換表エントリ

use crate::board::HASH_NONE;
use crate::types::{Bound, Move, Score, TtMove};

/// 置換表エントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TTEntry {
    /// 局面のハッシュ（`HASH_NONE` は空き）
    pub hash: u64,
    /// 最善手（30bit形式）
    pub best_move: TtMove,
    /// スコア
    pub score: Score,
    /// スコアの種類
    pub bound: Bound,
    /// 探索深さ
    pub depth: u8,
}

impl TTEntry {
    /// 空のエントリ
    pub const EMPTY: TTEntry = TTEntry {
        hash: HASH_NONE,
        best_move: 0,
        score: Score::ZERO,
        bound: Bound::FailLow,
        depth: 0,
    };

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.hash == HASH_NONE
    }

    /// 最善手を `Move` として取得（スコア等のフィールドは0）
    #[inline]
    pub const fn to_move(&self) -> Move {
        Move::from_tt_move(self.best_move)
    }

    /// このスロットに `hash` / `depth` の結果を書いてよいか
    #[inline]
    pub const fn should_replace(&self, hash: u64, depth: u8) -> bool {
        self.is_empty() || self.hash != hash || depth >= self.depth
    }
}
