//! ABDADAテーブルモジュール
//!
//! 複数ワーカーの並列探索で、同じ局面を同時に深く探索しないよう調整する
//! ロックフリーな共有テーブル（ABDADA: Alpha-Bêta Distribué avec Droit d'Aînesse）。
//!
//! - `AbdadaTable::try_claim`: 局面の探索権を取る。スロットに要求以上の深さの
//!   生きた排他があれば `Claim::Deferred` を返し、呼び出し側はその手を
//!   後回しにする（`DeferredMoves`）。
//! - `AbdadaTable::release`: 取得時のトークンと一致するときだけ探索権を返す。
//! - `AbdadaTable::probe` / `store`: 逐次版と同じ置換規則で探索結果を共有する。
//!
//! エントリは4つの64bitアトミックで、ミューテックスは使わない。
//! 排他の判定はスロット単位なので、別局面と衝突した場合は待たされるだけで、
//! 正しさ（探索結果の整合性）には影響しない。
//! トークンは64bitで払い出し、再利用しない。

mod defer;
mod entry;
mod stats;
mod table;

pub use defer::DeferredMoves;
pub use stats::AbdadaStatsSnapshot;
pub use table::AbdadaTable;

use crate::types::{Bound, Move, Score, TtMove};

/// 取得した探索権
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClaimToken {
    pub(crate) token: u64,
    pub(crate) ply: u8,
    pub(crate) depth: u8,
}

impl ClaimToken {
    /// 取得時に申告したply
    #[inline]
    pub const fn ply(self) -> u8 {
        self.ply
    }

    /// 取得時に申告した探索深さ
    #[inline]
    pub const fn depth(self) -> u8 {
        self.depth
    }

    /// lockワードに書いたトークン（ログ・診断用）
    #[inline]
    pub const fn raw(self) -> u64 {
        self.token
    }
}

/// try_claimの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// 探索権を得た。探索後に `release` で返す。
    Acquired(ClaimToken),
    /// 他のワーカーが探索中。この手は後回しにする。
    Deferred,
}

impl Claim {
    #[inline]
    pub const fn is_acquired(&self) -> bool {
        matches!(self, Claim::Acquired(_))
    }

    /// 取得できていればトークン
    #[inline]
    pub const fn token(self) -> Option<ClaimToken> {
        match self {
            Claim::Acquired(t) => Some(t),
            Claim::Deferred => None,
        }
    }
}

/// probeで読んだ探索結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbdadaProbe {
    pub best_move: TtMove,
    pub score: Score,
    pub bound: Bound,
    pub depth: u8,
}

impl AbdadaProbe {
    /// 最善手を `Move` として取得（30bit形式から復元）
    #[inline]
    pub const fn to_move(&self) -> Move {
        Move::from_tt_move(self.best_move)
    }
}
