//! ABDADAテーブルの統計
//!
//! カウンタはモデル検査の対象外なので標準ライブラリのアトミックを使う。

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};

#[derive(Default)]
pub(crate) struct AbdadaStats {
    claims: AtomicU64,
    busy: AtomicU64,
    lost_races: AtomicU64,
    superseded: AtomicU64,
    releases: AtomicU64,
    stale_releases: AtomicU64,
}

impl AbdadaStats {
    #[inline]
    pub(crate) fn record_claim(&self, superseded: bool) {
        self.claims.fetch_add(1, Relaxed);
        if superseded {
            self.superseded.fetch_add(1, Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_busy(&self) {
        self.busy.fetch_add(1, Relaxed);
    }

    #[inline]
    pub(crate) fn record_lost_race(&self) {
        self.lost_races.fetch_add(1, Relaxed);
    }

    #[inline]
    pub(crate) fn record_release(&self, released: bool) {
        if released {
            self.releases.fetch_add(1, Relaxed);
        } else {
            self.stale_releases.fetch_add(1, Relaxed);
        }
    }

    pub(crate) fn reset(&self) {
        self.claims.store(0, Relaxed);
        self.busy.store(0, Relaxed);
        self.lost_races.store(0, Relaxed);
        self.superseded.store(0, Relaxed);
        self.releases.store(0, Relaxed);
        self.stale_releases.store(0, Relaxed);
    }

    pub(crate) fn snapshot(&self) -> AbdadaStatsSnapshot {
        AbdadaStatsSnapshot {
            claims: self.claims.load(Relaxed),
            busy: self.busy.load(Relaxed),
            lost_races: self.lost_races.load(Relaxed),
            superseded: self.superseded.load(Relaxed),
            releases: self.releases.load(Relaxed),
            stale_releases: self.stale_releases.load(Relaxed),
        }
    }
}

/// 統計のスナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbdadaStatsSnapshot {
    /// 取得に成功した排他
    pub claims: u64,
    /// 他のワーカーが探索中で待たされた回数
    pub busy: u64,
    /// CASで先を越された回数
    pub lost_races: u64,
    /// 取得時に既存の排他（浅い探索・別局面）を上書きした回数
    pub superseded: u64,
    /// 成功した解放
    pub releases: u64,
    /// 上書き済みで何もしなかった解放
    pub stale_releases: u64,
}

impl AbdadaStatsSnapshot {
    /// 待たされた回数の合計
    pub fn deferrals(&self) -> u64 {
        self.busy + self.lost_races
    }
}
