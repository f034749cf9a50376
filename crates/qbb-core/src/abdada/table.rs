//! AbdadaTable本体
//!
//! - try_claim/release: 局面単位の排他（トークン照合のCAS）
//! - probe/store: ロックレスな結果共有（XORキーで破れた読み取りを検出）

use super::entry::{AbdadaEntry, lock_covers, pack_data, pack_meta, unpack_data};
use super::stats::{AbdadaStats, AbdadaStatsSnapshot};
use super::{AbdadaProbe, Claim, ClaimToken};
use crate::board::HASH_NONE;
use crate::prefetch::prefetch_line;
use crate::tt::TableConfig;
use crate::types::{Bound, Move, Score};
use crate::util::sync_compat::{AtomicU64, Ordering};

/// MB単位のサイズからスロット数を求める（最小1）
fn slots_for_mb(mb_size: usize) -> usize {
    (mb_size * 1024 * 1024 / std::mem::size_of::<AbdadaEntry>()).max(1)
}

/// 複数ワーカーで共有するABDADAテーブル
///
/// すべての操作は `&self` で行い、ロックを取らない。
pub struct AbdadaTable {
    entries: Box<[AbdadaEntry]>,
    /// 次に払い出すトークンの種
    next_token: AtomicU64,
    stats: AbdadaStats,
}

impl AbdadaTable {
    /// 新しいテーブルを作成（サイズはMB単位）
    pub fn new(mb_size: usize) -> Self {
        let table = Self::with_slots(slots_for_mb(mb_size));
        log::info!("abdada table: {mb_size} MB, {} slots", table.slot_count());
        table
    }

    /// スロット数を直接指定して作成
    pub fn with_slots(slots: usize) -> Self {
        let entries: Vec<AbdadaEntry> = (0..slots.max(1)).map(|_| AbdadaEntry::new()).collect();
        Self {
            entries: entries.into_boxed_slice(),
            next_token: AtomicU64::new(0),
            stats: AbdadaStats::default(),
        }
    }

    /// 設定から作成
    pub fn from_config(config: &TableConfig) -> Self {
        Self::new(config.abdada_mb)
    }

    /// スロット数
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// 全エントリを空にする
    ///
    /// 探索の合間（どのワーカーも排他を持っていないとき）に呼ぶ。
    pub fn clear(&self) {
        for e in self.entries.iter() {
            e.lock.store(0, Ordering::Relaxed);
            e.meta.store(0, Ordering::Relaxed);
            e.data.store(0, Ordering::Relaxed);
            e.key.store(0, Ordering::Relaxed);
        }
        self.stats.reset();
        log::debug!("abdada table cleared ({} slots)", self.entries.len());
    }

    #[inline]
    fn entry(&self, hash: u64) -> &AbdadaEntry {
        &self.entries[(hash % self.entries.len() as u64) as usize]
    }

    /// 0以外の64bitトークンを払い出す（テーブル内で再利用しない）
    #[inline]
    fn fresh_token(&self) -> u64 {
        self.next_token.fetch_add(1, Ordering::Relaxed).wrapping_add(1).max(1)
    }

    /// スロットの排他が `depth` 以上で生きているか
    #[inline]
    fn covered(e: &AbdadaEntry, lock: u64, depth: u8) -> bool {
        lock_covers(lock, e.meta.load(Ordering::Acquire), depth)
    }

    /// 局面の探索権を取りに行く
    ///
    /// スロットに `depth` 以上の生きた排他があれば、どの局面の排他かに関係なくDeferred。
    /// そうでなければ（空き、または浅い排他）観測したlockワードを新しいトークンに
    /// CASで置き換え、成功すればAcquired、他のワーカーに先を越されればDeferred。
    pub fn try_claim(&self, hash: u64, ply: u8, depth: u8) -> Claim {
        let e = self.entry(hash);
        let current = e.lock.load(Ordering::Acquire);
        if Self::covered(e, current, depth) {
            self.stats.record_busy();
            return Claim::Deferred;
        }

        let token = self.fresh_token();
        match e.lock.compare_exchange(current, token, Ordering::AcqRel, Ordering::Acquire) {
            Ok(prev) => {
                e.meta.store(pack_meta(token, ply, depth), Ordering::Release);
                self.stats.record_claim(prev != 0);
                Claim::Acquired(ClaimToken { token, ply, depth })
            }
            Err(_) => {
                self.stats.record_lost_race();
                Claim::Deferred
            }
        }
    }

    /// 探索権を返す
    ///
    /// lockワードがまだ自分のトークンのときだけ0に戻す。
    /// より深い探索に上書きされていた場合は何もせずfalse。
    pub fn release(&self, hash: u64, token: ClaimToken) -> bool {
        let e = self.entry(hash);
        let released = e
            .lock
            .compare_exchange(token.token, 0, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok();
        self.stats.record_release(released);
        released
    }

    /// 排他を取らずに、`hash` のスロットが `depth` 以上で探索中かを調べる
    pub fn is_busy(&self, hash: u64, depth: u8) -> bool {
        let e = self.entry(hash);
        Self::covered(e, e.lock.load(Ordering::Acquire), depth)
    }

    /// 共有された探索結果を読む
    ///
    /// 書き込み途中の破れた読み取りはXORキーが一致せずミスになる。
    pub fn probe(&self, hash: u64) -> Option<AbdadaProbe> {
        if hash == HASH_NONE {
            return None;
        }
        let e = self.entry(hash);
        let key = e.key.load(Ordering::Acquire);
        let data = e.data.load(Ordering::Acquire);
        if key ^ data != hash {
            return None;
        }
        let (best_move, score, bound, depth) = unpack_data(data)?;
        Some(AbdadaProbe { best_move, score, bound, depth })
    }

    /// 探索結果を書き込む（置換規則は逐次版の置換表と同じ）
    pub fn store(&self, hash: u64, mv: Move, score: Score, bound: Bound, depth: u8) -> bool {
        if hash == HASH_NONE {
            return false;
        }
        let e = self.entry(hash);
        let old_data = e.data.load(Ordering::Acquire);
        let old_hash = e.key.load(Ordering::Acquire) ^ old_data;
        let old_depth = ((old_data >> 32) & 0xFF) as u8;
        if old_data != 0 && old_hash == hash && depth < old_depth {
            return false;
        }
        let data = pack_data(mv.to_tt_move(), score, bound, depth);
        e.data.store(data, Ordering::Release);
        e.key.store(hash ^ data, Ordering::Release);
        true
    }

    /// 統計のスナップショット
    pub fn stats(&self) -> AbdadaStatsSnapshot {
        self.stats.snapshot()
    }

    /// 指定ハッシュのエントリをプリフェッチ
    #[inline]
    pub fn prefetch(&self, hash: u64) {
        prefetch_line(self.entry(hash) as *const AbdadaEntry);
    }
}
