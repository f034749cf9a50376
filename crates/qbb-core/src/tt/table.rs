//! TranspositionTable本体
//!
//! - テーブルの確保・リサイズ・クリア
//! - probe/store操作

use super::TableConfig;
use super::entry::TTEntry;
use crate::board::HASH_NONE;
use crate::prefetch::prefetch_line;
use crate::types::{Bound, Move, Score};

/// MB単位のサイズからスロット数を求める（最小1）
fn slots_for_mb(mb_size: usize) -> usize {
    (mb_size * 1024 * 1024 / std::mem::size_of::<TTEntry>()).max(1)
}

/// 置換表
pub struct TranspositionTable {
    /// エントリの配列
    entries: Vec<TTEntry>,
}

impl TranspositionTable {
    /// 新しい置換表を作成（サイズはMB単位）
    pub fn new(mb_size: usize) -> Self {
        let table = Self::with_slots(slots_for_mb(mb_size));
        log::info!("transposition table: {mb_size} MB, {} slots", table.slot_count());
        table
    }

    /// スロット数を直接指定して作成（テスト・小さなテーブル用）
    pub fn with_slots(slots: usize) -> Self {
        Self { entries: vec![TTEntry::EMPTY; slots.max(1)] }
    }

    /// 設定から作成
    pub fn from_config(config: &TableConfig) -> Self {
        Self::new(config.tt_mb)
    }

    /// サイズを変更（内容は失われる）
    pub fn resize(&mut self, mb_size: usize) {
        let new_count = slots_for_mb(mb_size);
        if new_count != self.entries.len() {
            self.entries = vec![TTEntry::EMPTY; new_count];
            log::info!("transposition table resized: {mb_size} MB, {new_count} slots");
        }
    }

    /// クリア
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
        log::debug!("transposition table cleared ({} slots)", self.entries.len());
    }

    /// スロット数
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// 置換表を検索（ハッシュ全体が一致したときのみヒット）
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        if hash == HASH_NONE {
            return None;
        }
        let entry = self.entries[self.index(hash)];
        (entry.hash == hash).then_some(entry)
    }

    /// 探索結果を書き込む
    ///
    /// 置換規則で書き込めなかった場合（同じ局面のより深い結果がある場合）はfalse。
    pub fn store(&mut self, hash: u64, mv: Move, score: Score, bound: Bound, depth: u8) -> bool {
        if hash == HASH_NONE {
            return false;
        }
        let idx = self.index(hash);
        let slot = &mut self.entries[idx];
        if !slot.should_replace(hash, depth) {
            return false;
        }
        *slot = TTEntry { hash, best_move: mv.to_tt_move(), score, bound, depth };
        true
    }

    /// 置換表の使用率を1000分率で返す（先頭1000スロットを標本にする）
    pub fn hashfull(&self) -> usize {
        let sample = self.entries.len().min(1000);
        let used = self.entries.iter().take(sample).filter(|e| !e.is_empty()).count();
        used * 1000 / sample
    }

    /// 指定ハッシュのスロットをプリフェッチ
    #[inline]
    pub fn prefetch(&self, hash: u64) {
        prefetch_line(&self.entries[self.index(hash)] as *const TTEntry);
    }
}
