//! ABDADAテーブルのストレステスト
//!
//! 各ワーカーがルート局面から同じ深さの全幅木を辿る。子局面ごとに探索権を取り、
//! 他のワーカーが探索中なら後回しにして2巡目で処理する。
//! 探索結果は共有テーブルとワーカーごとの置換表の両方に書き込む。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::{Result, bail};
use qbb_core::abdada::{AbdadaStatsSnapshot, AbdadaTable, Claim, DeferredMoves};
use qbb_core::movegen::{MoveList, generate_legal};
use qbb_core::tt::{TableConfig, TranspositionTable};
use qbb_core::{Board, Bound, Color, Move, Score};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

/// ストレステストの設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressConfig {
    pub fen: String,
    pub threads: usize,
    pub depth: u8,
    pub seed: u64,
    pub tables: TableConfig,
}

/// 実行結果（JSONで出力する）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressReport {
    pub config: StressConfig,
    /// 全ワーカーの訪問ノード数の合計
    pub nodes: u64,
    /// 2巡目で処理した手の数
    pub second_pass: u64,
    /// 共有テーブルで打ち切ったノード数
    pub shared_hits: u64,
    /// ワーカーごとの置換表で打ち切ったノード数
    pub local_hits: u64,
    /// 差分ハッシュが全再計算と一致しなかった回数（0でなければ不具合）
    pub hash_mismatches: u64,
    pub elapsed_ms: u64,
    pub abdada: AbdadaStatsSnapshot,
}

#[derive(Default)]
struct Counters {
    nodes: AtomicU64,
    second_pass: AtomicU64,
    shared_hits: AtomicU64,
    local_hits: AtomicU64,
    hash_mismatches: AtomicU64,
}

struct Worker<'a> {
    shared: &'a AbdadaTable,
    local: TranspositionTable,
    counters: &'a Counters,
    rng: Xoshiro256PlusPlus,
}

impl Worker<'_> {
    fn search(&mut self, board: &mut Board, us: Color, depth: u8, ply: u8) {
        self.counters.nodes.fetch_add(1, Ordering::Relaxed);
        if !board.hash_is_consistent(us) {
            self.counters.hash_mismatches.fetch_add(1, Ordering::Relaxed);
        }
        if depth == 0 {
            return;
        }

        let hash = board.hash();
        if self.local.probe(hash).is_some_and(|e| e.depth >= depth) {
            self.counters.local_hits.fetch_add(1, Ordering::Relaxed);
            return;
        }
        if self.shared.probe(hash).is_some_and(|p| p.depth >= depth) {
            self.counters.shared_hits.fetch_add(1, Ordering::Relaxed);
            return;
        }

        let mut moves = MoveList::new();
        generate_legal(board, us, &mut moves);
        // ワーカーごとに順序を変えて同じ部分木で競合させる
        moves.shuffle(&mut self.rng);

        let st = board.undo_state();
        let mut deferred = DeferredMoves::new();
        for (i, &mv) in moves.iter().enumerate() {
            board.do_move(mv);
            let child = board.hash();
            self.shared.prefetch(child);
            if i == 0 {
                // 長男は排他を取らずに探索する
                self.search(board, us.opponent(), depth - 1, ply + 1);
            } else {
                match self.shared.try_claim(child, ply + 1, depth - 1) {
                    Claim::Acquired(token) => {
                        self.search(board, us.opponent(), depth - 1, ply + 1);
                        self.shared.release(child, token);
                    }
                    Claim::Deferred => deferred.defer(mv),
                }
            }
            board.undo_move_with(mv, st);
        }

        for mv in deferred.drain() {
            self.counters.second_pass.fetch_add(1, Ordering::Relaxed);
            board.do_move(mv);
            self.search(board, us.opponent(), depth - 1, ply + 1);
            board.undo_move_with(mv, st);
        }

        let best = moves.first().copied().unwrap_or(Move::NONE);
        let bound = if moves.is_empty() { Bound::Exact } else { Bound::FailHigh };
        self.shared.store(hash, best, Score::ZERO, bound, depth);
        self.local.store(hash, best, Score::ZERO, bound, depth);
    }
}

/// ストレステストを実行する
pub fn run(config: &StressConfig) -> Result<StressReport> {
    if config.threads == 0 {
        bail!("threads must be at least 1");
    }
    let (root, us) = Board::from_fen(&config.fen)?;
    if root.in_check(us.opponent()) {
        bail!("side not to move is in check: {}", config.fen);
    }

    let shared = AbdadaTable::from_config(&config.tables);
    let counters = Counters::default();
    let local_mb = (config.tables.tt_mb / config.threads).max(1);
    log::info!(
        "stress: {} threads, depth {}, local tt {local_mb} MB each",
        config.threads,
        config.depth
    );

    let start = Instant::now();
    std::thread::scope(|s| {
        for id in 0..config.threads {
            let shared = &shared;
            let counters = &counters;
            let seed = config.seed.wrapping_add(id as u64);
            let depth = config.depth;
            s.spawn(move || {
                let mut worker = Worker {
                    shared,
                    local: TranspositionTable::new(local_mb),
                    counters,
                    rng: Xoshiro256PlusPlus::seed_from_u64(seed),
                };
                let mut board = root;
                worker.search(&mut board, us, depth, 0);
                if board != root {
                    counters.hash_mismatches.fetch_add(1, Ordering::Relaxed);
                    log::warn!("worker {id}: board not restored after search");
                }
                log::debug!("worker {id} finished");
            });
        }
    });
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let report = StressReport {
        config: config.clone(),
        nodes: counters.nodes.load(Ordering::Relaxed),
        second_pass: counters.second_pass.load(Ordering::Relaxed),
        shared_hits: counters.shared_hits.load(Ordering::Relaxed),
        local_hits: counters.local_hits.load(Ordering::Relaxed),
        hash_mismatches: counters.hash_mismatches.load(Ordering::Relaxed),
        elapsed_ms,
        abdada: shared.stats(),
    };
    if report.abdada.claims != report.abdada.releases + report.abdada.stale_releases {
        log::warn!("unbalanced claims: {:?}", report.abdada);
    }
    Ok(report)
}
