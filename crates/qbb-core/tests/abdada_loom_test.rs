//! ABDADAテーブルのloomモデル検査
//!
//! `cargo test --features loom --test abdada_loom_test` で実行する。

#![cfg(all(feature = "loom", not(target_arch = "wasm32")))]

use loom::sync::atomic::{AtomicUsize, Ordering};
use qbb_core::abdada::{AbdadaTable, Claim};
use qbb_core::util::sync_compat::{Arc, thread};
use qbb_core::{Bound, Move, Score};

/// 同じ深さで取り合うと、同時に排他を持つワーカーは高々1つ
#[test]
fn test_claim_is_exclusive_loom() {
    loom::model(|| {
        let table = Arc::new(AbdadaTable::with_slots(1));
        let holders = Arc::new(AtomicUsize::new(0));
        let hash = 0x1234_5678_9ABC_DEF0;

        let handles: Vec<_> = (0..2u8)
            .map(|ply| {
                let table = Arc::clone(&table);
                let holders = Arc::clone(&holders);
                thread::spawn(move || {
                    if let Claim::Acquired(token) = table.try_claim(hash, ply, 5) {
                        let prev = holders.fetch_add(1, Ordering::SeqCst);
                        assert_eq!(prev, 0, "two live claims on one position");
                        holders.fetch_sub(1, Ordering::SeqCst);
                        assert!(table.release(hash, token));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert!(!table.is_busy(hash, 0));
    });
}

/// 深い探索による上書きと古いトークンの解放が競合しても、
/// 他人の排他を消すことはなく、最後は空に戻る
#[test]
fn test_stale_release_never_clears_other_claim_loom() {
    loom::model(|| {
        let table = Arc::new(AbdadaTable::with_slots(1));
        let hash = 0x0F0F_0F0F_0F0F_0F0F;

        let handles: Vec<_> = [4u8, 6u8]
            .into_iter()
            .map(|depth| {
                let table = Arc::clone(&table);
                thread::spawn(move || match table.try_claim(hash, 0, depth) {
                    Claim::Acquired(token) => {
                        table.release(hash, token);
                        1u64
                    }
                    Claim::Deferred => 0,
                })
            })
            .collect();

        let mut acquired = 0;
        for h in handles {
            acquired += h.join().unwrap();
        }

        let s = table.stats();
        assert_eq!(s.claims, acquired);
        assert_eq!(s.releases + s.stale_releases, acquired);
        assert_eq!(s.superseded, s.stale_releases);
        assert!(!table.is_busy(hash, 0));
    });
}

/// 書き込みと読み出しが競合しても、読めた結果は書き手のどちらかのもの
#[test]
fn test_probe_store_race_loom() {
    loom::model(|| {
        let table = Arc::new(AbdadaTable::with_slots(1));
        let hash = 0x00C0_FFEE_0000_0001;
        let other = hash ^ (1 << 40);

        let writer = {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                table.store(hash, Move::from_tt_move(1), Score::new(10), Bound::Exact, 3);
            })
        };
        let evictor = {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                table.store(other, Move::from_tt_move(2), Score::new(20), Bound::FailHigh, 1);
            })
        };

        if let Some(p) = table.probe(hash) {
            assert_eq!(p.best_move, 1);
            assert_eq!(p.score, Score::new(10));
            assert_eq!(p.bound, Bound::Exact);
            assert_eq!(p.depth, 3);
        }

        writer.join().unwrap();
        evictor.join().unwrap();
    });
}
