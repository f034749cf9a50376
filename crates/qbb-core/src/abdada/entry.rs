//! ABDADAテーブルのエントリ
//!
//! 4つのアトミックワードで構成する。
//!
//! ```text
//! key  = hash ^ data               （破れた読み取りの検出用）
//! data = 0 - 29  最善手（30bit形式）
//!        30 - 31 Bound
//!        32 - 39 深さ
//!        48 - 63 スコア（符号付き16bit）
//! lock = 64bitトークン（0 = 空き）
//! meta =  0 - 31 トークン下位32bit（どの排他の申告か）
//!        32 - 39 探索深さ
//!        40 - 47 ply
//! ```
//!
//! どのワードもアトミックなload/store/CASでのみ更新する。

use crate::types::{Bound, Score, TtMove};
use crate::util::sync_compat::AtomicU64;

const BOUND_SHIFT: u32 = 30;
const DEPTH_SHIFT: u32 = 32;
const SCORE_SHIFT: u32 = 48;

const META_TAG_MASK: u64 = 0xFFFF_FFFF;
const META_DEPTH_SHIFT: u32 = 32;
const META_PLY_SHIFT: u32 = 40;

/// エントリ本体
pub(crate) struct AbdadaEntry {
    pub(crate) key: AtomicU64,
    pub(crate) data: AtomicU64,
    pub(crate) lock: AtomicU64,
    pub(crate) meta: AtomicU64,
}

impl AbdadaEntry {
    pub(crate) fn new() -> Self {
        Self {
            key: AtomicU64::new(0),
            data: AtomicU64::new(0),
            lock: AtomicU64::new(0),
            meta: AtomicU64::new(0),
        }
    }
}

/// 探索結果をdataワードに詰める
#[inline]
pub(crate) const fn pack_data(mv: TtMove, score: Score, bound: Bound, depth: u8) -> u64 {
    (mv as u64 & 0x3FFF_FFFF)
        | (bound as u64) << BOUND_SHIFT
        | (depth as u64) << DEPTH_SHIFT
        | ((score.raw() as u16) as u64) << SCORE_SHIFT
}

/// dataワードを展開する（Bound=3の不正値はNone）
#[inline]
pub(crate) const fn unpack_data(data: u64) -> Option<(TtMove, Score, Bound, u8)> {
    let bound = match Bound::from_u8(((data >> BOUND_SHIFT) & 0x3) as u8) {
        Some(b) => b,
        None => return None,
    };
    let mv = (data & 0x3FFF_FFFF) as TtMove;
    let depth = ((data >> DEPTH_SHIFT) & 0xFF) as u8;
    let score = Score::new(((data >> SCORE_SHIFT) & 0xFFFF) as u16 as i16);
    Some((mv, score, bound, depth))
}

/// metaワードを組み立てる
///
/// 下位32bitはトークンの下位32bit（どの排他の申告かの照合用）。
#[inline]
pub(crate) const fn pack_meta(token: u64, ply: u8, depth: u8) -> u64 {
    (token & META_TAG_MASK)
        | (depth as u64) << META_DEPTH_SHIFT
        | (ply as u64) << META_PLY_SHIFT
}

/// 排他の申告内容（ply, 深さ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClaimMeta {
    pub(crate) ply: u8,
    pub(crate) depth: u8,
}

impl ClaimMeta {
    /// `token` の排他が書いたmetaなら展開する（まだ書かれていなければNone）
    #[inline]
    pub(crate) const fn for_token(meta: u64, token: u64) -> Option<ClaimMeta> {
        if meta & META_TAG_MASK != token & META_TAG_MASK {
            return None;
        }
        Some(ClaimMeta {
            ply: ((meta >> META_PLY_SHIFT) & 0xFF) as u8,
            depth: ((meta >> META_DEPTH_SHIFT) & 0xFF) as u8,
        })
    }
}

/// lockワードが `depth` 以上の生きた排他か
///
/// 取得直後でmetaが未公開の排他は深さが分からないため、生きた深い排他として扱う。
/// 照合するのはスロットだけで、どの局面の排他かは問わない。
#[inline]
pub(crate) const fn lock_covers(lock: u64, meta: u64, depth: u8) -> bool {
    if lock == 0 {
        return false;
    }
    match ClaimMeta::for_token(meta, lock) {
        Some(m) => m.depth >= depth,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_packing() {
        let data = pack_data(0x2ABC_DEF1, Score::new(-321), Bound::FailHigh, 17);
        let (mv, score, bound, depth) = unpack_data(data).unwrap();
        assert_eq!(mv, 0x2ABC_DEF1);
        assert_eq!(score, Score::new(-321));
        assert_eq!(bound, Bound::FailHigh);
        assert_eq!(depth, 17);

        // Bound=3 は不正
        assert!(unpack_data(3 << BOUND_SHIFT).is_none());
    }

    #[test]
    fn test_meta_matches_token() {
        let token = 0x0000_0001_DEAD_BEEF;
        let meta = pack_meta(token, 12, 9);
        assert_eq!(ClaimMeta::for_token(meta, token), Some(ClaimMeta { ply: 12, depth: 9 }));
        // 別の排他のmetaは読まない
        assert_eq!(ClaimMeta::for_token(meta, token + 1), None);
    }

    #[test]
    fn test_lock_covers() {
        let token = 77;
        let meta = pack_meta(token, 3, 9);
        assert!(lock_covers(token, meta, 9));
        assert!(lock_covers(token, meta, 3));
        assert!(!lock_covers(token, meta, 10));
        // 空きスロットは何も覆わない
        assert!(!lock_covers(0, meta, 0));
        // metaが未公開なら深さに関係なく覆う
        assert!(lock_covers(token, pack_meta(token - 1, 0, 0), u8::MAX));
    }
}
