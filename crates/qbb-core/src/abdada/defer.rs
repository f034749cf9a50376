//! 後回しにした手の保持
//!
//! ABDADAの1巡目で `Claim::Deferred` になった兄弟手を覚えておき、
//! 2巡目でまとめて探索する。

use smallvec::SmallVec;

use crate::types::Move;

/// 1ノードで後回しにする手の典型的な上限（超えたらヒープへ）
const INLINE_DEFERRED: usize = 32;

/// 後回しにした手のリスト（1ノードぶん）
#[derive(Debug, Clone, Default)]
pub struct DeferredMoves {
    moves: SmallVec<[Move; INLINE_DEFERRED]>,
}

impl DeferredMoves {
    pub fn new() -> Self {
        Self::default()
    }

    /// 手を後回しにする
    #[inline]
    pub fn defer(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// 2巡目用に、後回しにした順で取り出す
    pub fn drain(&mut self) -> impl Iterator<Item = Move> + '_ {
        self.moves.drain(..)
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, Square};

    #[test]
    fn test_deferred_order_preserved() {
        let mut d = DeferredMoves::new();
        assert!(d.is_empty());
        let a = Move::quiet(Square::E2, Square::E4, Piece::W_PAWN);
        let b = Move::quiet(Square::B1, Square::new(2, 2), Piece::W_KNIGHT);
        d.defer(a);
        d.defer(b);
        assert_eq!(d.len(), 2);
        let second_pass: Vec<Move> = d.drain().collect();
        assert_eq!(second_pass, vec![a, b]);
        assert!(d.is_empty());
    }

    #[test]
    fn test_spills_beyond_inline_capacity() {
        let mut d = DeferredMoves::new();
        for i in 0..(INLINE_DEFERRED as u8 + 5) {
            d.defer(Move::quiet(Square::new(i % 8, 1), Square::new(i % 8, 2), Piece::W_PAWN));
        }
        assert_eq!(d.len(), INLINE_DEFERRED + 5);
        d.clear();
        assert!(d.is_empty());
    }
}
