//! 境界値種別（Bound）

use serde::{Deserialize, Serialize};

use super::Score;

/// 置換表に格納するスコアの種類（2bit）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bound {
    /// 上界（fail-low: 真の値はこれ以下）
    #[default]
    FailLow = 0,
    /// 下界（fail-high: 真の値はこれ以上）
    FailHigh = 1,
    /// 正確な値
    Exact = 2,
}

impl Bound {
    /// u8から変換（下位2bitのみ参照、3は不正）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<Bound> {
        match n & 0x3 {
            0 => Some(Bound::FailLow),
            1 => Some(Bound::FailHigh),
            2 => Some(Bound::Exact),
            _ => None,
        }
    }

    /// TTカットオフ判定に使用
    #[inline]
    pub const fn can_cutoff(self, score: Score, alpha: Score, beta: Score) -> bool {
        match self {
            Bound::Exact => true,
            Bound::FailHigh => score.raw() >= beta.raw(),
            Bound::FailLow => score.raw() <= alpha.raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_from_u8() {
        assert_eq!(Bound::from_u8(0), Some(Bound::FailLow));
        assert_eq!(Bound::from_u8(1), Some(Bound::FailHigh));
        assert_eq!(Bound::from_u8(2), Some(Bound::Exact));
        assert_eq!(Bound::from_u8(3), None);
    }

    #[test]
    fn test_bound_can_cutoff() {
        let alpha = Score::new(-50);
        let beta = Score::new(50);

        // Exact は常にカットオフ可能
        assert!(Bound::Exact.can_cutoff(Score::ZERO, alpha, beta));

        // FailHigh: score >= beta でカットオフ
        assert!(Bound::FailHigh.can_cutoff(Score::new(100), alpha, beta));
        assert!(!Bound::FailHigh.can_cutoff(Score::new(30), alpha, beta));

        // FailLow: score <= alpha でカットオフ
        assert!(Bound::FailLow.can_cutoff(Score::new(-80), alpha, beta));
        assert!(!Bound::FailLow.can_cutoff(Score::new(30), alpha, beta));
    }
}
