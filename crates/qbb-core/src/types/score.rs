//! 評価値（Score）
//!
//! 置換表にそのまま格納できるよう符号付き16bitで持つ。
//! `(MATE, INF)` の開区間を詰みスコアとして予約している。

/// 評価値
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(i16);

impl Score {
    /// ゼロ
    pub const ZERO: Score = Score(0);
    /// 詰みスコアの下限（これより大きく INF 未満なら詰み）
    pub const MATE: Score = Score(30000);
    /// 無限大（探索窓の初期値）
    pub const INF: Score = Score(32000);

    /// 値から生成
    #[inline]
    pub const fn new(v: i16) -> Score {
        Score(v)
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// ply手で詰ますスコア
    #[inline]
    pub const fn mate_in(ply: i16) -> Score {
        Score(Self::INF.0 - ply)
    }

    /// ply手で詰まされるスコア
    #[inline]
    pub const fn mated_in(ply: i16) -> Score {
        Score(-Self::INF.0 + ply)
    }

    /// 詰みスコアかどうか
    #[inline]
    pub const fn is_mate(self) -> bool {
        (self.0 > Self::MATE.0 && self.0 < Self::INF.0)
            || (self.0 < -Self::MATE.0 && self.0 > -Self::INF.0)
    }

    /// ±INF かどうか
    #[inline]
    pub const fn is_inf(self) -> bool {
        self.0 == Self::INF.0 || self.0 == -Self::INF.0
    }
}

impl std::ops::Neg for Score {
    type Output = Score;

    #[inline]
    fn neg(self) -> Score {
        Score(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_constants() {
        assert_eq!(Score::ZERO.raw(), 0);
        assert_eq!(Score::MATE.raw(), 30000);
        assert_eq!(Score::INF.raw(), 32000);
    }

    #[test]
    fn test_score_mate() {
        assert!(Score::mate_in(5).is_mate());
        assert!(Score::mated_in(3).is_mate());
        assert!(!Score::INF.is_mate());
        assert!(Score::INF.is_inf());
        assert!((-Score::INF).is_inf());
        assert!(!Score::new(250).is_mate());
    }

    #[test]
    fn test_score_ordering() {
        assert!(Score::mate_in(1) > Score::mate_in(10));
        assert!(Score::mated_in(10) > Score::mated_in(1));
        assert_eq!(-Score::new(100), Score::new(-100));
    }
}
