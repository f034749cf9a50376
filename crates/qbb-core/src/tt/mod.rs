//! 置換表モジュール
//!
//! 単一スレッドの探索で使う逐次版の置換表（Transposition Table）。
//!
//! - `TTEntry`: エントリ（ハッシュ全64bitで照合）
//! - `TranspositionTable`: テーブル本体
//! - `TableConfig`: 置換表とABDADAテーブルのサイズ設定
//!
//! インデックスは `hash % スロット数`。置換は深さ優先
//! （空き、別局面、または同じ局面で深さが同じか深い場合に上書き）。

mod entry;
mod table;

pub use entry::TTEntry;
pub use table::TranspositionTable;

use serde::{Deserialize, Serialize};

/// 置換表のデフォルトサイズ（MB）
pub const DEFAULT_TT_MB: usize = 16;
/// ABDADAテーブルのデフォルトサイズ（MB）
pub const DEFAULT_ABDADA_MB: usize = 4;

/// テーブルサイズ設定（ドライバ側で保存・読み込みする用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// 逐次置換表のサイズ（MB）
    pub tt_mb: usize,
    /// ABDADAテーブルのサイズ（MB）
    pub abdada_mb: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { tt_mb: DEFAULT_TT_MB, abdada_mb: DEFAULT_ABDADA_MB }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_config_serde() {
        let cfg: TableConfig = serde_json::from_str(r#"{"tt_mb": 64}"#).unwrap();
        assert_eq!(cfg.tt_mb, 64);
        assert_eq!(cfg.abdada_mb, DEFAULT_ABDADA_MB);

        let json = serde_json::to_string(&TableConfig::default()).unwrap();
        let back: TableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TableConfig::default());
    }
}
