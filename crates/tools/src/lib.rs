//! qbb-core 用の検証ハーネス
//!
//! - `stress`: 複数ワーカーでABDADAテーブルを共有する木探索のストレステスト

pub mod stress;
