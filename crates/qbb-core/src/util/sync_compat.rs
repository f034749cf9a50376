//! loomとの切り替え用の同期プリミティブ
//!
//! `loom` フィーチャー有効時はloomの実装を、無効時は標準ライブラリの実装を使う。
//! ABDADAテーブルのエントリはここ経由でアトミックを使うので、
//! 同じコードをloomのモデル検査にかけられる。

// Atomic types
#[cfg(feature = "loom")]
pub use loom::sync::atomic::{AtomicU64, Ordering};

#[cfg(not(feature = "loom"))]
pub use std::sync::atomic::{AtomicU64, Ordering};

// Arc
#[cfg(feature = "loom")]
pub use loom::sync::Arc;

#[cfg(not(feature = "loom"))]
pub use std::sync::Arc;

// Thread
#[cfg(feature = "loom")]
pub use loom::thread;

#[cfg(not(feature = "loom"))]
pub use std::thread;
