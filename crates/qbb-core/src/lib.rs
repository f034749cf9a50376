//! # qbb-core
//!
//! 4枚のビットボード（quad-bitboard）で局面を表現するチェスエンジンコア。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, Piece, Move, Score, Bound）
//! - `bitboard`: ビットボード演算と利き計算（レイキャスト）
//! - `board`: 局面表現、do_move/undo_move、Zobristハッシュ、FEN
//! - `movegen`: 疑似合法手生成とperft
//! - `tt`: 逐次版の置換表（Transposition Table）
//! - `abdada`: 複数ワーカーで共有するロックフリーなABDADA協調テーブル
//! - `util`: loom切り替え用の同期プリミティブ
//!
//! 探索アルゴリズム本体・評価関数・UCIプロトコルはこのクレートの外側で実装する。

// 基本型
pub mod types;

// 盤面表現
pub mod bitboard;
pub mod board;

// 合法手生成
pub mod movegen;

// 置換表
pub mod abdada;
pub mod tt;

mod prefetch;
pub mod util;

pub use board::{Board, CastleRights, FenError, HASH_NONE, STARTPOS_FEN, UndoState};
pub use types::{Bound, Color, Move, Piece, PieceType, Score, Square, TtMove};
