//! 基本型モジュール
//!
//! - `Color`: 手番
//! - `Square`: 升（a1=0 .. h8=63）
//! - `PieceType` / `Piece`: 駒種と4bitの駒コード
//! - `Move` / `TtMove`: 64bitパックの指し手と置換表用の切り詰め形式
//! - `Score`: 評価値（16bit）
//! - `Bound`: 置換表スコアの境界種別

mod bound;
mod color;
pub mod moves;
mod piece;
mod score;
mod square;

pub use bound::Bound;
pub use color::Color;
pub use moves::{Move, TtMove};
pub use piece::{Piece, PieceType};
pub use score::Score;
pub use square::Square;

/// 1局面の最大指し手数
pub const MAX_MOVES: usize = 256;
