//! 指し手生成モジュール
//!
//! 疑似合法手を生成し、適用後に `Board::is_valid` で自玉への利きを確認して
//! 合法手に絞る（生成→適用→検証）。生成する指し手はどれもハーフムーブクロックの
//! スナップショットを持つ。

mod generator;
mod perft;

pub use generator::{generate_legal, generate_pseudo_legal};
pub use perft::{perft, perft_divide};

use smallvec::SmallVec;

use crate::types::{MAX_MOVES, Move};

/// 指し手リスト（1局面ぶんはヒープを使わない）
pub type MoveList = SmallVec<[Move; MAX_MOVES]>;
