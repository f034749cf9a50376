//! ユーティリティ

pub mod sync_compat;
