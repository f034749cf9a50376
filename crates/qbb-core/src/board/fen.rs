//! FEN形式の解析・出力
//!
//! キャスリング欄は移動済みワードに、アンパッサン欄とハーフムーブクロックは
//! 補助ワードに写す。手数（fullmove）は盤面に持たないので出力では常に1とする。

use super::{Board, CastleRights};
use crate::types::{Color, Move, Piece, PieceType, Square};

/// 初期局面のFEN
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FENパースエラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// 必須フィールドが無い
    #[error("FEN must have at least 4 fields, got {0}")]
    MissingFields(usize),

    /// 盤面の形式が不正
    #[error("Invalid board: {0}")]
    Board(String),

    /// 手番の形式が不正
    #[error("Invalid side to move: {0}")]
    SideToMove(String),

    /// キャスリング欄が不正、または駒の配置と矛盾する
    #[error("Invalid castling field: {0}")]
    Castling(String),

    /// アンパッサン欄が不正
    #[error("Invalid en passant square: {0}")]
    EnPassant(String),

    /// ハーフムーブクロック・手数が不正
    #[error("Invalid move counter: {0}")]
    Counter(String),

    /// 構造的に成り立たない局面（玉の数など）
    #[error("Illegal position: {0}")]
    IllegalPosition(&'static str),
}

impl Board {
    /// FEN文字列から局面と手番を生成
    pub fn from_fen(fen: &str) -> Result<(Board, Color), FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut board = Board::empty();

        // 1. 盤面
        parse_placement(&mut board, parts[0])?;

        // 2. 手番
        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            s => return Err(FenError::SideToMove(format!("Expected 'w' or 'b', got '{s}'"))),
        };

        // 3. キャスリング
        let rights = parse_castling(parts[2])?;
        for right in [
            CastleRights::WHITE_K,
            CastleRights::WHITE_Q,
            CastleRights::BLACK_K,
            CastleRights::BLACK_Q,
        ] {
            if rights.contains(right) && !castle_pieces_home(&board, right) {
                return Err(FenError::Castling(format!(
                    "'{}' requires king and rook on their home squares",
                    parts[2]
                )));
            }
        }
        board.set_moved(CastleRights::ALL.moved_mask() & !rights.moved_mask());

        // 4. アンパッサン
        let ep = match parts[3] {
            "-" => None,
            s => {
                let sq = Square::from_algebraic(s)
                    .ok_or_else(|| FenError::EnPassant(s.to_string()))?;
                let expected_rank = match side_to_move {
                    Color::White => 5,
                    Color::Black => 2,
                };
                if sq.rank() != expected_rank {
                    return Err(FenError::EnPassant(format!("{s} is not on the expected rank")));
                }
                Some(sq)
            }
        };

        // 5. ハーフムーブクロック（オプション）
        let hmc = match parts.get(4) {
            Some(s) => s.parse::<u8>().map_err(|_| FenError::Counter(s.to_string()))?,
            None => 0,
        };

        // 6. 手数（オプション、検証のみ）
        if let Some(s) = parts.get(5) {
            s.parse::<u32>().map_err(|_| FenError::Counter(s.to_string()))?;
        }

        board.set_last(Move::NONE.with_ep(ep), hmc, Some(side_to_move.opponent()));

        if let Some(reason) = board.structural_defect() {
            return Err(FenError::IllegalPosition(reason));
        }

        board.refresh_hash(side_to_move);
        Ok((board, side_to_move))
    }

    /// 現局面のFEN文字列を取得
    pub fn to_fen(&self, side_to_move: Color) -> String {
        let mut result = String::new();

        // 1. 盤面（8段目から）
        for rank in (0..8u8).rev() {
            let mut empty_count = 0;
            for file in 0..8u8 {
                let pc = self.piece_at(Square::new(file, rank));
                if pc.is_none() {
                    empty_count += 1;
                } else {
                    if empty_count > 0 {
                        result.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    result.push(pc.to_char());
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                result.push('/');
            }
        }

        // 2. 手番
        result.push(' ');
        result.push(side_to_move.to_fen_char());

        // 3. キャスリング
        result.push(' ');
        let cr = self.castle_rights();
        if cr.is_empty() {
            result.push('-');
        } else {
            for (right, c) in [
                (CastleRights::WHITE_K, 'K'),
                (CastleRights::WHITE_Q, 'Q'),
                (CastleRights::BLACK_K, 'k'),
                (CastleRights::BLACK_Q, 'q'),
            ] {
                if cr.contains(right) {
                    result.push(c);
                }
            }
        }

        // 4. アンパッサン
        result.push(' ');
        match self.ep_target() {
            Some(sq) => result.push_str(&sq.to_string()),
            None => result.push('-'),
        }

        // 5-6. クロックと手数
        result.push_str(&format!(" {} 1", self.halfmove_clock()));
        result
    }
}

/// 盤面部分をパース
fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::Board(format!("Expected 8 ranks, got {}", ranks.len())));
    }

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if digit == 0 || digit > 8 {
                    return Err(FenError::Board(format!("Bad empty count '{c}'")));
                }
                file += digit as u8;
            } else {
                let pc = Piece::from_char(c)
                    .ok_or_else(|| FenError::Board(format!("Unknown piece '{c}'")))?;
                if file >= 8 {
                    return Err(FenError::Board(format!("Too many pieces in rank {}", rank + 1)));
                }
                board.put_piece(Square::new(file, rank), pc);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::Board(format!("Too many squares in rank {}", rank + 1)));
            }
        }
        if file != 8 {
            return Err(FenError::Board(format!("Rank {} has {file} squares", rank + 1)));
        }
    }
    Ok(())
}

/// キャスリング欄をパース
fn parse_castling(s: &str) -> Result<CastleRights, FenError> {
    if s == "-" {
        return Ok(CastleRights::NONE);
    }
    let mut rights = CastleRights::NONE;
    for c in s.chars() {
        let right = match c {
            'K' => CastleRights::WHITE_K,
            'Q' => CastleRights::WHITE_Q,
            'k' => CastleRights::BLACK_K,
            'q' => CastleRights::BLACK_Q,
            _ => return Err(FenError::Castling(s.to_string())),
        };
        rights = rights.union(right);
    }
    Ok(rights)
}

/// キャスリング権に必要な玉と飛車が初期位置にあるか
fn castle_pieces_home(board: &Board, right: CastleRights) -> bool {
    let (color, king_sq, rook_sq) = if right == CastleRights::WHITE_K {
        (Color::White, Square::E1, Square::H1)
    } else if right == CastleRights::WHITE_Q {
        (Color::White, Square::E1, Square::A1)
    } else if right == CastleRights::BLACK_K {
        (Color::Black, Square::E8, Square::H8)
    } else {
        (Color::Black, Square::E8, Square::A8)
    };
    board.piece_at(king_sq) == Piece::new(PieceType::King, color)
        && board.piece_at(rook_sq) == Piece::new(PieceType::Rook, color)
}
