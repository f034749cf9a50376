//! do_move / undo_move のビット単位の可逆性と差分ハッシュの整合性

use proptest::prelude::*;
use qbb_core::board::CastleRights;
use qbb_core::movegen::{MoveList, generate_legal};
use qbb_core::{Board, Color, Move, Piece, STARTPOS_FEN, Square};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

const TEST_FENS: &[&str] = &[
    STARTPOS_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

/// 全合法手について do → undo で元の盤面に戻ることを確認する
fn assert_round_trip_all(board: &Board, us: Color) {
    let mut list = MoveList::new();
    generate_legal(board, us, &mut list);
    for &mv in &list {
        let mut b = *board;
        let st = b.undo_state();
        b.do_move(mv);
        assert!(b.hash_is_consistent(us.opponent()), "hash drift after {mv}\n{b:?}");
        b.undo_move(mv, st.cr, st.hash, st.last);
        assert_eq!(&b, board, "round trip failed for {mv}");
    }
}

/// 乱数で対局を進め、各局面で可逆性とハッシュを確認する
fn random_walk(fen: &str, seed: u64, plies: usize) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let (mut board, mut us) = Board::from_fen(fen).unwrap();
    let mut history: Vec<(Board, Move, qbb_core::UndoState)> = Vec::new();

    for _ in 0..plies {
        assert!(board.hash_is_consistent(us));
        assert_round_trip_all(&board, us);

        let mut list = MoveList::new();
        generate_legal(&board, us, &mut list);
        let Some(&mv) = list.choose(&mut rng) else {
            break;
        };
        history.push((board, mv, board.undo_state()));
        board.do_move(mv);
        us = us.opponent();
    }

    // 最後まで巻き戻すと各局面がそのまま復元される
    while let Some((before, mv, st)) = history.pop() {
        board.undo_move_with(mv, st);
        us = us.opponent();
        assert_eq!(board, before);
        assert!(board.hash_is_consistent(us));
    }
}

#[test]
fn test_round_trip_on_fixed_positions() {
    for fen in TEST_FENS {
        let (b, us) = Board::from_fen(fen).unwrap();
        assert_round_trip_all(&b, us);
    }
}

#[test]
fn test_random_walks_keep_hash_consistent() {
    for (i, fen) in TEST_FENS.iter().enumerate() {
        random_walk(fen, 0x5EED_0000 + i as u64, 60);
    }
}

#[test]
fn test_null_moves_interleaved() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let (mut b, mut us) = Board::from_fen(STARTPOS_FEN).unwrap();
    for _ in 0..40 {
        let mv = if rng.random_range(0..4) == 0 {
            Move::NULL
        } else {
            let mut list = MoveList::new();
            generate_legal(&b, us, &mut list);
            match list.choose(&mut rng) {
                Some(&m) => m,
                None => break,
            }
        };
        let before = b;
        let st = b.undo_state();
        b.do_move(mv);
        assert!(b.hash_is_consistent(us.opponent()));
        b.undo_move_with(mv, st);
        assert_eq!(b, before);
        b.do_move(mv);
        us = us.opponent();
    }
}

/// 初期局面で e2e4: クロックは0、ハッシュは変わり、undoで完全に戻る
#[test]
fn test_scenario_e2e4() {
    let (mut b, us) = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 5 1").unwrap();
    let mut list = MoveList::new();
    generate_legal(&b, us, &mut list);
    let mv = *list.iter().find(|m| m.to_string() == "e2e4").unwrap();
    assert!(!mv.is_capture());

    let st = b.undo_state();
    let hash_before = b.hash();
    let hmc_before = b.halfmove_clock();
    assert_eq!(hmc_before, 5);

    b.do_move(mv);
    assert_eq!(b.halfmove_clock(), 0);
    assert_ne!(b.hash(), hash_before);
    assert_eq!(b.piece_at(Square::E4), Piece::W_PAWN);
    assert_eq!(b.piece_at(Square::E2), Piece::NONE);
    assert_eq!(b.ep_target(), Some(Square::E3));
    assert!(b.hash_is_consistent(Color::Black));

    b.undo_move(mv, st.cr, st.hash, st.last);
    assert_eq!(b.hash(), hash_before);
    assert_eq!(b.halfmove_clock(), hmc_before);
    assert_eq!(b.undo_state(), st);
}

/// 白のキングサイド・キャスリング: 玉と飛車を1回で動かし、権利を消し、undoで戻す
#[test]
fn test_scenario_white_kingside_castle() {
    let (mut b, us) =
        Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    let original = b;
    let mut list = MoveList::new();
    generate_legal(&b, us, &mut list);
    let mv = *list.iter().find(|m| m.is_castle_kingside()).unwrap();
    assert_eq!(mv.to_string(), "e1g1");

    let st = b.undo_state();
    b.do_move(mv);
    assert_eq!(b.piece_at(Square::G1), Piece::W_KING);
    assert_eq!(b.piece_at(Square::F1), Piece::W_ROOK);
    assert_eq!(b.piece_at(Square::E1), Piece::NONE);
    assert_eq!(b.piece_at(Square::H1), Piece::NONE);
    assert!(!b.castle_rights().contains(CastleRights::WHITE_K));
    assert!(!b.castle_rights().contains(CastleRights::WHITE_Q));
    assert!(b.castle_rights().contains(CastleRights::BLACK_K));
    assert!(b.hash_is_consistent(Color::Black));

    b.undo_move_with(mv, st);
    assert_eq!(b, original);
    assert!(b.castle_rights().contains(CastleRights::WHITE_K));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// 任意のシードの乱数対局でも、全手の可逆性と差分ハッシュが保たれる
    #[test]
    fn prop_random_games_round_trip(seed in any::<u64>(), fen_idx in 0..TEST_FENS.len(), plies in 1usize..24) {
        random_walk(TEST_FENS[fen_idx], seed, plies);
    }
}
