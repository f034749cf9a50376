use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use qbb_core::movegen::{MoveList, generate_legal, perft, perft_divide};
use qbb_core::{Board, Color, STARTPOS_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about = "Perft node counter for qbb-core")]
struct Cli {
    /// 局面（FEN）
    #[arg(long, default_value = STARTPOS_FEN)]
    fen: String,

    /// 探索深さ
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// ルートの手ごとの内訳を表示
    #[arg(long)]
    divide: bool,

    /// 全ノードで差分ハッシュと全再計算を照合する（遅い）
    #[arg(long)]
    hash_check: bool,
}

/// perftと同じ木を辿り、各ノードでハッシュとundoの復元を検査する
fn perft_checked(board: &mut Board, us: Color, depth: u32, mismatches: &mut u64) -> u64 {
    if !board.hash_is_consistent(us) {
        *mismatches += 1;
    }
    if depth == 0 {
        return 1;
    }
    let mut moves = MoveList::new();
    generate_legal(board, us, &mut moves);
    let st = board.undo_state();
    let before = *board;
    let mut nodes = 0;
    for &mv in &moves {
        board.do_move(mv);
        nodes += perft_checked(board, us.opponent(), depth - 1, mismatches);
        board.undo_move_with(mv, st);
        if *board != before {
            *mismatches += 1;
            log::warn!("undo of {mv} did not restore {}", before.to_fen(us));
            *board = before;
        }
    }
    nodes
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let (mut board, us) =
        Board::from_fen(&cli.fen).with_context(|| format!("invalid FEN: {}", cli.fen))?;
    log::info!("perft depth {} on {}", cli.depth, board.to_fen(us));

    let start = Instant::now();
    let nodes = if cli.hash_check {
        let mut mismatches = 0;
        let nodes = perft_checked(&mut board, us, cli.depth, &mut mismatches);
        if mismatches > 0 {
            bail!("{mismatches} hash/undo mismatches found");
        }
        log::info!("hash check passed");
        nodes
    } else if cli.divide {
        let divide = perft_divide(&mut board, us, cli.depth);
        for (mv, n) in &divide {
            println!("{mv}: {n}");
        }
        println!();
        divide.iter().map(|&(_, n)| n).sum()
    } else {
        perft(&mut board, us, cli.depth)
    };
    let elapsed = start.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
    println!("nodes {nodes}");
    println!("time {} ms, {:.0} nps", elapsed.as_millis(), nps);
    Ok(())
}
