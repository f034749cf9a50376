use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use qbb_core::STARTPOS_FEN;
use qbb_core::tt::{DEFAULT_ABDADA_MB, DEFAULT_TT_MB, TableConfig};
use tools::stress::{StressConfig, run};

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-threaded ABDADA table stress test")]
struct Cli {
    /// ルート局面（FEN）
    #[arg(long, default_value = STARTPOS_FEN)]
    fen: String,

    /// ワーカースレッド数
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// 全幅探索の深さ
    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// 手順シャッフル用の乱数シード
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// ワーカー用置換表の合計サイズ（MB）
    #[arg(long, default_value_t = DEFAULT_TT_MB)]
    tt_mb: usize,

    /// ABDADAテーブルのサイズ（MB）
    #[arg(long, default_value_t = DEFAULT_ABDADA_MB)]
    abdada_mb: usize,

    /// レポートの出力先（未指定時は標準出力）
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let config = StressConfig {
        fen: cli.fen,
        threads: cli.threads,
        depth: cli.depth,
        seed: cli.seed,
        tables: TableConfig {
            tt_mb: cli.tt_mb,
            abdada_mb: cli.abdada_mb,
        },
    };

    let report = run(&config)?;
    log::info!(
        "{} nodes in {} ms, {} deferred to second pass",
        report.nodes,
        report.elapsed_ms,
        report.second_pass
    );

    let json = serde_json::to_string_pretty(&report)?;
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut w = BufWriter::new(file);
            writeln!(w, "{json}")?;
            w.flush()?;
            log::info!("report written to {}", path.display());
        }
        None => println!("{json}"),
    }

    if report.hash_mismatches > 0 {
        bail!("{} hash mismatches detected", report.hash_mismatches);
    }
    Ok(())
}
