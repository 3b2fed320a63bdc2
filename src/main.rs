//! Headless chunk meshing benchmark.
//!
//! Usage: cubelit [--config assets/cubelit.toml] [--blocks assets/blocks.toml]
//!                [--iterations N] [--radius R] [--off-main-thread]

mod bench;
mod config;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cubelit_blocks::{BlockTable, default_block_table};
use cubelit_runtime::MeshRuntime;
use cubelit_world::World;

use crate::bench::run_meshing_bench;
use crate::config::EngineConfig;

#[derive(Parser, Debug)]
#[command(name = "cubelit", about = "Mesh a cube of chunks repeatedly and report timing")]
struct Args {
    /// Engine config (world, meshing, bench sections). Defaults apply when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Block table definitions. The built-in table is used when absent.
    #[arg(long)]
    blocks: Option<PathBuf>,
    #[arg(long)]
    iterations: Option<usize>,
    /// Chunks meshed in each direction around every bench point.
    #[arg(long)]
    radius: Option<i32>,
    /// Mesh on a worker thread instead of inline.
    #[arg(long)]
    off_main_thread: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => EngineConfig::load_from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(n) = args.iterations {
        cfg.bench.iterations = n;
    }
    if let Some(r) = args.radius {
        cfg.bench.radius = r;
    }
    if args.off_main_thread {
        cfg.meshing.off_main_thread = true;
    }

    let blocks: BlockTable = match &args.blocks {
        Some(path) => BlockTable::load_from_path(path)?,
        None => default_block_table(),
    };

    let mut world = World::new(cfg.world.clone());
    let mut runtime = MeshRuntime::new(cfg.meshing.clone(), Arc::new(blocks))?;
    let report = run_meshing_bench(&mut world, &mut runtime, &cfg.bench)?;

    log::info!(
        "meshed {} chunks x {} iterations in {:.2?} ({:.2?} per chunk), {} quads ({} see-through)",
        report.chunks,
        report.iterations,
        report.elapsed,
        report.per_chunk(),
        report.quads,
        report.see_through_quads
    );
    if report.empty_neighborhoods > 0 {
        log::info!(
            "{} chunks had empty neighborhoods and could be skipped by a caller",
            report.empty_neighborhoods
        );
    }
    Ok(())
}
