//! Benchmark harness: run both gradient engines over one random batch,
//! compare the leading outputs, and report timings and memory.

mod report;

use anyhow::Result;
use clap::Parser;
use gauss_ad::{
    memory, run_batch, time_us, AdjointEngine, BenchTiming, EngineTiming, GradientBuffers,
    LeadingSnapshot, SampleBatch, TapeEngine, COMPARE_LIMIT,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Gradient micro-benchmark for the isotropic Gaussian density.
///
/// Runs a tape-based reverse-mode engine and a hand-derived adjoint over
/// the same random batch, diffs their outputs, and prints per-call
/// timings plus a coarse process memory figure.
#[derive(Parser)]
#[command(name = "gauss_ad_bench", version)]
struct Cli {
    /// Number of samples in the batch
    #[arg(default_value_t = 100)]
    n: usize,

    /// Dimension of each sample
    #[arg(default_value_t = 1)]
    dim: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    info!(n = cli.n, dim = cli.dim, "generating batch");

    // Overflow of n*dim is the one guarded failure; anyhow turns it into a
    // message on stderr and exit code 1 before anything is allocated.
    let batch = SampleBatch::generate(cli.n, cli.dim)?;

    let (results, alloc_us) = time_us(|| GradientBuffers::zeros(batch.len(), batch.dim()));
    let mut results = results?;

    let mut tape = TapeEngine::new();
    let ((), tape_us) = time_us(|| run_batch(&mut tape, &batch, &mut results));

    let snapshot = LeadingSnapshot::take(&results, COMPARE_LIMIT);

    let mut adjoint = AdjointEngine::new();
    let ((), adjoint_us) = time_us(|| run_batch(&mut adjoint, &batch, &mut results));

    let mismatches = snapshot.diff(&results);

    let timing = BenchTiming {
        alloc_us,
        tape: EngineTiming::new(tape_us, batch.len()),
        adjoint: EngineTiming::new(adjoint_us, batch.len()),
    };

    report::print_report(
        &batch,
        &results,
        &timing,
        &mismatches,
        memory::process_vm_size_kb(),
    );

    Ok(())
}
