//! Wall-clock timing for the benchmark report.

use serde::Serialize;
use std::time::Instant;

/// Time a closure, returning its result and the elapsed microseconds.
pub fn time_us<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1e6)
}

/// Timing of one engine's full batch pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EngineTiming {
    /// Total wall-clock time for the pass, microseconds.
    pub total_us: f64,
    /// Number of per-sample gradient calls in the pass.
    pub calls: usize,
}

impl EngineTiming {
    pub fn new(total_us: f64, calls: usize) -> Self {
        Self { total_us, calls }
    }

    /// Pass time normalized by batch size.
    pub fn per_call_us(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.total_us / self.calls as f64
        }
    }
}

/// Timing breakdown for one benchmark run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BenchTiming {
    /// Time to allocate the gradient result buffers, microseconds.
    pub alloc_us: f64,
    /// Tape engine batch pass.
    pub tape: EngineTiming,
    /// Hand-derived adjoint batch pass.
    pub adjoint: EngineTiming,
}
