//! Human-readable stdout report, one line per figure.

use gauss_ad::{BenchTiming, GradientBuffers, Mismatch, SampleBatch};

pub fn print_report(
    batch: &SampleBatch,
    results: &GradientBuffers,
    timing: &BenchTiming,
    mismatches: &[Mismatch],
    vm_size_kb: Option<u64>,
) {
    for m in mismatches {
        println!(
            "result mismatch {} d_point {} vs {} d_center {} vs {}",
            m.index, m.lhs_point, m.rhs_point, m.lhs_center, m.rhs_center
        );
    }

    println!("memory alloc time {:.0} microsec", timing.alloc_us);
    println!(
        "tape time {:.0} microsec, {:.3} per call",
        timing.tape.total_us,
        timing.tape.per_call_us()
    );
    println!(
        "adjoint time {:.0} microsec, {:.3} per call",
        timing.adjoint.total_us,
        timing.adjoint.per_call_us()
    );

    println!("allocations made {:.3} MB", allocated_mb(batch, results));

    match vm_size_kb {
        Some(kb) => println!("process {:.0} MB", kb as f64 / 1000.0),
        None => println!("process memory unknown"),
    }
}

/// Megabytes held by the input and gradient buffers together.
fn allocated_mb(batch: &SampleBatch, results: &GradientBuffers) -> f64 {
    (batch.input_bytes() + results.output_bytes()) as f64 / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocated_mb_visible_at_default_size() {
        // Default run is 100 samples of dimension 1: 3 input buffers of
        // 100 f64 plus 2 output buffers of 100 f64 = 4000 bytes.
        let batch = SampleBatch::generate(100, 1).unwrap();
        let results = GradientBuffers::zeros(100, 1).unwrap();

        let mb = allocated_mb(&batch, &results);
        assert_eq!(mb, 0.004);
        assert_eq!(format!("{mb:.3}"), "0.004");
    }
}

