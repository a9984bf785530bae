//! Best-effort process memory diagnostic.
//!
//! Reads the `VmSize:` line of `/proc/self/status` for the report's
//! footprint figure. The file is Linux-specific line-oriented text; on any
//! read or parse failure the diagnostic degrades to `None` and the report
//! prints `unknown`. Nothing in the benchmark depends on this value.

use std::fs;
use tracing::debug;

/// Current process virtual memory size in kilobytes, if available.
pub fn process_vm_size_kb() -> Option<u64> {
    let status = match fs::read_to_string("/proc/self/status") {
        Ok(s) => s,
        Err(e) => {
            debug!("cannot read /proc/self/status: {e}");
            return None;
        }
    };
    parse_vm_size_kb(&status)
}

/// Extract the `VmSize:` value (kB) from a `/proc/<pid>/status` body.
fn parse_vm_size_kb(status: &str) -> Option<u64> {
    for line in status.lines() {
        let Some(rest) = line.strip_prefix("VmSize:") else {
            continue;
        };
        let kb = rest
            .trim()
            .strip_suffix("kB")
            .and_then(|v| v.trim().parse().ok());
        if kb.is_none() {
            debug!("unrecognized VmSize line: {line:?}");
        }
        return kb;
    }
    debug!("no VmSize line in process status");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_status() {
        let status = "Name:\tbench\nVmPeak:\t  20000 kB\nVmSize:\t  17544 kB\nVmRSS:\t  900 kB\n";
        assert_eq!(parse_vm_size_kb(status), Some(17544));
    }

    #[test]
    fn test_parse_missing_field() {
        assert_eq!(parse_vm_size_kb("Name:\tbench\nVmRSS:\t 900 kB\n"), None);
        assert_eq!(parse_vm_size_kb(""), None);
    }

    #[test]
    fn test_parse_malformed_value() {
        assert_eq!(parse_vm_size_kb("VmSize:\tlots kB\n"), None);
        assert_eq!(parse_vm_size_kb("VmSize:\t17544 MB\n"), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_live_process_reports_nonzero() {
        let kb = process_vm_size_kb().expect("VmSize available on Linux");
        assert!(kb > 0);
    }
}
