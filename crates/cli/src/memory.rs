//! Resident-memory probe backed by `/proc/self/status`.

use std::fs;

use tphuim::api::MemoryProbe;

const STATUS: &str = "/proc/self/status";

/// Tracks the largest resident set seen at checkpoints, in MB.
///
/// Uses the kernel's high-water mark (`VmHWM`) when present and falls back to the
/// current resident size (`VmRSS`). On systems without procfs every reading is
/// `None` and the report prints `n/a`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcStatusProbe {
    peak_mb: Option<f64>,
}

impl ProcStatusProbe {
    fn observe(&mut self, status: &str) {
        let kb = status_kb(status, "VmHWM:").or_else(|| status_kb(status, "VmRSS:"));
        if let Some(kb) = kb {
            let mb = kb as f64 / 1024.0;
            self.peak_mb = Some(self.peak_mb.map_or(mb, |p| p.max(mb)));
        }
    }
}

impl MemoryProbe for ProcStatusProbe {
    fn reset(&mut self) {
        self.peak_mb = None;
    }

    fn checkpoint(&mut self) {
        if let Ok(status) = fs::read_to_string(STATUS) {
            self.observe(&status);
        }
    }

    fn peak_mb(&self) -> Option<f64> {
        self.peak_mb
    }
}

/// Value in kB of a `Key:   1234 kB` line.
fn status_kb(status: &str, key: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|l| l.strip_prefix(key))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Name:\tcli\nVmPeak:\t  20480 kB\nVmHWM:\t    4096 kB\nVmRSS:\t    2048 kB\n";

    #[test]
    fn reads_high_water_mark_first() {
        assert_eq!(status_kb(SAMPLE, "VmHWM:"), Some(4096));
        assert_eq!(status_kb(SAMPLE, "VmRSS:"), Some(2048));
        assert_eq!(status_kb(SAMPLE, "VmSwap:"), None);
        let mut p = ProcStatusProbe::default();
        p.observe(SAMPLE);
        assert_eq!(p.peak_mb(), Some(4.0));
    }

    #[test]
    fn peak_only_grows_until_reset() {
        let mut p = ProcStatusProbe::default();
        p.observe("VmRSS:\t 3072 kB\n");
        p.observe("VmRSS:\t 1024 kB\n");
        assert_eq!(p.peak_mb(), Some(3.0));
        p.reset();
        assert_eq!(p.peak_mb(), None);
    }
}
