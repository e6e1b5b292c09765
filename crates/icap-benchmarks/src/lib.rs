//! # ICAP Codec Performance Benchmarks
//!
//! Timing harness and sample data for the address <-> IBAN codec, with
//! latency targets per operation.
//!
//! ## Targets
//!
//! | Operation | Target (p99) | Function |
//! |-----------|--------------|----------|
//! | Address -> IBAN | < 50µs | `codec::bench_address_to_iban` |
//! | IBAN -> address | < 50µs | `codec::bench_iban_to_address` |
//! | Checksum casing | < 20µs | `codec::bench_checksum` |
//! | MOD-97-10 | < 5µs | `codec::bench_mod9710` |
//!
//! ## Usage
//!
//! ```bash
//! # Criterion benchmarks
//! cargo bench --package icap-benchmarks
//!
//! # Single group
//! cargo bench --package icap-benchmarks -- iban
//! ```

use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Instant;

// ============================================================================
// PERFORMANCE TARGETS
// ============================================================================

/// Latency targets per codec operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceTargets {
    /// Address to IBAN p99 (µs)
    pub address_to_iban_us: u64,

    /// IBAN to address p99 (µs)
    pub iban_to_address_us: u64,

    /// Checksum casing p99 (µs)
    pub checksum_us: u64,

    /// MOD-97-10 over a prepared IBAN p99 (µs)
    pub mod9710_us: u64,
}

impl Default for PerformanceTargets {
    fn default() -> Self {
        Self {
            address_to_iban_us: 50,
            iban_to_address_us: 50,
            checksum_us: 20,
            mod9710_us: 5,
        }
    }
}

// ============================================================================
// BENCHMARK RESULTS
// ============================================================================

/// Result of a single benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name
    pub name: String,

    /// Number of iterations
    pub iterations: u64,

    /// Total time (ns)
    pub total_time_ns: u64,

    /// Mean time per operation (ns)
    pub mean_ns: f64,

    /// Standard deviation (ns)
    pub std_dev_ns: f64,

    /// Median time (ns)
    pub median_ns: f64,

    /// p99 latency (ns)
    pub p99_ns: f64,

    /// Throughput (ops/sec)
    pub throughput: f64,

    /// Meets the latency target
    pub passes_target: bool,

    /// Latency target (if applicable)
    pub target: Option<String>,
}

impl BenchmarkResult {
    /// Calculate statistics from timing data
    pub fn from_timings(name: &str, timings: &[u64], target_ns: Option<u64>) -> Self {
        let iterations = timings.len() as u64;
        let total_time_ns: u64 = timings.iter().sum();

        let mut sorted = timings.to_vec();
        sorted.sort_unstable();

        let (mean_ns, std_dev_ns, median_ns, p99_ns) = match sorted.len() {
            0 => (0.0, 0.0, 0.0, 0.0),
            len => {
                let mean = total_time_ns as f64 / len as f64;
                let variance = sorted
                    .iter()
                    .map(|&t| {
                        let diff = t as f64 - mean;
                        diff * diff
                    })
                    .sum::<f64>()
                    / len as f64;

                let median = if len % 2 == 0 {
                    (sorted[len / 2 - 1] + sorted[len / 2]) as f64 / 2.0
                } else {
                    sorted[len / 2] as f64
                };

                let p99_idx = ((len as f64 * 0.99) as usize).min(len - 1);
                (mean, variance.sqrt(), median, sorted[p99_idx] as f64)
            }
        };

        let throughput = if mean_ns > 0.0 {
            1_000_000_000.0 / mean_ns
        } else {
            0.0
        };

        Self {
            name: name.to_string(),
            iterations,
            total_time_ns,
            mean_ns,
            std_dev_ns,
            median_ns,
            p99_ns,
            throughput,
            passes_target: target_ns.map(|t| p99_ns <= t as f64).unwrap_or(true),
            target: target_ns.map(|t| format!("{}ns", t)),
        }
    }

    /// Print summary
    pub fn print_summary(&self) {
        let status = if self.passes_target { "PASS" } else { "FAIL" };

        println!("\n{} - {}", self.name, status);
        println!("  Iterations:  {}", self.iterations);
        println!("  Mean:        {:.2}µs", self.mean_ns / 1000.0);
        println!("  Std Dev:     {:.2}µs", self.std_dev_ns / 1000.0);
        println!("  Median:      {:.2}µs", self.median_ns / 1000.0);
        println!("  p99:         {:.2}µs", self.p99_ns / 1000.0);
        println!("  Throughput:  {:.2} ops/sec", self.throughput);
        if let Some(target) = &self.target {
            println!("  Target:      {}", target);
        }
    }
}

/// Full benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Report timestamp
    pub timestamp: String,

    /// Individual benchmark results
    pub results: Vec<BenchmarkResult>,

    /// Overall pass/fail
    pub overall_pass: bool,

    /// Targets used
    pub targets: PerformanceTargets,
}

impl BenchmarkReport {
    /// Create a new report
    pub fn new() -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            results: Vec::new(),
            overall_pass: true,
            targets: PerformanceTargets::default(),
        }
    }

    /// Add a result
    pub fn add_result(&mut self, result: BenchmarkResult) {
        if !result.passes_target {
            self.overall_pass = false;
        }
        self.results.push(result);
    }

    /// Print full report
    pub fn print_report(&self) {
        println!("\nICAP codec benchmark report ({})", self.timestamp);

        for result in &self.results {
            result.print_summary();
        }

        if self.overall_pass {
            println!("\nOVERALL: all benchmarks meet their targets\n");
        } else {
            println!("\nOVERALL: some benchmarks miss their targets\n");
        }
    }

    /// Save report to file
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

impl Default for BenchmarkReport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SAMPLE DATA
// ============================================================================

/// Deterministic 20-byte addresses, `0x`-prefixed lowercase hex
pub fn sample_addresses(count: usize) -> Vec<String> {
    sample_addresses_of_width(count, 20)
}

/// Deterministic addresses of `byte_len` bytes (at most 32)
pub fn sample_addresses_of_width(count: usize, byte_len: usize) -> Vec<String> {
    (0..count as u64)
        .map(|i| {
            let seed = blake3::hash(&i.to_le_bytes());
            let width = byte_len.min(seed.as_bytes().len());
            format!("0x{}", hex::encode(&seed.as_bytes()[..width]))
        })
        .collect()
}

/// Direct IBANs for the sample addresses
pub fn sample_ibans(count: usize) -> Vec<String> {
    sample_addresses(count)
        .iter()
        .filter_map(|a| icap_iban::address_to_iban(a).ok())
        .map(|iban| iban.into_string())
        .collect()
}

// ============================================================================
// BENCHMARK UTILITIES
// ============================================================================

/// Run a benchmark with warmup
pub fn run_benchmark<F>(
    name: &str,
    iterations: usize,
    warmup: usize,
    target_ns: Option<u64>,
    mut f: F,
) -> BenchmarkResult
where
    F: FnMut(),
{
    for _ in 0..warmup {
        f();
    }

    let mut timings = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        f();
        timings.push(start.elapsed().as_nanos() as u64);
    }

    BenchmarkResult::from_timings(name, &timings, target_ns)
}

// ============================================================================
// CODEC BENCHMARKS
// ============================================================================

pub mod codec {
    use super::*;
    use icap_core::{AddressProfile, HashAlgorithm};
    use icap_crypto::checksum::to_checksum_address;
    use icap_iban::{address_to_iban, iban_to_address, mod9710, prepare};

    const SAMPLES: usize = 64;

    /// Benchmark address -> IBAN
    pub fn bench_address_to_iban(iterations: usize) -> BenchmarkResult {
        let target_ns = PerformanceTargets::default().address_to_iban_us * 1_000;
        let addresses = sample_addresses(SAMPLES);
        let mut i = 0;

        run_benchmark("Address to IBAN", iterations, 100, Some(target_ns), || {
            let _ = black_box(address_to_iban(&addresses[i % SAMPLES]));
            i += 1;
        })
    }

    /// Benchmark IBAN -> address
    pub fn bench_iban_to_address(iterations: usize) -> BenchmarkResult {
        let target_ns = PerformanceTargets::default().iban_to_address_us * 1_000;
        let ibans = sample_ibans(SAMPLES);
        let mut i = 0;

        run_benchmark("IBAN to address", iterations, 100, Some(target_ns), || {
            if !ibans.is_empty() {
                let _ = black_box(iban_to_address(&ibans[i % ibans.len()]));
            }
            i += 1;
        })
    }

    /// Benchmark checksum casing with the given digest
    pub fn bench_checksum(iterations: usize, hash: HashAlgorithm) -> BenchmarkResult {
        let target_ns = PerformanceTargets::default().checksum_us * 1_000;
        let profile = AddressProfile {
            hash,
            ..AddressProfile::ICAP
        };
        let addresses = sample_addresses(SAMPLES);
        let mut i = 0;

        let name = format!("Checksum casing ({})", hash);
        run_benchmark(&name, iterations, 100, Some(target_ns), || {
            let _ = black_box(to_checksum_address(&addresses[i % SAMPLES], &profile));
            i += 1;
        })
    }

    /// Benchmark MOD-97-10 over prepared IBAN digits
    pub fn bench_mod9710(iterations: usize) -> BenchmarkResult {
        let target_ns = PerformanceTargets::default().mod9710_us * 1_000;
        let prepared: Vec<_> = sample_ibans(SAMPLES)
            .iter()
            .filter_map(|iban| prepare(iban).ok())
            .collect();
        let mut i = 0;

        run_benchmark("MOD-97-10", iterations, 100, Some(target_ns), || {
            if !prepared.is_empty() {
                let _ = black_box(mod9710(&prepared[i % prepared.len()]));
            }
            i += 1;
        })
    }
}

/// Run the full benchmark suite
pub fn run_full_benchmark_suite() -> BenchmarkReport {
    let mut report = BenchmarkReport::new();

    tracing::info!("running codec benchmarks");
    report.add_result(codec::bench_address_to_iban(1000));
    report.add_result(codec::bench_iban_to_address(1000));
    report.add_result(codec::bench_checksum(1000, icap_core::HashAlgorithm::Keccak256));
    report.add_result(codec::bench_checksum(1000, icap_core::HashAlgorithm::Blake3));
    report.add_result(codec::bench_mod9710(1000));

    report.print_report();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_timings() {
        let timings = vec![100, 200, 300, 400, 500];
        let result = BenchmarkResult::from_timings("test", &timings, Some(1000));

        assert_eq!(result.iterations, 5);
        assert_eq!(result.total_time_ns, 1500);
        assert_eq!(result.mean_ns, 300.0);
        assert_eq!(result.median_ns, 300.0);
        assert_eq!(result.p99_ns, 500.0);
        assert!(result.passes_target);
    }

    #[test]
    fn test_from_timings_misses_target() {
        let result = BenchmarkResult::from_timings("slow", &[10, 20, 5_000], Some(1_000));
        assert!(!result.passes_target);
        assert_eq!(result.target.as_deref(), Some("1000ns"));
    }

    #[test]
    fn test_from_empty_timings() {
        let result = BenchmarkResult::from_timings("empty", &[], None);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.throughput, 0.0);
        assert!(result.passes_target);
    }

    #[test]
    fn test_report_tracks_failures() {
        let mut report = BenchmarkReport::new();
        report.add_result(BenchmarkResult::from_timings("ok", &[1, 2, 3], Some(10)));
        assert!(report.overall_pass);

        report.add_result(BenchmarkResult::from_timings("bad", &[100], Some(10)));
        assert!(!report.overall_pass);
        assert_eq!(report.results.len(), 2);
    }

    #[test]
    fn test_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut report = BenchmarkReport::new();
        report.add_result(BenchmarkResult::from_timings("ok", &[1, 2, 3], None));
        report.save_json(&path).unwrap();

        let loaded: BenchmarkReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.results.len(), 1);
        assert_eq!(loaded.results[0].name, "ok");
    }

    #[test]
    fn test_sample_data_is_deterministic() {
        let addresses = sample_addresses(8);
        assert_eq!(addresses, sample_addresses(8));
        assert!(addresses.iter().all(|a| a.len() == 42 && a.starts_with("0x")));

        let wide = sample_addresses_of_width(4, 32);
        assert!(wide.iter().all(|a| a.len() == 66));

        let ibans = sample_ibans(8);
        assert_eq!(ibans.len(), 8);
        assert!(ibans.iter().all(|i| icap_iban::is_direct(i)));
    }

    #[test]
    fn test_codec_benchmarks_run() {
        let result = codec::bench_address_to_iban(10);
        assert_eq!(result.iterations, 10);

        let result = codec::bench_mod9710(10);
        assert_eq!(result.iterations, 10);
    }
}
