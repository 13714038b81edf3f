//! Request statistics collection and summary

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Default)]
struct EndpointStats {
    latencies_ms: Vec<u64>,
    failures: u64,
    status_counts: HashMap<u16, u64>,
}

/// Shared, thread-safe recorder of request outcomes
#[derive(Debug, Clone, Default)]
pub struct StatsRecorder {
    inner: Arc<Mutex<HashMap<String, EndpointStats>>>,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, EndpointStats>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Record a successful request
    pub fn record_success(&self, endpoint: &str, status: u16, latency: Duration) {
        let mut map = self.lock();
        let stats = map.entry(endpoint.to_string()).or_default();
        stats.latencies_ms.push(latency.as_millis() as u64);
        *stats.status_counts.entry(status).or_insert(0) += 1;
    }

    /// Record a failed request
    pub fn record_failure(&self, endpoint: &str) {
        let mut map = self.lock();
        map.entry(endpoint.to_string()).or_default().failures += 1;
    }

    /// Build the end-of-run summary
    pub fn summary(&self, elapsed: Duration) -> WorkloadSummary {
        let map = self.lock();
        let mut endpoints = BTreeMap::new();
        let mut total_requests = 0u64;
        let mut total_failures = 0u64;

        for (endpoint, stats) in map.iter() {
            let mut sorted = stats.latencies_ms.clone();
            sorted.sort_unstable();

            let successes = sorted.len() as u64;
            let requests = successes + stats.failures;
            total_requests += requests;
            total_failures += stats.failures;

            let mean_ms = if sorted.is_empty() {
                0.0
            } else {
                sorted.iter().sum::<u64>() as f64 / sorted.len() as f64
            };

            endpoints.insert(
                endpoint.clone(),
                EndpointSummary {
                    requests,
                    failures: stats.failures,
                    error_rate: if requests == 0 {
                        0.0
                    } else {
                        stats.failures as f64 / requests as f64
                    },
                    min_ms: sorted.first().copied().unwrap_or(0),
                    mean_ms,
                    p50_ms: percentile(&sorted, 50.0),
                    p95_ms: percentile(&sorted, 95.0),
                    p99_ms: percentile(&sorted, 99.0),
                    max_ms: sorted.last().copied().unwrap_or(0),
                    status_counts: stats.status_counts.iter().map(|(k, v)| (*k, *v)).collect(),
                },
            );
        }

        WorkloadSummary {
            elapsed,
            total_requests,
            total_failures,
            requests_per_second: if elapsed.is_zero() {
                0.0
            } else {
                total_requests as f64 / elapsed.as_secs_f64()
            },
            endpoints,
        }
    }
}

/// Latency and outcome summary for one endpoint
#[derive(Debug, Clone)]
pub struct EndpointSummary {
    pub requests: u64,
    pub failures: u64,
    pub error_rate: f64,
    pub min_ms: u64,
    pub mean_ms: f64,
    pub p50_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
    pub max_ms: u64,
    pub status_counts: BTreeMap<u16, u64>,
}

/// End-of-run summary across all endpoints
#[derive(Debug, Clone)]
pub struct WorkloadSummary {
    pub elapsed: Duration,
    pub total_requests: u64,
    pub total_failures: u64,
    pub requests_per_second: f64,
    pub endpoints: BTreeMap<String, EndpointSummary>,
}

impl WorkloadSummary {
    /// Log the summary, one line per endpoint
    pub fn log(&self) {
        info!(
            elapsed_secs = self.elapsed.as_secs_f64(),
            total_requests = self.total_requests,
            total_failures = self.total_failures,
            requests_per_second = format!("{:.1}", self.requests_per_second),
            "Replay finished"
        );
        for (endpoint, summary) in &self.endpoints {
            info!(
                endpoint = endpoint.as_str(),
                requests = summary.requests,
                failures = summary.failures,
                error_rate = format!("{:.2}%", summary.error_rate * 100.0),
                min_ms = summary.min_ms,
                mean_ms = format!("{:.1}", summary.mean_ms),
                p50_ms = summary.p50_ms,
                p95_ms = summary.p95_ms,
                p99_ms = summary.p99_ms,
                max_ms = summary.max_ms,
                "Endpoint summary"
            );
        }
    }
}

/// Nearest-rank percentile over an already sorted slice
fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_of_uniform_ladder() {
        let sorted: Vec<u64> = (1..=100).collect();
        assert_eq!(percentile(&sorted, 50.0), 50);
        assert_eq!(percentile(&sorted, 95.0), 95);
        assert_eq!(percentile(&sorted, 99.0), 99);
        assert_eq!(percentile(&sorted, 100.0), 100);
        assert_eq!(percentile(&[], 50.0), 0);
    }

    #[test]
    fn summary_counts_successes_and_failures() {
        let stats = StatsRecorder::new();
        stats.record_success("/api/shorten", 201, Duration::from_millis(10));
        stats.record_success("/api/shorten", 201, Duration::from_millis(30));
        stats.record_failure("/api/shorten");
        stats.record_success("/r/", 307, Duration::from_millis(5));

        let summary = stats.summary(Duration::from_secs(2));
        assert_eq!(summary.total_requests, 4);
        assert_eq!(summary.total_failures, 1);
        assert!((summary.requests_per_second - 2.0).abs() < f64::EPSILON);

        let shorten = &summary.endpoints["/api/shorten"];
        assert_eq!(shorten.requests, 3);
        assert_eq!(shorten.failures, 1);
        assert_eq!(shorten.min_ms, 10);
        assert_eq!(shorten.max_ms, 30);
        assert_eq!(shorten.status_counts[&201], 2);

        let redirect = &summary.endpoints["/r/"];
        assert_eq!(redirect.requests, 1);
        assert_eq!(redirect.failures, 0);
    }
}
