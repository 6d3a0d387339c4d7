//! Observability metrics: query latency, insert throughput, scan volume.

use std::collections::VecDeque;
use std::time::Duration;

/// Latency samples kept for the average and percentiles; older ones drop off.
pub const LATENCY_WINDOW: usize = 1024;

/// Point-in-time copy of the collector's counters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StoreStats {
    pub total_inserts: u64,
    pub total_queries: u64,
    pub records_scanned: u64,
    pub records_skipped: u64,
    pub avg_query_latency_us: f64,
    pub p50_query_latency_us: f64,
    pub p99_query_latency_us: f64,
}

/// Collects runtime metrics for a vector store.
#[derive(Debug)]
pub struct MetricsCollector {
    query_latencies_us: VecDeque<f64>,
    total_queries: u64,
    total_inserts: u64,
    records_scanned: u64,
    records_skipped: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            query_latencies_us: VecDeque::with_capacity(LATENCY_WINDOW),
            total_queries: 0,
            total_inserts: 0,
            records_scanned: 0,
            records_skipped: 0,
        }
    }

    /// Record a completed query: its duration, how many records it scanned
    /// and how many of those were left out of the ranking.
    pub fn record_query(&mut self, duration: Duration, scanned: usize, skipped: usize) {
        self.total_queries += 1;
        self.records_scanned += scanned as u64;
        self.records_skipped += skipped as u64;
        if self.query_latencies_us.len() == LATENCY_WINDOW {
            self.query_latencies_us.pop_front();
        }
        self.query_latencies_us.push_back(duration.as_micros() as f64);
    }

    /// Record an insert operation.
    pub fn record_insert(&mut self) {
        self.total_inserts += 1;
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    pub fn total_inserts(&self) -> u64 {
        self.total_inserts
    }

    pub fn records_scanned(&self) -> u64 {
        self.records_scanned
    }

    pub fn records_skipped(&self) -> u64 {
        self.records_skipped
    }

    /// Number of latency samples currently held
    pub fn latency_samples(&self) -> usize {
        self.query_latencies_us.len()
    }

    /// Average query latency in microseconds over the recent window.
    pub fn avg_query_latency_us(&self) -> f64 {
        if self.query_latencies_us.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.query_latencies_us.iter().sum();
        sum / self.query_latencies_us.len() as f64
    }

    /// Get a percentile of query latency (e.g., 50.0, 95.0, 99.0).
    pub fn percentile_query_latency_us(&self, percentile: f64) -> f64 {
        if self.query_latencies_us.is_empty() {
            return 0.0;
        }

        let mut sorted: Vec<f64> = self.query_latencies_us.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let index = ((percentile / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[index.min(sorted.len() - 1)]
    }

    pub fn snapshot(&self) -> StoreStats {
        StoreStats {
            total_inserts: self.total_inserts,
            total_queries: self.total_queries,
            records_scanned: self.records_scanned,
            records_skipped: self.records_skipped,
            avg_query_latency_us: self.avg_query_latency_us(),
            p50_query_latency_us: self.percentile_query_latency_us(50.0),
            p99_query_latency_us: self.percentile_query_latency_us(99.0),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
