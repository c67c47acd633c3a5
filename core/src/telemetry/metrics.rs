use serde::Serialize;
use std::sync::Mutex;

/// Counters for the shaping workflow, shared across requests.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub records_shaped: usize,
    pub region_fallbacks: usize,
    pub non_finite_deviations: usize,
    pub stale_results: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_shaped(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.records_shaped += count;
        }
    }

    pub fn record_fallbacks(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.region_fallbacks += count;
        }
    }

    pub fn record_non_finite(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.non_finite_deviations += count;
        }
    }

    pub fn record_stale(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.stale_results += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let recorder = MetricsRecorder::new();
        recorder.record_shaped(48);
        recorder.record_shaped(48);
        recorder.record_fallbacks(3);
        recorder.record_non_finite(1);
        recorder.record_stale();
        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.records_shaped, 96);
        assert_eq!(snapshot.region_fallbacks, 3);
        assert_eq!(snapshot.non_finite_deviations, 1);
        assert_eq!(snapshot.stale_results, 1);
    }
}
