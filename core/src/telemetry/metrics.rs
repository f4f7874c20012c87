use std::sync::Mutex;

/// Cross-run counters for pipeline invocations and reported detections.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    runs: usize,
    detections: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                runs: 0,
                detections: 0,
            }),
        }
    }

    pub fn record_run(&self, detections: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.runs += 1;
            metrics.detections += detections;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.runs, metrics.detections)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
