//! Product catalogue metrics.

use metrics::{counter, histogram};
use std::time::Instant;

/// Product metrics recorder
pub struct ProductMetrics;

impl ProductMetrics {
    /// Count one completed operation (`list`, `show`, `create`, `update`, `delete`)
    pub fn record_operation(operation: &'static str) {
        counter!("product_operations_total", "operation" => operation).increment(1);
    }

    /// Count a payload rejected by validation, labelled by operation
    pub fn record_validation_failure(operation: &'static str, fields: usize) {
        counter!("product_validation_failures_total", "operation" => operation).increment(1);

        tracing::debug!(operation = operation, fields = fields, "Product validation failed");
    }

    /// Start timing `operation`; the duration is recorded when the timer stops or drops
    pub fn start_timer(operation: &'static str) -> OperationTimer {
        OperationTimer::new(operation)
    }
}

/// Timer guard for automatic duration recording.
///
/// Records the duration when `stop()` is called or when dropped.
pub struct OperationTimer {
    start: Instant,
    operation: &'static str,
    stopped: bool,
}

impl OperationTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
            stopped: false,
        }
    }

    /// Stop the timer and record the duration. Returns duration in milliseconds.
    pub fn stop(&mut self) -> u64 {
        if self.stopped {
            return 0;
        }
        self.stopped = true;

        let duration = self.start.elapsed();

        histogram!(
            "product_operation_duration_seconds",
            "operation" => self.operation
        )
        .record(duration.as_secs_f64());

        duration.as_millis() as u64
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        if !self.stopped {
            self.stop();
        }
    }
}
