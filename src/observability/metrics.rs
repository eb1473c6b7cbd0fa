//! Client metrics.
//!
//! # Metrics
//! - `ledger_requests_total` (counter): remote calls by operation and status class
//!   (`2xx`..`5xx`, or `error`/`timeout` when no response arrived)
//! - `ledger_transactions_total` (counter): pipeline outcomes by result
//! - `ledger_confirmation_attempts` (histogram): status queries per confirmation
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding application installs a recorder.

use metrics::{counter, histogram};

/// Record a completed remote call.
pub fn record_request(operation: &'static str, status: u16) {
    let class = match status {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };
    counter!("ledger_requests_total", "operation" => operation, "status" => class).increment(1);
}

/// Record a remote call that produced no response (`error` or `timeout`).
pub fn record_request_failure(operation: &'static str, class: &'static str) {
    counter!("ledger_requests_total", "operation" => operation, "status" => class).increment(1);
}

/// Record a transaction pipeline outcome (`submitted`, `rejected`, `confirmed`, `timed_out`).
pub fn record_transaction(result: &'static str) {
    counter!("ledger_transactions_total", "result" => result).increment(1);
}

/// Record how many status queries a confirmation took.
pub fn record_confirmation_attempts(attempts: u32) {
    histogram!("ledger_confirmation_attempts").record(attempts as f64);
}

/// Thread-local recorder that keeps counter increments as `name{label=value,..}` strings.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use metrics::{
        Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };

    #[derive(Default)]
    pub struct CountingRecorder {
        increments: Arc<Mutex<Vec<String>>>,
    }

    impl CountingRecorder {
        pub fn increments(&self) -> Vec<String> {
            self.increments.lock().unwrap().clone()
        }
    }

    struct CounterHandle {
        increments: Arc<Mutex<Vec<String>>>,
        rendered: String,
    }

    impl CounterFn for CounterHandle {
        fn increment(&self, _value: u64) {
            self.increments.lock().unwrap().push(self.rendered.clone());
        }

        fn absolute(&self, _value: u64) {}
    }

    impl Recorder for CountingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let labels: Vec<String> = key
                .labels()
                .map(|l| format!("{}={}", l.key(), l.value()))
                .collect();
            Counter::from_arc(Arc::new(CounterHandle {
                increments: self.increments.clone(),
                rendered: format!("{}{{{}}}", key.name(), labels.join(",")),
            }))
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }
}
