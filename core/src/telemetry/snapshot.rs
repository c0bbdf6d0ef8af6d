//! telemetry/snapshot.rs
//! Immutable summary of one pump run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::PumpCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

/// Returned by `compress_stream` and `decompress_stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpSnapshot {
    /// Bytes read from the source.
    pub total_input: u64,
    /// Bytes produced by the codec.
    pub total_output: u64,
    /// `total_output / total_input`; 0 when nothing was read.
    pub ratio: f64,
    pub throughput_input_bytes_per_sec: f64,
    pub counters: PumpCounters,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl PumpSnapshot {
    pub fn from(counters: &PumpCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();
        let (total_input, total_output) = counters.totals();

        let ratio =
            if total_input > 0 { total_output as f64 / total_input as f64 } else { 0.0 };
        let throughput = if elapsed.as_secs_f64() > 0.0 {
            total_input as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_input,
            total_output,
            ratio,
            throughput_input_bytes_per_sec: throughput,
            counters: counters.clone(),
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    /// `(total_in, total_out)`.
    pub fn totals(&self) -> (u64, u64) {
        (self.total_input, self.total_output)
    }

    /// Stage times never add up to more than the run itself.
    pub fn sanity_check(&self) -> bool {
        self.stage_times.total() <= self.elapsed
            && self.counters.bytes_in == self.total_input
            && self.counters.bytes_out == self.total_output
    }
}
