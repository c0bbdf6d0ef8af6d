//! telemetry/mod.rs
//! Counters, stage timers and the immutable snapshot returned by the stream pump.

pub mod counters;
pub mod snapshot;
pub mod timers;

pub use counters::*;
pub use snapshot::*;
pub use timers::*;
