//! bizlens-ma library - Metrics Aggregator module
//!
//! Recomputes popularity and success scores for every business from a fresh
//! aggregate of its reviews and check-ins.

pub mod aggregate;
