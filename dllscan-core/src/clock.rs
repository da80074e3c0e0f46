//! Timestamp source for manifests.
//!
//! The pipeline only ever sees a formatted string, so tests can pin the
//! timestamp and compare manifests byte for byte.

use chrono::{Local, SecondsFormat};

/// Produces the manifest timestamp.
pub trait Clock {
    fn timestamp(&self) -> String;
}

/// Local wall-clock time with UTC offset, e.g. `2026-10-19T14:03:07+02:00`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn timestamp(&self) -> String {
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

/// Always returns the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

impl<F> Clock for F
where
    F: Fn() -> String,
{
    fn timestamp(&self) -> String {
        self()
    }
}
