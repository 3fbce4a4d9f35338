//! Fail-soft numeric parsing for registry-supplied fields.
//!
//! A malformed status token or port value must never abort a whole
//! resolution batch. Instead the value degrades to `0`, a warning is logged,
//! and the fallback is counted so operators can spot bad registry data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared counter of lenient-parse fallbacks.
#[derive(Debug, Clone, Default)]
pub struct ParseFallbacks {
    count: Arc<AtomicU64>,
}

impl ParseFallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `raw` as an `i32`, or records a fallback and returns 0.
    /// `raw` is taken as-is; callers trim where the field allows padding.
    pub fn parse_or_zero(&self, field: &str, raw: &str) -> i32 {
        match raw.parse::<i32>() {
            Ok(value) => value,
            Err(e) => {
                self.count.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    field = field,
                    raw = raw,
                    error = %e,
                    "Unparsable numeric value, falling back to 0"
                );
                0
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
