//! Tracing, logging and analytics (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Analytics event dispatch, gated by an explicit context.
pub mod analytics;

pub use analytics::Analytics;
