//! Tracing and logging setup shared by the binaries.

/// Initialize process-wide tracing with an explicit filter and output format.
///
/// `RUST_LOG`, when set, still wins over `filter`. Safe to call multiple
/// times; subsequent calls are no-ops.
pub fn init_with(filter: &str, json: bool) {
    tracing::init_with(filter, json);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
