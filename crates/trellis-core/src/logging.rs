//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see layout logs, install one in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis::sizer=debug")
//!     .init();
//! ```

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// A full `calc_min` + `recalc_sizes` pass on a root sizer.
    pub const LAYOUT: &str = "sizer_layout";
    /// Fitting a widget to its sizer.
    pub const FIT: &str = "sizer_fit";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Sizer mutation and layout passes.
    pub const SIZER: &str = "trellis::sizer";
    /// Fitting helpers (`fit`, `set_size_hints`, ...).
    pub const FIT: &str = "trellis::sizer::fit";
    /// Layout suspension and coalescing.
    pub const SUSPEND: &str = "trellis::sizer::suspend";
    /// Performance spans.
    pub const PERF: &str = "trellis::perf";
}

/// A guard that keeps a performance span entered until dropped.
///
/// ```ignore
/// let _span = PerfSpan::new("sizer_layout");
/// // ... timed work ...
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "trellis::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}

#[macro_export]
macro_rules! trellis_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "trellis::sizer", $($arg)*)
    };
}

#[macro_export]
macro_rules! trellis_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "trellis::sizer", $($arg)*)
    };
}

#[macro_export]
macro_rules! trellis_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "trellis::sizer", $($arg)*)
    };
}
