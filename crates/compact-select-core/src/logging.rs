//! Logging facilities for compact-select.
//!
//! compact-select uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("compact_select=debug")
//!         .init();
//!
//!     // Host application code...
//! }
//! ```
//!
//! Every subsystem logs under its own target so hosts can filter, e.g.
//! `RUST_LOG=compact_select::composite=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "compact_select_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "compact_select_core::signal";
    /// Option model and resolver target.
    pub const MODEL: &str = "compact_select::model";
    /// Selection manager target.
    pub const SELECTION: &str = "compact_select::selection";
    /// Region (single list) target.
    pub const REGION: &str = "compact_select::region";
    /// Composite controller target.
    pub const COMPOSITE: &str = "compact_select::composite";
    /// Overlay/trigger shell target.
    pub const OVERLAY: &str = "compact_select::overlay";
}

/// Span names used for tracing user gestures end to end.
pub mod span_names {
    /// A single selection gesture (click, Enter, Space).
    pub const SELECT: &str = "compact_select::select";
    /// A section select-all/unselect-all batch.
    pub const TOGGLE_SECTION: &str = "compact_select::toggle_section";
    /// Re-resolving disabled/hidden keys after a search change.
    pub const RESOLVE: &str = "compact_select::resolve";
}

/// Whether development-only diagnostics (duplicate keys and similar caller
/// data-quality issues) should be logged.
#[inline]
pub fn dev_diagnostics_enabled() -> bool {
    cfg!(debug_assertions)
}
