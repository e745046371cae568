//! Span constructors shared by the build paths.
//!
//! Every build runs inside a `build` span carrying the transaction kind, so
//! planner and backend events can be correlated per call.

use pchain_types::Id;
use tracing::{debug_span, info_span, Span};

/// Span covering one build call from intent to unsigned transaction.
pub fn build_span(kind: &'static str) -> Span {
    info_span!("build", kind = %kind)
}

/// Span covering a single backend read.
pub fn backend_span(op: &'static str, id: &Id) -> Span {
    debug_span!("backend", op = %op, id = %id)
}
