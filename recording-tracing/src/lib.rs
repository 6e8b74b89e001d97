//! Correlates timed recording lifecycles with distributed-tracing spans.
//!
//! # Overview
//!
//! A [`Recording`] is one measured operation: a named measurement with a
//! start event, a stop event, and a set of tags accumulated in between.
//! This crate turns every measured operation into a properly scoped trace
//! span by correlating the recording's lifecycle with whatever tracing
//! backend is in use, without the measurement code knowing the backend
//! exists.
//!
//! The pieces:
//!
//! - The [`trace`] module defines the **tracer capability**: the three-trait
//!   contract ([`Tracer`], [`Span`], [`Scope`]) a tracing backend implements
//!   to participate. Backend bootstrap (reporters, senders, samplers) stays
//!   in the backend crates.
//! - The [`handler`] module defines the **recording handler** contract and
//!   the [`TracingRecordingHandler`], which opens a trace-context scope when
//!   a recording's work begins, closes it when the work ends, and projects
//!   the recording's tags onto the span when the recording stops.
//! - [`Recording`] carries the tags and the typed [`Attachments`] slot the
//!   handler uses to pass the (span, scope) pair between callbacks.
//!
//! # Getting started
//!
//! ```
//! use recording_tracing::handler::{RecordingHandler, TracingRecordingHandler};
//! use recording_tracing::trace::NoopTracer;
//! use recording_tracing::{Recording, Tag};
//!
//! // A real application hands the handler its backend's tracer; the no-op
//! // tracer stands in when tracing is disabled.
//! let handler = TracingRecordingHandler::new(NoopTracer::new());
//!
//! let mut recording = Recording::start("http.server.requests");
//! handler.on_scope_open(&mut recording);
//!
//! // ...measured work happens, tags accumulate...
//! recording.tag(Tag::new("http.method", "GET"));
//!
//! handler.on_scope_close(&mut recording);
//! recording.stop();
//! handler.on_stop(&mut recording);
//! ```
//!
//! The three callbacks are driven by the lifecycle framework owning the
//! recording, always in open/close/stop order per recording. Callbacks that
//! arrive without their precondition (no ambient span at open, nothing
//! stored at close or stop) degrade to no-ops rather than erroring; tracer
//! failures propagate to the caller untouched.
//!
//! # Feature flags
//!
//! * `internal-logs` (default): internal logging via
//!   [`tracing`](https://crates.io/crates/tracing).
//! * `testing`: exposes the in-memory `testing` backend to downstream
//!   crates.
//!
//! [`Tracer`]: trace::Tracer
//! [`Span`]: trace::Span
//! [`Scope`]: trace::Scope
//! [`TracingRecordingHandler`]: handler::TracingRecordingHandler

#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(test, deny(warnings))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod attachment;
mod common;
mod internal_logging;
mod recording;

pub mod handler;
pub mod trace;

#[cfg(any(feature = "testing", test))]
#[doc(hidden)]
pub mod testing;

pub use attachment::Attachments;
pub use common::{Key, StringValue, Tag};
pub use recording::{Cardinality, Recording, TagSet};

#[cfg(feature = "internal-logs")]
#[doc(hidden)]
pub mod _private {
    pub use tracing::{debug, warn};
}
