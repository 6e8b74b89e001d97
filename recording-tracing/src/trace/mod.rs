//! The tracer capability consumed by the correlation core.
//!
//! Every tracing backend (OpenTelemetry, Zipkin/Brave-style clients, vendor
//! SDKs) is plugged in as one implementation of the [`Tracer`] trait. The
//! correlation handler is written against these traits only and never
//! against a concrete backend's types, which is what keeps backends
//! swappable without touching the core.
//!
//! Three capabilities make up the contract:
//!
//! * [`Tracer`] reads the **ambient current span** and activates a span as
//!   current, returning a [`Scope`].
//! * [`Span`] is an opaque handle to one trace node with a mutable tag set.
//! * [`Scope`] is the closeable activation: closing it restores whichever
//!   span was ambient before it was opened.
//!
//! ## Ambient context ownership
//!
//! The ambient current span is owned by the tracer capability, not by this
//! crate. Implementations backing async runtimes must tie it to the logical
//! task rather than the OS thread, otherwise a scope opened before an await
//! point can end up closed on a different worker thread and corrupt the
//! open/close pairing.

use crate::common::Tag;

mod noop;

pub use noop::{NoopScope, NoopSpan, NoopTracer};

/// An opaque handle to one trace node.
///
/// Cloning a span handle (where an implementation supports it) yields a
/// handle to the same underlying node; tags written through any handle are
/// visible through all of them.
pub trait Span {
    /// Sets a tag on this span, overwriting any previous value for the same
    /// key.
    fn tag(&mut self, tag: Tag);
}

/// A closeable resource representing "this span is the ambient current
/// span".
///
/// [`close`](Scope::close) consumes the scope, so closing twice is a compile
/// error rather than a runtime one. Dropping a scope without closing it
/// leaks the activation: the ambient span is *not* restored. That is the
/// documented behavior for recordings whose close callback never fires, not
/// something implementations should paper over in `Drop`.
pub trait Scope {
    /// Closes this scope, restoring the previously ambient span.
    fn close(self);
}

/// The capability a tracing backend exposes to the correlation core.
pub trait Tracer {
    /// The backend's span handle.
    type Span: Span + 'static;
    /// The backend's scope guard.
    type Scope: Scope + 'static;

    /// Returns a handle to the ambient current span of the calling thread of
    /// control, or `None` if no span is active.
    fn current_span(&self) -> Option<Self::Span>;

    /// Activates `span` as the ambient current span until the returned scope
    /// is closed.
    fn open_scope(&self, span: &Self::Span) -> Self::Scope;
}
