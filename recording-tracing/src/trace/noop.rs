//! No-op trace impls
//!
//! This implementation stands in when no tracing backend is wired up. It is
//! also useful for testing purposes as it is intended to have minimal
//! resource utilization and runtime impact.

use crate::common::Tag;
use crate::trace::{Scope, Span, Tracer};

/// A no-op instance of a [`Span`].
#[derive(Clone, Debug, Default)]
pub struct NoopSpan {
    _private: (),
}

impl NoopSpan {
    /// Creates a new `NoopSpan` instance.
    pub fn new() -> Self {
        NoopSpan { _private: () }
    }
}

impl Span for NoopSpan {
    /// Ignores all tags
    fn tag(&mut self, _tag: Tag) {
        // Ignored
    }
}

/// A no-op instance of a [`Scope`].
#[derive(Debug, Default)]
pub struct NoopScope {
    _private: (),
}

impl Scope for NoopScope {
    /// There is nothing to restore
    fn close(self) {
        // Ignored
    }
}

/// A no-op instance of a [`Tracer`].
///
/// Reports no ambient span, so a correlation handler built over it degrades
/// to doing nothing at all.
#[derive(Clone, Debug, Default)]
pub struct NoopTracer {
    _private: (),
}

impl NoopTracer {
    /// Create a new no-op tracer
    pub fn new() -> Self {
        NoopTracer { _private: () }
    }
}

impl Tracer for NoopTracer {
    type Span = NoopSpan;
    type Scope = NoopScope;

    /// There is never an ambient span.
    fn current_span(&self) -> Option<Self::Span> {
        None
    }

    fn open_scope(&self, _span: &Self::Span) -> Self::Scope {
        NoopScope::default()
    }
}
