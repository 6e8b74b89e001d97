//! The recording-to-span correlation handler.

use crate::handler::RecordingHandler;
use crate::recording::Recording;
use crate::trace::{Scope, Span, Tracer};
use crate::{recording_debug, recording_warn};

/// The correlation attachment: one (span, scope) pair stashed on a recording
/// between its lifecycle callbacks.
///
/// The pair is owned by the recording, not by the handler, so it is dropped
/// with the recording whatever happens after. The scope moves out at close
/// time, which is what makes a second close a benign no-op.
struct SpanAndScope<T: Tracer> {
    span: T::Span,
    scope: Option<T::Scope>,
}

/// Correlates a recording's lifecycle with the ambient trace span.
///
/// At scope-open the handler captures the tracer's ambient current span,
/// activates it for the calling thread of control, and stores the resulting
/// (span, scope) pair as a correlation attachment on the recording. At
/// scope-close it closes that scope, restoring the previously ambient span.
/// At stop it projects the recording's accumulated tags onto the span.
///
/// The handler never creates or finishes spans: span creation policy
/// (naming, sampling) lives upstream in the instrumentation that produced
/// the ambient span, and finishing the span belongs to the tracing-lifecycle
/// collaborator that owns it.
///
/// A recording that never had an ambient span at open time flows through all
/// three callbacks as a no-op; see the per-callback docs.
///
/// # Examples
///
/// ```
/// use recording_tracing::handler::{RecordingHandler, TracingRecordingHandler};
/// use recording_tracing::trace::NoopTracer;
/// use recording_tracing::{Recording, Tag};
///
/// let handler = TracingRecordingHandler::new(NoopTracer::new());
///
/// let mut recording = Recording::start("http.server.requests");
/// handler.on_scope_open(&mut recording);
/// recording.tag(Tag::new("http.method", "GET"));
/// handler.on_scope_close(&mut recording);
/// recording.stop();
/// handler.on_stop(&mut recording);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TracingRecordingHandler<T> {
    tracer: T,
}

impl<T> TracingRecordingHandler<T>
where
    T: Tracer + 'static,
{
    /// Creates a handler over the given tracer capability.
    pub fn new(tracer: T) -> Self {
        TracingRecordingHandler { tracer }
    }

    /// The tracer capability this handler correlates against.
    pub fn tracer(&self) -> &T {
        &self.tracer
    }
}

impl<T> RecordingHandler for TracingRecordingHandler<T>
where
    T: Tracer + 'static,
{
    /// Captures the ambient current span and activates it for this
    /// recording.
    ///
    /// If no span is ambient (the producing instrumentation failed to create
    /// one, or none exists on this thread of control) nothing is fabricated
    /// and the recording stays without a correlation attachment.
    ///
    /// A reopen without an intervening close overwrites the attachment with
    /// the new pair; the displaced scope is dropped unclosed. Strict nesting
    /// is the tracer's scope-stack responsibility, not this handler's.
    fn on_scope_open(&self, recording: &mut Recording) {
        let Some(span) = self.tracer.current_span() else {
            recording_debug!(name: "tracing_handler.scope_open.no_ambient_span", recording = recording.name());
            return;
        };
        let scope = self.tracer.open_scope(&span);
        if recording
            .set_attachment(SpanAndScope::<T> {
                span,
                scope: Some(scope),
            })
            .is_some()
        {
            recording_warn!(name: "tracing_handler.scope_open.reopened_without_close", recording = recording.name());
        }
    }

    /// Closes the scope stored at open time, restoring the previously
    /// ambient span.
    ///
    /// A recording that never opened a scope, or whose scope was already
    /// closed, has nothing to close; that is a benign no-op, not an error.
    fn on_scope_close(&self, recording: &mut Recording) {
        let scope = recording
            .attachment_mut::<SpanAndScope<T>>()
            .and_then(|correlation| correlation.scope.take());
        match scope {
            Some(scope) => scope.close(),
            None => {
                recording_debug!(name: "tracing_handler.scope_close.nothing_to_close", recording = recording.name());
            }
        }
    }

    /// Projects the recording's final tag set onto the correlated span.
    ///
    /// Skipped when no scope was ever opened for this recording. The span is
    /// not finished here.
    fn on_stop(&self, recording: &mut Recording) {
        // Detach, tag, reattach: the span and the tag set live behind the
        // same &mut recording.
        let Some(mut correlation) = recording.take_attachment::<SpanAndScope<T>>() else {
            recording_debug!(name: "tracing_handler.stop.no_correlated_span", recording = recording.name());
            return;
        };
        project_tags(recording, &mut correlation.span);
        recording.set_attachment(correlation);
    }
}

/// Copies every tag accumulated on `recording` onto `span`, one call to the
/// span's tag mutator per pair.
///
/// Last-write-wins per key is the span's own overwrite semantics; no
/// filtering, renaming, or cardinality reduction happens here. Iteration
/// order is the recording's stable tag order, so re-projecting the same
/// final tag set leaves the span unchanged.
pub fn project_tags<S: Span>(recording: &Recording, span: &mut S) {
    for tag in recording.tags().all() {
        span.tag(tag.clone());
    }
}
