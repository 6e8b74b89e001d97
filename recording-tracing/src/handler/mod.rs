//! Recording lifecycle handlers.
//!
//! A [`RecordingHandler`] observes the lifecycle of a [`Recording`] through
//! three callbacks driven by the owning lifecycle framework, always in this
//! order for a well-behaved recording:
//!
//! 1. `on_scope_open` — the recording's thread of control begins doing the
//!    measured work,
//! 2. `on_scope_close` — the measured work is done on that thread of
//!    control,
//! 3. `on_stop` — the recording is finished and its tag set is final.
//!
//! Before each callback the framework consults the handler's eligibility
//! gate, [`supports`](RecordingHandler::supports). This lets a registry of
//! heterogeneous handlers (metrics-only, tracing, composite) share one
//! recording pipeline: each handler only ever sees the recordings it opted
//! into.
//!
//! The handler that does the actual recording-to-span correlation is
//! [`TracingRecordingHandler`]; [`CompositeRecordingHandler`] fans one
//! recording out to many handlers.

use crate::recording::Recording;

mod tracing;

pub use self::tracing::{project_tags, TracingRecordingHandler};

/// Observes recording lifecycle events.
///
/// Handlers execute synchronously on whichever thread of control drives the
/// recording; none of the callbacks may block or suspend. The framework
/// guarantees the open/close/stop ordering per recording; handlers degrade
/// to no-ops when a callback arrives without its precondition (see the
/// individual callback docs) rather than erroring.
pub trait RecordingHandler {
    /// The eligibility gate: returns `true` unless the recording context is
    /// absent.
    ///
    /// No side effects. A `false` return makes all three lifecycle callbacks
    /// no-ops for that recording.
    fn supports(&self, recording: Option<&Recording>) -> bool {
        recording.is_some()
    }

    /// Called when the recording's thread of control starts the measured
    /// work.
    fn on_scope_open(&self, recording: &mut Recording);

    /// Called when the measured work ends on the thread of control that
    /// opened the scope.
    fn on_scope_close(&self, recording: &mut Recording);

    /// Called once the recording has stopped and its tag set is final.
    fn on_stop(&self, recording: &mut Recording);
}

/// Fans one recording out to every child handler that supports it.
///
/// # Examples
///
/// ```
/// use recording_tracing::handler::{CompositeRecordingHandler, TracingRecordingHandler};
/// use recording_tracing::trace::NoopTracer;
///
/// let handler = CompositeRecordingHandler::new()
///     .with_handler(TracingRecordingHandler::new(NoopTracer::new()));
/// ```
#[derive(Default)]
pub struct CompositeRecordingHandler {
    handlers: Vec<Box<dyn RecordingHandler>>,
}

impl CompositeRecordingHandler {
    /// Creates a composite with no child handlers.
    pub fn new() -> Self {
        CompositeRecordingHandler::default()
    }

    /// Adds a child handler, builder style.
    pub fn with_handler(mut self, handler: impl RecordingHandler + 'static) -> Self {
        self.push(handler);
        self
    }

    /// Adds a child handler.
    pub fn push(&mut self, handler: impl RecordingHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    fn dispatch(&self, recording: &mut Recording, f: impl Fn(&dyn RecordingHandler, &mut Recording)) {
        for handler in &self.handlers {
            if handler.supports(Some(recording)) {
                f(handler.as_ref(), recording);
            }
        }
    }
}

impl RecordingHandler for CompositeRecordingHandler {
    /// Supported when any child handler is.
    fn supports(&self, recording: Option<&Recording>) -> bool {
        self.handlers
            .iter()
            .any(|handler| handler.supports(recording))
    }

    fn on_scope_open(&self, recording: &mut Recording) {
        self.dispatch(recording, |handler, recording| {
            handler.on_scope_open(recording)
        });
    }

    fn on_scope_close(&self, recording: &mut Recording) {
        self.dispatch(recording, |handler, recording| {
            handler.on_scope_close(recording)
        });
    }

    fn on_stop(&self, recording: &mut Recording) {
        self.dispatch(recording, |handler, recording| handler.on_stop(recording));
    }
}

impl std::fmt::Debug for CompositeRecordingHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeRecordingHandler")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
