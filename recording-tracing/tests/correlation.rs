//! End-to-end correlation behavior over the in-memory test backend.

use recording_tracing::handler::{RecordingHandler, TracingRecordingHandler};
use recording_tracing::testing::trace::TestTracer;
use recording_tracing::trace::{Scope, Tracer};
use recording_tracing::{Recording, Tag};

#[test]
fn lifecycle_scopes_and_tags_the_ambient_span() {
    let tracer = TestTracer::new();
    let handler = TracingRecordingHandler::new(tracer.clone());

    // The producing instrumentation starts span A and makes it ambient.
    let span_a = tracer.start("A");
    let instrumented = tracer.open_scope(&span_a);

    let mut recording = Recording::start("http.server.requests");
    handler.on_scope_open(&mut recording);
    assert_eq!(tracer.ambient_depth(), 2);
    assert!(tracer
        .current_span()
        .is_some_and(|span| span.is_same_span(&span_a)));

    recording.tag(Tag::new("http.method", "GET"));

    handler.on_scope_close(&mut recording);
    assert_eq!(tracer.ambient_depth(), 1);

    recording.stop();
    handler.on_stop(&mut recording);
    assert_eq!(span_a.tag_snapshot(), vec![Tag::new("http.method", "GET")]);

    instrumented.close();
    assert_eq!(tracer.ambient_depth(), 0);
}

#[test]
fn absent_ambient_span_degrades_to_no_ops() {
    let tracer = TestTracer::new();
    let handler = TracingRecordingHandler::new(tracer.clone());

    let mut recording = Recording::start("background.job");
    handler.on_scope_open(&mut recording);
    assert_eq!(tracer.ambient_depth(), 0);

    recording.tag(Tag::new("job.outcome", "SUCCESS"));
    handler.on_scope_close(&mut recording);
    recording.stop();
    handler.on_stop(&mut recording);

    // No span existed, so nothing was scoped and nothing was tagged.
    assert_eq!(tracer.ambient_depth(), 0);
}

#[test]
fn stop_before_open_skips_tag_projection() {
    let tracer = TestTracer::new();
    let handler = TracingRecordingHandler::new(tracer.clone());

    let span = tracer.start("A");
    let instrumented = tracer.open_scope(&span);

    let mut recording = Recording::start("misordered.op");
    recording.tag(Tag::new("lost", "yes"));
    recording.stop();
    handler.on_stop(&mut recording);

    assert!(span.tag_snapshot().is_empty());
    instrumented.close();
}

#[test]
fn nested_recordings_restore_the_outer_ambient_span() {
    let tracer = TestTracer::new();
    let handler = TracingRecordingHandler::new(tracer.clone());

    let span_a = tracer.start("A");
    let outer_instrumented = tracer.open_scope(&span_a);
    let mut outer = Recording::start("outer.op");
    handler.on_scope_open(&mut outer);

    // Inner instrumentation starts a child span and makes it ambient.
    let span_b = tracer.start("B");
    let inner_instrumented = tracer.open_scope(&span_b);
    let mut inner = Recording::start("inner.op");
    handler.on_scope_open(&mut inner);
    assert!(tracer
        .current_span()
        .is_some_and(|span| span.is_same_span(&span_b)));

    handler.on_scope_close(&mut inner);
    assert!(tracer
        .current_span()
        .is_some_and(|span| span.is_same_span(&span_b)));

    inner_instrumented.close();
    assert!(tracer
        .current_span()
        .is_some_and(|span| span.is_same_span(&span_a)));

    handler.on_scope_close(&mut outer);
    assert!(tracer
        .current_span()
        .is_some_and(|span| span.is_same_span(&span_a)));

    inner.stop();
    handler.on_stop(&mut inner);
    outer.stop();
    handler.on_stop(&mut outer);

    outer_instrumented.close();
    assert_eq!(tracer.ambient_depth(), 0);
}

#[test]
fn concurrent_recordings_have_independent_ambient_state() {
    let handles: Vec<_> = ["alpha", "beta"]
        .into_iter()
        .map(|name| {
            std::thread::spawn(move || {
                let tracer = TestTracer::new();
                let handler = TracingRecordingHandler::new(tracer.clone());

                let span = tracer.start(name);
                let instrumented = tracer.open_scope(&span);

                let mut recording = Recording::start("worker.op");
                handler.on_scope_open(&mut recording);
                recording.tag(Tag::new("worker", name));
                handler.on_scope_close(&mut recording);
                recording.stop();
                handler.on_stop(&mut recording);

                instrumented.close();
                assert_eq!(tracer.ambient_depth(), 0);
                (name, span.tag_snapshot())
            })
        })
        .collect();

    for handle in handles {
        let (name, tags) = handle.join().unwrap();
        assert_eq!(tags, vec![Tag::new("worker", name)]);
    }
}

#[test]
fn reopen_without_close_overwrites_the_correlation() {
    let tracer = TestTracer::new();
    let handler = TracingRecordingHandler::new(tracer.clone());

    let span = tracer.start("A");
    let instrumented = tracer.open_scope(&span);

    let mut recording = Recording::start("reentrant.op");
    handler.on_scope_open(&mut recording);
    handler.on_scope_open(&mut recording);
    assert_eq!(tracer.ambient_depth(), 3);

    // Only the second pair's scope is still held; the displaced one leaked
    // its activation, which is the tracer's scope-stack concern.
    handler.on_scope_close(&mut recording);
    assert_eq!(tracer.ambient_depth(), 2);
    handler.on_scope_close(&mut recording);
    assert_eq!(tracer.ambient_depth(), 2);

    recording.tag(Tag::new("reentrant", "true"));
    recording.stop();
    handler.on_stop(&mut recording);
    assert_eq!(span.tag_snapshot(), vec![Tag::new("reentrant", "true")]);

    instrumented.close();
}
