use criterion::{criterion_group, criterion_main, Criterion};
use recording_tracing::handler::{RecordingHandler, TracingRecordingHandler};
use recording_tracing::testing::trace::TestTracer;
use recording_tracing::trace::Tracer;
use recording_tracing::{Recording, Tag};

fn recording_lifecycle(c: &mut Criterion) {
    let tracer = TestTracer::new();
    let handler = TracingRecordingHandler::new(tracer.clone());
    let span = tracer.start("parent");
    let _ambient = tracer.open_scope(&span);

    c.bench_function("open_close_stop", |b| {
        b.iter(|| {
            let mut recording = Recording::start("bench.op");
            handler.on_scope_open(&mut recording);
            recording.tag(Tag::new("outcome", "SUCCESS"));
            handler.on_scope_close(&mut recording);
            recording.stop();
            handler.on_stop(&mut recording);
            recording
        })
    });

    c.bench_function("close_stop_without_open", |b| {
        // The benign no-op path: the recording never opened a scope.
        b.iter(|| {
            let mut recording = Recording::start("bench.noop");
            handler.on_scope_close(&mut recording);
            recording.stop();
            handler.on_stop(&mut recording);
            recording
        })
    });
}

criterion_group!(benches, recording_lifecycle);
criterion_main!(benches);
