//! An in-memory tracer capability for tests.
//!
//! [`TestTracer`] keeps its ambient current span in a thread-local stack, so
//! concurrently driven recordings on different threads see independent
//! ambient state, exactly like a real backend's thread-of-control-scoped
//! context. [`TestSpan`] shares its tag store across clones, so tags written
//! through the handle stored in a correlation attachment are observable
//! through the handle a test kept for assertions.

use std::borrow::Cow;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use crate::common::Tag;
use crate::trace::{Scope, Span, Tracer};

thread_local! {
    static AMBIENT_SPANS: RefCell<Vec<TestSpan>> = const { RefCell::new(Vec::new()) };
}

/// A span handle whose tag store is shared across clones.
#[derive(Clone, Debug)]
pub struct TestSpan {
    name: Cow<'static, str>,
    tags: Arc<Mutex<Vec<Tag>>>,
}

impl TestSpan {
    fn new(name: impl Into<Cow<'static, str>>) -> Self {
        TestSpan {
            name: name.into(),
            tags: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The name this span was started with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if `other` is a handle to the same span.
    pub fn is_same_span(&self, other: &TestSpan) -> bool {
        Arc::ptr_eq(&self.tags, &other.tags)
    }

    /// A copy of the span's current tag set, in first-write key order.
    pub fn tag_snapshot(&self) -> Vec<Tag> {
        self.tags.lock().unwrap().clone()
    }
}

impl Span for TestSpan {
    fn tag(&mut self, tag: Tag) {
        let mut tags = self.tags.lock().unwrap();
        match tags.iter_mut().find(|existing| existing.key == tag.key) {
            Some(existing) => existing.value = tag.value,
            None => tags.push(tag),
        }
    }
}

/// The activation of one [`TestSpan`] on the current thread.
///
/// Closing pops the thread's ambient span stack. Dropping without closing
/// leaves the activation on the stack, mirroring the leak a real backend
/// suffers when a scope is abandoned.
#[derive(Debug)]
pub struct TestScope {
    // relies on a thread local, so must not cross threads
    _not_send: PhantomData<*const ()>,
}

impl Scope for TestScope {
    fn close(self) {
        AMBIENT_SPANS.with(|spans| {
            spans.borrow_mut().pop();
        });
    }
}

/// A tracer capability backed by a thread-local ambient span stack.
#[derive(Clone, Debug, Default)]
pub struct TestTracer {
    _private: (),
}

impl TestTracer {
    /// Creates a new test tracer.
    pub fn new() -> Self {
        TestTracer::default()
    }

    /// Starts a span without activating it.
    ///
    /// Activation is separate so tests can drive the two steps the way real
    /// instrumentation does: start a span, then make it ambient with
    /// [`open_scope`](Tracer::open_scope).
    pub fn start(&self, name: impl Into<Cow<'static, str>>) -> TestSpan {
        TestSpan::new(name)
    }

    /// The depth of the current thread's ambient span stack.
    pub fn ambient_depth(&self) -> usize {
        AMBIENT_SPANS.with(|spans| spans.borrow().len())
    }
}

impl Tracer for TestTracer {
    type Span = TestSpan;
    type Scope = TestScope;

    fn current_span(&self) -> Option<TestSpan> {
        AMBIENT_SPANS.with(|spans| spans.borrow().last().cloned())
    }

    fn open_scope(&self, span: &TestSpan) -> TestScope {
        AMBIENT_SPANS.with(|spans| spans.borrow_mut().push(span.clone()));
        TestScope {
            _not_send: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_spans_nest_and_restore() {
        let tracer = TestTracer::new();
        assert!(tracer.current_span().is_none());

        let outer = tracer.start("outer");
        let outer_scope = tracer.open_scope(&outer);
        assert!(tracer
            .current_span()
            .is_some_and(|span| span.is_same_span(&outer)));

        let inner = tracer.start("inner");
        let inner_scope = tracer.open_scope(&inner);
        assert!(tracer
            .current_span()
            .is_some_and(|span| span.is_same_span(&inner)));

        inner_scope.close();
        assert!(tracer
            .current_span()
            .is_some_and(|span| span.is_same_span(&outer)));

        outer_scope.close();
        assert!(tracer.current_span().is_none());
    }

    #[test]
    fn clones_share_one_tag_store() {
        let tracer = TestTracer::new();
        let span = tracer.start("op");
        let mut clone = span.clone();

        clone.tag(Tag::new("seen", "yes"));
        assert_eq!(span.tag_snapshot(), vec![Tag::new("seen", "yes")]);

        clone.tag(Tag::new("seen", "twice"));
        assert_eq!(span.tag_snapshot(), vec![Tag::new("seen", "twice")]);
    }
}
