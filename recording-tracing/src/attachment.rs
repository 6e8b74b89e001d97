//! Per-recording typed storage.
//!
//! Handlers that need to carry state between a recording's lifecycle
//! callbacks stash it here, keyed by the value's type. Each recording owns
//! its own store, so there is at most one value per type per recording and
//! no cross-recording sharing.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasherDefault, Hasher};

/// A type-keyed store of handler state attached to one recording.
///
/// Values are not required to be `Send`: scope guards are tied to the thread
/// of control that opened them and commonly are not.
///
/// # Examples
///
/// ```
/// use recording_tracing::Attachments;
///
/// #[derive(Debug, PartialEq)]
/// struct Budget(u64);
///
/// let mut attachments = Attachments::new();
/// attachments.insert(Budget(250));
///
/// assert_eq!(attachments.get::<Budget>(), Some(&Budget(250)));
/// assert_eq!(attachments.remove::<Budget>(), Some(Budget(250)));
/// assert_eq!(attachments.get::<Budget>(), None);
/// ```
#[derive(Default)]
pub struct Attachments {
    entries: HashMap<TypeId, Box<dyn Any>, BuildHasherDefault<IdHasher>>,
}

impl Attachments {
    /// Creates an empty store.
    ///
    /// Created with a capacity of 0, so it does not allocate until the first
    /// [`insert`](Attachments::insert).
    pub fn new() -> Self {
        Attachments::default()
    }

    /// Returns a reference to the value of type `T`, if one is attached.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref())
    }

    /// Returns a mutable reference to the value of type `T`, if one is
    /// attached.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|value| value.downcast_mut())
    }

    /// Attaches a value, replacing and returning any previous value of the
    /// same type.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.entries
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|previous| previous.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Detaches and returns the value of type `T`, if one is attached.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.entries
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Returns `true` if no value is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Attachments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachments")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// With TypeIds as keys, there's no need to hash them. They are already
/// hashes themselves, coming from the compiler. The IdHasher holds the u64
/// of the TypeId, and then returns it, instead of doing any bit fiddling.
#[derive(Clone, Default, Debug)]
struct IdHasher(u64);

impl Hasher for IdHasher {
    fn write(&mut self, _: &[u8]) {
        unreachable!("TypeId calls write_u64");
    }

    #[inline]
    fn write_u64(&mut self, id: u64) {
        self.0 = id;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct ValueA(&'static str);
    #[derive(Debug, PartialEq)]
    struct ValueB(u64);

    #[test]
    fn one_slot_per_type() {
        let mut attachments = Attachments::new();
        assert!(attachments.is_empty());

        attachments.insert(ValueA("first"));
        attachments.insert(ValueB(1));
        assert_eq!(attachments.get(), Some(&ValueA("first")));
        assert_eq!(attachments.get(), Some(&ValueB(1)));

        // Same type replaces, returning the displaced value.
        let previous = attachments.insert(ValueA("second"));
        assert_eq!(previous, Some(ValueA("first")));
        assert_eq!(attachments.get(), Some(&ValueA("second")));
    }

    #[test]
    fn mutate_in_place() {
        let mut attachments = Attachments::new();
        attachments.insert(ValueB(1));
        if let Some(value) = attachments.get_mut::<ValueB>() {
            value.0 += 41;
        }
        assert_eq!(attachments.get(), Some(&ValueB(42)));
    }

    #[test]
    fn remove_detaches() {
        let mut attachments = Attachments::new();
        attachments.insert(ValueA("gone"));
        assert_eq!(attachments.remove(), Some(ValueA("gone")));
        assert_eq!(attachments.remove::<ValueA>(), None);
        assert!(attachments.is_empty());
    }
}
