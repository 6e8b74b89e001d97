use std::borrow::{Borrow, Cow};
use std::sync::Arc;
use std::{fmt, hash};

/// The key part of a [`Tag`] pair.
#[non_exhaustive]
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(TagString);

impl Key {
    /// Create a new `Key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use recording_tracing::Key;
    /// use std::sync::Arc;
    ///
    /// let key1 = Key::new("my_static_str");
    /// let key2 = Key::new(String::from("my_owned_string"));
    /// let key3 = Key::new(Arc::from("my_ref_counted_str"));
    /// ```
    pub fn new(value: impl Into<Key>) -> Self {
        value.into()
    }

    /// Create a new const `Key`.
    pub const fn from_static_str(value: &'static str) -> Self {
        Key(TagString::Static(value))
    }

    /// Returns a reference to the underlying key name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&'static str> for Key {
    fn from(key_str: &'static str) -> Self {
        Key(TagString::Static(key_str))
    }
}

impl From<String> for Key {
    fn from(string: String) -> Self {
        Key(TagString::Owned(string.into_boxed_str()))
    }
}

impl From<Arc<str>> for Key {
    fn from(string: Arc<str>) -> Self {
        Key(TagString::RefCounted(string))
    }
}

impl From<Cow<'static, str>> for Key {
    fn from(string: Cow<'static, str>) -> Self {
        match string {
            Cow::Borrowed(s) => Key(TagString::Static(s)),
            Cow::Owned(s) => Key(TagString::Owned(s.into_boxed_str())),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(fmt)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.0.as_str().to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.0.as_str())
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Clone, Debug, Eq)]
enum TagString {
    Owned(Box<str>),
    Static(&'static str),
    RefCounted(Arc<str>),
}

impl TagString {
    fn as_str(&self) -> &str {
        match self {
            TagString::Owned(s) => s.as_ref(),
            TagString::Static(s) => s,
            TagString::RefCounted(s) => s.as_ref(),
        }
    }
}

impl PartialOrd for TagString {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TagString {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialEq for TagString {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq(other.as_str())
    }
}

impl hash::Hash for TagString {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

/// The value part of a [`Tag`] pair.
///
/// Span tags are strings at this layer; richer value types live in the
/// backend, not in the correlation core.
#[non_exhaustive]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StringValue(TagString);

impl StringValue {
    /// Returns a string slice to this value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for StringValue {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(fmt)
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.0.as_str())
    }
}

impl AsRef<str> for StringValue {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<StringValue> for String {
    fn from(value: StringValue) -> Self {
        value.0.as_str().to_string()
    }
}

impl From<&'static str> for StringValue {
    fn from(s: &'static str) -> Self {
        StringValue(TagString::Static(s))
    }
}

impl From<String> for StringValue {
    fn from(s: String) -> Self {
        StringValue(TagString::Owned(s.into_boxed_str()))
    }
}

impl From<Arc<str>> for StringValue {
    fn from(s: Arc<str>) -> Self {
        StringValue(TagString::RefCounted(s))
    }
}

impl From<Cow<'static, str>> for StringValue {
    fn from(s: Cow<'static, str>) -> Self {
        match s {
            Cow::Borrowed(s) => StringValue(TagString::Static(s)),
            Cow::Owned(s) => StringValue(TagString::Owned(s.into_boxed_str())),
        }
    }
}

/// A key-value pair describing one recording or span tag.
///
/// # Examples
///
/// ```
/// use recording_tracing::Tag;
///
/// let tag = Tag::new("http.method", "GET");
/// assert_eq!(tag.key.as_str(), "http.method");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Tag {
    /// The tag's key.
    pub key: Key,
    /// The tag's value.
    pub value: StringValue,
}

impl Tag {
    /// Create a new `Tag` pair.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<Key>,
        V: Into<StringValue>,
    {
        Tag {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_representations_compare_equal() {
        let static_key = Key::from_static_str("lookup");
        let owned_key = Key::new(String::from("lookup"));
        let counted_key = Key::new(Arc::<str>::from("lookup"));

        assert_eq!(static_key, owned_key);
        assert_eq!(owned_key, counted_key);
    }

    #[test]
    fn key_borrows_as_str() {
        use std::collections::HashMap;

        let mut map: HashMap<Key, u32> = HashMap::new();
        map.insert(Key::new("present"), 1);

        assert_eq!(map.get("present"), Some(&1));
        assert_eq!(map.get("absent"), None);
    }

    #[test]
    fn tag_constructors() {
        let tag = Tag::new("peer.service", String::from("checkout"));
        assert_eq!(tag.key.as_str(), "peer.service");
        assert_eq!(tag.value.as_str(), "checkout");
    }
}
