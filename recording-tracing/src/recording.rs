//! The timed recording abstraction.
//!
//! A [`Recording`] is one measured operation: it is created at measurement
//! start, accumulates [`Tag`]s and handler [`Attachments`] while open, and is
//! stopped exactly once by the lifecycle framework that drives it. Handlers
//! receive the recording at each lifecycle callback and may read or mutate
//! it; after [`stop`](Recording::stop) the framework treats it as an
//! immutable snapshot.

use std::borrow::Cow;
use std::time::{Duration, SystemTime};

use crate::attachment::Attachments;
use crate::common::Tag;

/// Marks whether a tag is safe to use as a metrics dimension.
///
/// Low-cardinality tags have a bounded value set (an HTTP method, a status
/// class); high-cardinality tags do not (a user id, a full URL). The
/// correlation core projects both onto spans without distinction, but
/// metrics-oriented handlers only consume the low-cardinality set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// Bounded value set; usable as a metrics dimension.
    Low,
    /// Unbounded value set; span-only.
    High,
}

/// Tags accumulated by one recording, partitioned by [`Cardinality`].
///
/// Within each partition, writes are last-write-wins per key and iteration
/// order is the (stable) first-insertion order of each key, so projecting a
/// fixed final tag set is deterministic.
#[derive(Debug, Default)]
pub struct TagSet {
    low: Vec<Tag>,
    high: Vec<Tag>,
}

impl TagSet {
    fn partition_mut(&mut self, cardinality: Cardinality) -> &mut Vec<Tag> {
        match cardinality {
            Cardinality::Low => &mut self.low,
            Cardinality::High => &mut self.high,
        }
    }

    /// Adds or replaces a tag in the given cardinality partition.
    pub fn insert(&mut self, cardinality: Cardinality, tag: Tag) {
        let tags = self.partition_mut(cardinality);
        match tags.iter_mut().find(|existing| existing.key == tag.key) {
            Some(existing) => existing.value = tag.value,
            None => tags.push(tag),
        }
    }

    /// Iterates the tags of one cardinality partition.
    pub fn with_cardinality(&self, cardinality: Cardinality) -> impl Iterator<Item = &Tag> {
        match cardinality {
            Cardinality::Low => self.low.iter(),
            Cardinality::High => self.high.iter(),
        }
    }

    /// Iterates all tags, low-cardinality first.
    pub fn all(&self) -> impl Iterator<Item = &Tag> {
        self.low.iter().chain(self.high.iter())
    }

    /// Returns `true` if no tag has been recorded.
    pub fn is_empty(&self) -> bool {
        self.low.is_empty() && self.high.is_empty()
    }
}

/// One measurement instance with a start/stop lifecycle.
///
/// # Examples
///
/// ```
/// use recording_tracing::{Recording, Tag};
///
/// let mut recording = Recording::start("http.server.requests");
/// recording.tag(Tag::new("http.method", "GET"));
/// recording.stop();
///
/// assert!(recording.duration().is_some());
/// ```
#[derive(Debug)]
pub struct Recording {
    name: Cow<'static, str>,
    start_time: SystemTime,
    stop_time: Option<SystemTime>,
    tags: TagSet,
    attachments: Attachments,
}

impl Recording {
    /// Starts a new recording with the current wall-clock time.
    pub fn start(name: impl Into<Cow<'static, str>>) -> Self {
        Recording::start_at(name, SystemTime::now())
    }

    /// Starts a new recording at an explicit start time.
    pub fn start_at(name: impl Into<Cow<'static, str>>, start_time: SystemTime) -> Self {
        Recording {
            name: name.into(),
            start_time,
            stop_time: None,
            tags: TagSet::default(),
            attachments: Attachments::new(),
        }
    }

    /// The name of the measured operation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When the recording started.
    pub fn start_time(&self) -> SystemTime {
        self.start_time
    }

    /// When the recording stopped, if it has.
    pub fn stop_time(&self) -> Option<SystemTime> {
        self.stop_time
    }

    /// Returns `true` once the recording has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.stop_time.is_some()
    }

    /// Stops the recording with the current wall-clock time.
    ///
    /// The first stop wins; repeated stops do not move the stop time.
    pub fn stop(&mut self) {
        self.stop_at(SystemTime::now());
    }

    /// Stops the recording at an explicit stop time. The first stop wins.
    pub fn stop_at(&mut self, stop_time: SystemTime) {
        self.stop_time.get_or_insert(stop_time);
    }

    /// The elapsed time between start and stop, if stopped.
    pub fn duration(&self) -> Option<Duration> {
        self.stop_time
            .and_then(|stop| stop.duration_since(self.start_time).ok())
    }

    /// Records a low-cardinality tag, replacing any previous value for the
    /// same key.
    pub fn tag(&mut self, tag: Tag) {
        self.tags.insert(Cardinality::Low, tag);
    }

    /// Records a high-cardinality tag, replacing any previous value for the
    /// same key.
    pub fn tag_high_cardinality(&mut self, tag: Tag) {
        self.tags.insert(Cardinality::High, tag);
    }

    /// All tags accumulated so far.
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Returns a reference to the attached value of type `T`, if any.
    pub fn attachment<T: 'static>(&self) -> Option<&T> {
        self.attachments.get()
    }

    /// Returns a mutable reference to the attached value of type `T`, if
    /// any.
    pub fn attachment_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.attachments.get_mut()
    }

    /// Attaches a value for the duration of this recording, replacing and
    /// returning any previous value of the same type.
    pub fn set_attachment<T: 'static>(&mut self, value: T) -> Option<T> {
        self.attachments.insert(value)
    }

    /// Detaches and returns the value of type `T`, if any.
    pub fn take_attachment<T: 'static>(&mut self) -> Option<T> {
        self.attachments.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_first_write_wins() {
        let start = SystemTime::UNIX_EPOCH;
        let mut recording = Recording::start_at("op", start);
        assert!(!recording.is_stopped());
        assert_eq!(recording.duration(), None);

        recording.stop_at(start + Duration::from_millis(10));
        recording.stop_at(start + Duration::from_millis(99));

        assert_eq!(recording.duration(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn tags_are_last_write_wins_per_key() {
        let mut recording = Recording::start("op");
        recording.tag(Tag::new("outcome", "UNKNOWN"));
        recording.tag(Tag::new("http.method", "GET"));
        recording.tag(Tag::new("outcome", "SUCCESS"));

        let tags: Vec<_> = recording.tags().all().cloned().collect();
        assert_eq!(
            tags,
            vec![
                Tag::new("outcome", "SUCCESS"),
                Tag::new("http.method", "GET"),
            ]
        );
    }

    #[test]
    fn cardinality_partitions_are_separate() {
        let mut recording = Recording::start("op");
        recording.tag(Tag::new("http.method", "GET"));
        recording.tag_high_cardinality(Tag::new("http.url", "/orders/1234"));

        assert_eq!(recording.tags().with_cardinality(Cardinality::Low).count(), 1);
        assert_eq!(
            recording.tags().with_cardinality(Cardinality::High).count(),
            1
        );
        assert_eq!(recording.tags().all().count(), 2);
    }

    #[test]
    fn attachments_live_with_the_recording() {
        struct Marker(u8);

        let mut recording = Recording::start("op");
        assert!(recording.attachment::<Marker>().is_none());

        recording.set_attachment(Marker(7));
        assert_eq!(recording.attachment::<Marker>().map(|m| m.0), Some(7));

        recording.attachment_mut::<Marker>().unwrap().0 = 9;
        assert_eq!(recording.take_attachment::<Marker>().map(|m| m.0), Some(9));
        assert!(recording.attachment::<Marker>().is_none());
    }
}
