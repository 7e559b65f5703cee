use crate::domain::{Event, ReaderResult};
use std::path::Path;

/// A finite, single-pass stream of events.
pub trait EventSource {
    /// Total number of events the source will yield, known up front for
    /// progress reporting.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `Ok(None)` marks the end of the stream.
    fn next_event(&mut self) -> ReaderResult<Option<Event>>;

    fn events(&mut self) -> Events<'_, Self>
    where
        Self: Sized,
    {
        Events { source: self }
    }
}

/// Sources backed by a file on disk.
pub trait OpenEventSource: EventSource + Sized {
    fn open(path: &Path) -> ReaderResult<Self>;
}

pub struct Events<'a, S> {
    source: &'a mut S,
}

impl<S: EventSource> Iterator for Events<'_, S> {
    type Item = ReaderResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.next_event().transpose()
    }
}
