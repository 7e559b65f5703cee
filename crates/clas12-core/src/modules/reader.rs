//! Event sources: an in-memory queue and a JSON Lines event file.
//!
//! The file format is one JSON object per line,
//! `{"particles":[{"charge":-1,"px":..,"py":..,"pz":..,...}]}`. Blank lines are
//! ignored and do not count as events.

use super::traits::{EventSource, OpenEventSource};
use crate::domain::{Clas12Error, Event, ReaderResult};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct MemoryEventSource {
    total: usize,
    pending: VecDeque<Event>,
}

impl MemoryEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            total: events.len(),
            pending: events.into(),
        }
    }
}

impl FromIterator<Event> for MemoryEventSource {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl EventSource for MemoryEventSource {
    fn len(&self) -> usize {
        self.total
    }

    fn next_event(&mut self) -> ReaderResult<Option<Event>> {
        Ok(self.pending.pop_front())
    }
}

#[derive(Debug)]
pub struct JsonLinesEventFile {
    path: PathBuf,
    total: usize,
    reader: BufReader<File>,
    line_number: usize,
    line: String,
}

impl JsonLinesEventFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_reader(path: &Path) -> ReaderResult<BufReader<File>> {
        File::open(path).map(BufReader::new).map_err(|source| {
            Clas12Error::io_system(
                "IO.EVENT_FILE",
                format!("failed to open event file '{}': {}", path.display(), source),
            )
        })
    }

    fn read_error(&self, source: std::io::Error) -> Clas12Error {
        Clas12Error::io_system(
            "IO.EVENT_FILE",
            format!(
                "failed to read '{}' at line {}: {}",
                self.path.display(),
                self.line_number,
                source
            ),
        )
    }
}

impl OpenEventSource for JsonLinesEventFile {
    /// Counts events with a first pass so `len` is exact, then rewinds.
    fn open(path: &Path) -> ReaderResult<Self> {
        let mut total = 0;
        for (index, line) in Self::open_reader(path)?.lines().enumerate() {
            let line = line.map_err(|source| {
                Clas12Error::io_system(
                    "IO.EVENT_FILE",
                    format!(
                        "failed to read '{}' at line {}: {}",
                        path.display(),
                        index + 1,
                        source
                    ),
                )
            })?;
            if !line.trim().is_empty() {
                total += 1;
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            total,
            reader: Self::open_reader(path)?,
            line_number: 0,
            line: String::new(),
        })
    }
}

impl EventSource for JsonLinesEventFile {
    fn len(&self) -> usize {
        self.total
    }

    fn next_event(&mut self) -> ReaderResult<Option<Event>> {
        loop {
            self.line.clear();
            let read = match self.reader.read_line(&mut self.line) {
                Ok(read) => read,
                Err(source) => return Err(self.read_error(source)),
            };
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let record = self.line.trim();
            if record.is_empty() {
                continue;
            }

            return serde_json::from_str::<Event>(record).map(Some).map_err(|source| {
                Clas12Error::input_validation(
                    "INPUT.EVENT_RECORD",
                    format!(
                        "invalid event record in '{}' at line {}: {}",
                        self.path.display(),
                        self.line_number,
                        source
                    ),
                )
            });
        }
    }
}
