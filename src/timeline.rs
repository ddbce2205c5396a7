//! Timeline aggregation for trace events.
//!
//! This module defines the immutable event record and the append-only
//! timeline that merges events from every source (container logs, service
//! lifecycle events) into one chronologically ordered sequence.

use chrono::{DateTime, Utc};

/// Source label attached to ECS service lifecycle events.
///
/// Container log events carry the container name instead.
pub const SERVICE_SOURCE: &str = "SERVICE";

/// A single immutable event destined for the timeline.
///
/// Events carry no identity; duplicates are permitted and preserved.
#[derive(Debug, Clone)]
pub struct Event {
    /// Instant the event occurred, as reported by its source
    pub timestamp: DateTime<Utc>,
    /// Origin tag: a container name, or [`SERVICE_SOURCE`]
    pub source: String,
    /// Opaque message text
    pub message: String,
}

impl Event {
    /// Creates a new event.
    pub fn new(
        timestamp: DateTime<Utc>,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            source: source.into(),
            message: message.into(),
        }
    }
}

/// Ordered aggregation of events from all sources for one trace operation.
///
/// Producers append in any order; a single presentation pass sorts and
/// renders. All `add` calls must complete before the first read: the
/// structure has one writer phase followed by one reader phase and is not
/// meant for concurrent mutation.
#[derive(Debug, Default)]
pub struct Timeline {
    events: Vec<Event>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event. Amortized O(1); no ordering requirement at call time.
    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events collected so far.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The current event sequence, in whatever order the last sort left it.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Sorts oldest-first. Stable: events sharing a timestamp keep their
    /// insertion order.
    pub fn sort_ascending(&mut self) {
        self.events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }

    /// Sorts newest-first. Stable, same tie rule as [`Self::sort_ascending`].
    pub fn sort_descending(&mut self) {
        self.events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }

    /// Returns the slice of events for a zero-based page.
    ///
    /// Pages are total and non-overlapping: concatenating every page in
    /// order reproduces the full sequence exactly once. A page past the end
    /// is empty.
    pub fn page(&self, page: usize, page_size: usize) -> &[Event] {
        let start = page.saturating_mul(page_size).min(self.events.len());
        let end = start.saturating_add(page_size).min(self.events.len());
        &self.events[start..end]
    }

    /// Total page count for a given page size: `ceil(len / page_size)`.
    pub fn total_pages(count: usize, page_size: usize) -> usize {
        count.div_ceil(page_size)
    }
}

/// Decides which page to show after one line of pager input.
///
/// * `None` (input stream closed) or `q` terminates: returns `None`.
/// * An empty line advances to the next page, or stays put on the last one.
/// * Anything else redraws the current page.
pub fn next_page(input: Option<&str>, current_page: usize, total_pages: usize) -> Option<usize> {
    match input {
        None | Some("q") => None,
        Some("") => {
            if current_page + 1 < total_pages {
                Some(current_page + 1)
            } else {
                Some(current_page)
            }
        }
        Some(_) => Some(current_page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    fn timeline_of(stamps: &[i64]) -> Timeline {
        let mut tl = Timeline::new();
        for (i, &s) in stamps.iter().enumerate() {
            tl.add(Event::new(ts(s), "web", format!("message {i}")));
        }
        tl
    }

    #[test]
    fn test_add_preserves_count() {
        let mut tl = timeline_of(&[3, 1, 2]);
        assert_eq!(tl.len(), 3);
        tl.sort_ascending();
        // Sorting never drops or duplicates
        assert_eq!(tl.len(), 3);
    }

    #[test]
    fn test_sort_ascending_monotonic() {
        let mut tl = timeline_of(&[5, 1, 4, 2, 3]);
        tl.sort_ascending();
        let events = tl.events();
        for pair in events.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        assert_eq!(events[0].timestamp, ts(1));
    }

    #[test]
    fn test_sort_descending_monotonic() {
        let mut tl = timeline_of(&[5, 1, 4, 2, 3]);
        tl.sort_descending();
        let events = tl.events();
        for pair in events.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        assert_eq!(events[0].timestamp, ts(5));
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let mut tl = Timeline::new();
        tl.add(Event::new(ts(100), "web", "first added"));
        tl.add(Event::new(ts(100), "db", "second added"));
        tl.add(Event::new(ts(50), "web", "oldest"));

        tl.sort_ascending();
        assert_eq!(tl.events()[0].message, "oldest");
        assert_eq!(tl.events()[1].message, "first added");
        assert_eq!(tl.events()[2].message, "second added");

        // Descending keeps the same relative order for the tied pair
        tl.sort_descending();
        assert_eq!(tl.events()[0].message, "first added");
        assert_eq!(tl.events()[1].message, "second added");
        assert_eq!(tl.events()[2].message, "oldest");
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let mut tl = Timeline::new();
        tl.add(Event::new(ts(1), "web", "same"));
        tl.add(Event::new(ts(1), "web", "same"));
        tl.sort_ascending();
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.events()[0].message, tl.events()[1].message);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Timeline::total_pages(0, 5), 0);
        assert_eq!(Timeline::total_pages(1, 5), 1);
        assert_eq!(Timeline::total_pages(5, 5), 1);
        assert_eq!(Timeline::total_pages(6, 5), 2);
        assert_eq!(Timeline::total_pages(12, 5), 3);
    }

    #[test]
    fn test_page_slicing_is_total_and_non_overlapping() {
        let mut tl = timeline_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        tl.sort_ascending();

        let page_size = 5;
        let total = Timeline::total_pages(tl.len(), page_size);
        assert_eq!(total, 3);

        let mut rebuilt = Vec::new();
        for page in 0..total {
            rebuilt.extend(tl.page(page, page_size).iter().cloned());
        }
        assert_eq!(rebuilt.len(), tl.len());
        for (a, b) in rebuilt.iter().zip(tl.events()) {
            assert_eq!(a.message, b.message);
        }

        // 12 events at page size 5 slice as 5/5/2
        assert_eq!(tl.page(0, page_size).len(), 5);
        assert_eq!(tl.page(1, page_size).len(), 5);
        assert_eq!(tl.page(2, page_size).len(), 2);
        assert!(tl.page(3, page_size).is_empty());
    }

    #[test]
    fn test_last_page_full_when_remainder_is_zero() {
        let tl = timeline_of(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(Timeline::total_pages(tl.len(), 3), 2);
        assert_eq!(tl.page(1, 3).len(), 3);
    }

    #[test]
    fn test_next_page_advances_on_empty_line() {
        assert_eq!(next_page(Some(""), 0, 3), Some(1));
        assert_eq!(next_page(Some(""), 1, 3), Some(2));
    }

    #[test]
    fn test_next_page_stays_on_last_page() {
        assert_eq!(next_page(Some(""), 2, 3), Some(2));
        assert_eq!(next_page(Some(""), 0, 1), Some(0));
    }

    #[test]
    fn test_next_page_quits_on_q_and_closed_input() {
        assert_eq!(next_page(Some("q"), 0, 3), None);
        assert_eq!(next_page(None, 1, 3), None);
    }

    #[test]
    fn test_next_page_ignores_other_input() {
        assert_eq!(next_page(Some("x"), 1, 3), Some(1));
        assert_eq!(next_page(Some("quit"), 0, 3), Some(0));
    }
}
