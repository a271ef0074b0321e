//! Process-unique identifiers stamped on the polygons of each built solid.

use std::sync::atomic::{AtomicU32, Ordering};

/// Identifier shared by all polygons of one primitive build.
pub type Tag = u32;

/// Monotonic tag source.
///
/// Builders take the counter by reference so callers choose the scope:
/// [`TagCounter::global`] for process-wide uniqueness, or a local counter for
/// reproducible numbering in tests. Wraps around after `u32::MAX` tags.
#[derive(Debug)]
pub struct TagCounter {
    next: AtomicU32,
}

impl TagCounter {
    pub const fn new() -> Self {
        TagCounter::starting_at(1)
    }

    pub const fn starting_at(first: Tag) -> Self {
        TagCounter {
            next: AtomicU32::new(first),
        }
    }

    /// Hand out the next tag. Safe to call from several threads at once.
    pub fn next_tag(&self) -> Tag {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The tag the next call to [`TagCounter::next_tag`] would return.
    pub fn peek(&self) -> Tag {
        self.next.load(Ordering::Relaxed)
    }

    /// Shared process-wide counter.
    pub fn global() -> &'static TagCounter {
        static GLOBAL: TagCounter = TagCounter::new();
        &GLOBAL
    }
}

impl Default for TagCounter {
    fn default() -> Self {
        TagCounter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_sequential() {
        let tags = TagCounter::new();
        assert_eq!(tags.next_tag(), 1);
        assert_eq!(tags.next_tag(), 2);
        assert_eq!(tags.peek(), 3);
    }

    #[test]
    fn tags_are_unique_across_threads() {
        let counter = TagCounter::starting_at(10);
        let tags = &counter;
        let mut seen: Vec<Tag> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || (0..100).map(|_| tags.next_tag()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 400);
        assert_eq!(seen[0], 10);
    }
}
