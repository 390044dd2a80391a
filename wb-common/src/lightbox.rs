//! Lightbox state machine
//!
//! Two states: Closed and Open(index). The key listener that feeds an open
//! lightbox lives in `keyboard::KeyListenerSlot`.

use crate::image::{ImageCollection, ImageItem};
use crate::keyboard::KeyCommand;
use tracing::debug;

/// Single source of truth for which image shows and whether the overlay is up.
///
/// Every navigation op is a silent no-op while closed or when the collection
/// is empty. Out-of-range `open`/`go_to` requests are ignored, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxController {
    len: usize,
    generation: u64,
    is_open: bool,
    current_index: usize,
}

impl LightboxController {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            generation: 0,
            is_open: false,
            current_index: 0,
        }
    }

    pub fn for_collection(collection: &ImageCollection) -> Self {
        Self {
            generation: collection.generation(),
            ..Self::new(collection.len())
        }
    }

    pub fn open(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.current_index = index;
        self.is_open = true;
        debug!("Lightbox opened at {}/{}", index + 1, self.len);
    }

    /// Close without touching the index; the next `open` picks its own.
    pub fn close(&mut self) {
        if self.is_open {
            debug!("Lightbox closed at {}", self.current_index + 1);
        }
        self.is_open = false;
    }

    pub fn next(&mut self) {
        if self.can_navigate() {
            self.current_index = (self.current_index + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if self.can_navigate() {
            self.current_index = (self.current_index + self.len - 1) % self.len;
        }
    }

    pub fn go_to(&mut self, index: usize) {
        if self.can_navigate() && index < self.len {
            self.current_index = index;
        }
    }

    pub fn first(&mut self) {
        if self.can_navigate() {
            self.current_index = 0;
        }
    }

    pub fn last(&mut self) {
        if self.can_navigate() {
            self.current_index = self.len - 1;
        }
    }

    pub fn apply(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Next => self.next(),
            KeyCommand::Previous => self.previous(),
            KeyCommand::Close => self.close(),
            KeyCommand::First => self.first(),
            KeyCommand::Last => self.last(),
        }
    }

    /// Point the controller at a (possibly) different collection.
    ///
    /// A new identity forces Closed and index 0, since old indices would
    /// name different images. Returns whether the session was invalidated.
    pub fn set_collection(&mut self, len: usize, generation: u64) -> bool {
        self.len = len;
        if generation == self.generation {
            if self.current_index >= len {
                self.current_index = 0;
                self.is_open = false;
            }
            return false;
        }
        self.generation = generation;
        self.is_open = false;
        self.current_index = 0;
        debug!("Lightbox session invalidated by collection change ({len} images)");
        true
    }

    pub fn sync_with(&mut self, collection: &ImageCollection) -> bool {
        self.set_collection(collection.len(), collection.generation())
    }

    fn can_navigate(&self) -> bool {
        self.is_open && self.len > 0
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Raw index, kept across close. Only meaningful while open.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Index on screen, `None` while closed.
    pub fn displayed_index(&self) -> Option<usize> {
        self.is_open.then_some(self.current_index)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_item<'a>(&self, collection: &'a ImageCollection) -> Option<&'a ImageItem> {
        self.displayed_index().and_then(|i| collection.get(i))
    }

    /// Text for the off-screen live region.
    pub fn announcement(&self) -> Option<String> {
        self.displayed_index()
            .map(|i| format!("Image {} of {}", i + 1, self.len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::sample_items;

    fn opened(len: usize, at: usize) -> LightboxController {
        let mut c = LightboxController::new(len);
        c.open(at);
        c
    }

    #[test]
    fn test_initially_closed() {
        let c = LightboxController::new(3);
        assert!(!c.is_open());
        assert_eq!(c.displayed_index(), None);
        assert_eq!(c.announcement(), None);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        for len in 1..=6 {
            for start in 0..len {
                let mut c = opened(len, start);
                for _ in 0..len {
                    c.next();
                }
                assert_eq!(c.current_index(), start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn test_previous_inverts_next() {
        for len in 1..=5 {
            for start in 0..len {
                let mut c = opened(len, start);
                c.next();
                c.previous();
                assert_eq!(c.current_index(), start);
                c.previous();
                c.next();
                assert_eq!(c.current_index(), start);
            }
        }
    }

    #[test]
    fn test_wraparound() {
        let mut c = opened(4, 3);
        c.next();
        assert_eq!(c.current_index(), 0);
        c.previous();
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn test_open_out_of_range_is_noop() {
        let mut c = opened(3, 1);
        let before = c.clone();
        c.open(3);
        c.open(usize::MAX);
        assert_eq!(c, before);

        let mut closed = LightboxController::new(3);
        closed.open(7);
        assert!(!closed.is_open());
        assert_eq!(closed.current_index(), 0);
    }

    #[test]
    fn test_go_to_bounds() {
        let mut c = opened(3, 0);
        c.go_to(2);
        assert_eq!(c.current_index(), 2);
        c.go_to(3);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_close_keeps_index() {
        let mut c = opened(5, 3);
        c.close();
        assert!(!c.is_open());
        assert_eq!(c.current_index(), 3);
        c.open(1);
        assert_eq!(c.displayed_index(), Some(1));
    }

    #[test]
    fn test_navigation_ignored_when_closed() {
        let mut c = LightboxController::new(3);
        c.next();
        c.previous();
        c.last();
        c.go_to(2);
        assert_eq!(c.current_index(), 0);
        assert!(!c.is_open());
    }

    #[test]
    fn test_empty_collection_never_opens() {
        let mut c = LightboxController::new(0);
        c.open(0);
        c.next();
        c.last();
        assert!(!c.is_open());
    }

    #[test]
    fn test_first_and_last() {
        let mut c = opened(3, 1);
        c.last();
        assert_eq!(c.current_index(), 2);
        c.first();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_collection_change_invalidates() {
        let all = ImageCollection::new(sample_items(6));
        let mut c = LightboxController::for_collection(&all);
        c.open(4);

        let filtered = all.filter_by_space(&crate::image::SpaceFilter::Space("wilson".into()));
        assert!(c.sync_with(&filtered));
        assert!(!c.is_open());
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.len(), 3);

        c.open(2);
        assert!(!c.sync_with(&filtered));
        assert_eq!(c.displayed_index(), Some(2));
    }

    #[test]
    fn test_announcement_and_current_item() {
        let coll = ImageCollection::new(sample_items(4));
        let mut c = LightboxController::for_collection(&coll);
        c.open(1);
        assert_eq!(c.announcement().as_deref(), Some("Image 2 of 4"));
        assert_eq!(c.current_item(&coll).map(|i| i.alt.as_str()), Some("Image 2"));
    }
}
