//! Keyboard routing for an open lightbox
//!
//! Only five keys are mapped. `Enter` and `Space` are deliberately absent:
//! they belong to the focused thumbnail, not to the global router.

use crate::lightbox::LightboxController;

/// A navigation command produced by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Next,
    Previous,
    Close,
    First,
    Last,
}

/// Map a DOM `KeyboardEvent.key` value to a command.
pub fn map_key(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowRight" => Some(KeyCommand::Next),
        "ArrowLeft" => Some(KeyCommand::Previous),
        "Escape" => Some(KeyCommand::Close),
        "Home" => Some(KeyCommand::First),
        "End" => Some(KeyCommand::Last),
        _ => None,
    }
}

/// What the caller should do with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyDisposition {
    /// Command to run, if one is mapped and wired
    pub command: Option<KeyCommand>,
    /// True for every mapped key, even when its command isn't wired
    pub prevent_default: bool,
}

/// Maps keys to commands. `First`/`Last` are optional because not every
/// lightbox exposes them; their keys are still swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardRouter {
    pub has_first: bool,
    pub has_last: bool,
}

impl Default for KeyboardRouter {
    fn default() -> Self {
        Self {
            has_first: true,
            has_last: true,
        }
    }
}

impl KeyboardRouter {
    pub fn handle(&self, key: &str) -> KeyDisposition {
        let Some(command) = map_key(key) else {
            return KeyDisposition::default();
        };

        let wired = match command {
            KeyCommand::First => self.has_first,
            KeyCommand::Last => self.has_last,
            _ => true,
        };

        KeyDisposition {
            command: wired.then_some(command),
            prevent_default: true,
        }
    }

    /// Route `key` into `controller`. A closed controller ignores every
    /// command, so a stray event after close changes nothing.
    pub fn dispatch(&self, controller: &mut LightboxController, key: &str) -> KeyDisposition {
        let disposition = self.handle(key);
        if let Some(command) = disposition.command {
            if controller.is_open() {
                controller.apply(command);
            }
        }
        disposition
    }
}

/// Owner of the key listener of one lightbox.
///
/// `sync` attaches a listener on entry to Open and hands it back on entry to
/// Closed. `L` is whatever detaches on drop: a window `EventListener` in the
/// browser.
#[derive(Debug)]
pub struct KeyListenerSlot<L> {
    listener: Option<L>,
}

impl<L> Default for KeyListenerSlot<L> {
    fn default() -> Self {
        Self { listener: None }
    }
}

impl<L> KeyListenerSlot<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the listener in line with `is_open`. Returns the detached
    /// listener, if any, so the caller decides when it is dropped.
    pub fn sync(&mut self, is_open: bool, attach: impl FnOnce() -> Option<L>) -> Option<L> {
        match (is_open, self.listener.is_some()) {
            (true, false) => {
                self.listener = attach();
                None
            }
            (false, true) => self.listener.take(),
            _ => None,
        }
    }

    /// Whether `sync` would change anything for this state
    pub fn needs_sync(&self, is_open: bool) -> bool {
        is_open != self.listener.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    pub fn take(&mut self) -> Option<L> {
        self.listener.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_mapping() {
        assert_eq!(map_key("ArrowRight"), Some(KeyCommand::Next));
        assert_eq!(map_key("ArrowLeft"), Some(KeyCommand::Previous));
        assert_eq!(map_key("Escape"), Some(KeyCommand::Close));
        assert_eq!(map_key("Home"), Some(KeyCommand::First));
        assert_eq!(map_key("End"), Some(KeyCommand::Last));
    }

    #[test]
    fn test_enter_and_space_unhandled() {
        let router = KeyboardRouter::default();
        for key in ["Enter", " ", "a", "Tab", "ArrowUp"] {
            let d = router.handle(key);
            assert_eq!(d.command, None, "{key}");
            assert!(!d.prevent_default, "{key}");
        }
    }

    #[test]
    fn test_unwired_home_still_prevents_default() {
        let router = KeyboardRouter {
            has_first: false,
            has_last: true,
        };
        let d = router.handle("Home");
        assert_eq!(d.command, None);
        assert!(d.prevent_default);
        assert_eq!(router.handle("End").command, Some(KeyCommand::Last));
    }

    #[test]
    fn test_dispatch_moves_open_controller() {
        let router = KeyboardRouter::default();
        let mut c = LightboxController::new(4);
        c.open(1);

        let d = router.dispatch(&mut c, "ArrowRight");
        assert_eq!(d.command, Some(KeyCommand::Next));
        assert_eq!(c.current_index(), 2);

        router.dispatch(&mut c, "End");
        assert_eq!(c.current_index(), 3);

        router.dispatch(&mut c, "Escape");
        assert!(!c.is_open());
    }

    #[test]
    fn test_dispatch_after_close_changes_nothing() {
        let router = KeyboardRouter::default();
        let mut c = LightboxController::new(4);
        c.open(2);
        c.close();
        let before = c.clone();

        for key in ["ArrowRight", "ArrowLeft", "Home", "End"] {
            router.dispatch(&mut c, key);
        }
        assert_eq!(c, before);
    }

    /// Counts live listeners the way a window counts attached handlers
    struct FakeListener(Rc<Cell<usize>>);

    impl FakeListener {
        fn attach(live: &Rc<Cell<usize>>) -> Option<Self> {
            live.set(live.get() + 1);
            Some(Self(live.clone()))
        }
    }

    impl Drop for FakeListener {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn test_slot_attaches_once_while_open() {
        let live = Rc::new(Cell::new(0));
        let mut slot = KeyListenerSlot::new();

        assert!(slot.sync(true, || FakeListener::attach(&live)).is_none());
        assert!(slot.sync(true, || FakeListener::attach(&live)).is_none());
        assert_eq!(live.get(), 1);
        assert!(slot.is_attached());
        assert!(!slot.needs_sync(true));
    }

    #[test]
    fn test_slot_detaches_on_close() {
        let live = Rc::new(Cell::new(0));
        let mut slot = KeyListenerSlot::new();
        let _ = slot.sync(true, || FakeListener::attach(&live));

        assert!(slot.needs_sync(false));
        drop(slot.sync(false, || FakeListener::attach(&live)));
        assert_eq!(live.get(), 0);
        assert!(!slot.is_attached());

        // Closed stays closed
        assert!(slot.sync(false, || FakeListener::attach(&live)).is_none());
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_slot_failed_attach_retries_next_sync() {
        let live = Rc::new(Cell::new(0));
        let mut slot: KeyListenerSlot<FakeListener> = KeyListenerSlot::new();
        let _ = slot.sync(true, || None);
        assert!(!slot.is_attached());
        let _ = slot.sync(true, || FakeListener::attach(&live));
        assert!(slot.is_attached());
    }

    #[test]
    fn test_key_match_is_case_sensitive() {
        assert_eq!(map_key("escape"), None);
        assert_eq!(map_key("arrowright"), None);
    }
}
