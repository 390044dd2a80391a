use dioxus::prelude::*;
use wb_common::{ImageCollection, KeyCommand, KeyDisposition, KeyboardRouter, LightboxController};

/// Copyable handle to one lightbox's state.
///
/// Mutations go through `try_write` because browser callbacks can fire
/// after the owning component has unmounted.
#[derive(Clone, Copy, PartialEq)]
pub struct LightboxHandle {
    controller: Signal<LightboxController>,
}

impl LightboxHandle {
    fn update(&self, f: impl FnOnce(&mut LightboxController)) {
        let mut controller = self.controller;
        if let Ok(mut guard) = controller.try_write() {
            f(&mut guard);
        };
    }

    pub fn open(&self, index: usize) {
        self.update(|c| c.open(index));
    }

    pub fn close(&self) {
        self.update(|c| c.close());
    }

    pub fn next(&self) {
        self.update(|c| c.next());
    }

    pub fn previous(&self) {
        self.update(|c| c.previous());
    }

    pub fn go_to(&self, index: usize) {
        self.update(|c| c.go_to(index));
    }

    pub fn apply(&self, command: KeyCommand) {
        self.update(|c| c.apply(command));
    }

    /// Route a key press. The disposition still comes back when the state
    /// is unavailable so the caller can swallow mapped keys.
    pub fn handle_key(&self, router: &KeyboardRouter, key: &str) -> KeyDisposition {
        let mut controller = self.controller;
        let disposition = match controller.try_write() {
            Ok(mut guard) => router.dispatch(&mut guard, key),
            Err(_) => router.handle(key),
        };
        disposition
    }

    pub fn is_open(&self) -> bool {
        self.controller.read().is_open()
    }

    pub fn displayed_index(&self) -> Option<usize> {
        self.controller.read().displayed_index()
    }

    pub fn announcement(&self) -> Option<String> {
        self.controller.read().announcement()
    }
}

/// Lightbox state for `collection`. A collection with a new identity
/// (e.g. after a filter change) closes the lightbox and rewinds to 0.
pub fn use_lightbox(collection: &ImageCollection) -> LightboxHandle {
    let mut controller = use_signal(|| LightboxController::for_collection(collection));

    if controller.peek().generation() != collection.generation() {
        controller.write().sync_with(collection);
    }

    LightboxHandle { controller }
}
