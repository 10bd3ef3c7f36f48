//! Todo Store
//!
//! Owns the canonical list state (items, filter, editing cursor).
//! Every mutation runs to completion, then writes the durable snapshot
//! and fans a fresh `StoreSnapshot` out to subscribers. Invalid requests
//! (blank text, unknown id, unknown filter) are ignored.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::models::{Filter, StoreSnapshot, TodoItem};
use crate::persist::{self, DurableState, KeyValueStorage};

/// Single-slot output for human-readable announcements (last write wins)
pub trait StatusChannel {
    fn announce(&self, message: &str);
}

type Callback = Rc<dyn Fn(&StoreSnapshot)>;

#[derive(Default)]
struct Subscribers {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Callback)>>,
}

/// Handle returned by [`TodoStore::subscribe`]
#[must_use = "keep the subscription to unsubscribe later"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<Subscribers>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.entries.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[derive(Default)]
struct StoreState {
    items: Vec<TodoItem>,
    filter: Filter,
    editing_id: Option<String>,
}

struct Inner {
    state: RefCell<StoreState>,
    storage: Box<dyn KeyValueStorage>,
    status: Box<dyn StatusChannel>,
    subscribers: Rc<Subscribers>,
    /// False while writes are failing and the list lives in memory only
    storage_healthy: Cell<bool>,
    /// Set while subscribers are being called
    notifying: Cell<bool>,
    /// A subscriber changed the state mid fan-out; start over with a fresh snapshot
    pending: Cell<bool>,
}

/// Shared handle to the list state; clones point at the same store
#[derive(Clone)]
pub struct TodoStore {
    inner: Rc<Inner>,
}

impl TodoStore {
    /// Load the durable snapshot from `storage` and build the store
    pub fn open(
        storage: impl KeyValueStorage + 'static,
        status: impl StatusChannel + 'static,
    ) -> Self {
        let DurableState { items, filter } = persist::load(&storage);
        log::info!("[STORE] Opened with {} items, filter={}", items.len(), filter);
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(StoreState {
                    items,
                    filter,
                    editing_id: None,
                }),
                storage: Box::new(storage),
                status: Box::new(status),
                subscribers: Rc::new(Subscribers::default()),
                storage_healthy: Cell::new(true),
                notifying: Cell::new(false),
                pending: Cell::new(false),
            }),
        }
    }

    /// Deep copy of the current state
    pub fn state(&self) -> StoreSnapshot {
        let state = self.inner.state.borrow();
        StoreSnapshot {
            items: state.items.clone(),
            filter: state.filter,
            editing_id: state.editing_id.clone(),
        }
    }

    /// Register `callback` and call it once right away with the current state
    pub fn subscribe(&self, callback: impl Fn(&StoreSnapshot) + 'static) -> Subscription {
        let subscribers = &self.inner.subscribers;
        let id = subscribers.next_id.get();
        subscribers.next_id.set(id + 1);

        let callback: Callback = Rc::new(callback);
        subscribers.entries.borrow_mut().push((id, callback.clone()));
        callback(&self.state());

        Subscription {
            id,
            subscribers: Rc::downgrade(subscribers),
        }
    }

    pub fn add_item(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let item = TodoItem::new(text);
        log::debug!("[STORE] Add {}", item.id);
        self.inner.state.borrow_mut().items.insert(0, item);
        self.persist();
        self.notify();
        self.announce(&format!("{} added", text));
    }

    pub fn toggle_item(&self, id: &str) {
        let toggled = {
            let mut state = self.inner.state.borrow_mut();
            match state.items.iter_mut().find(|item| item.id == id) {
                Some(item) => {
                    item.completed = !item.completed;
                    true
                }
                None => false,
            }
        };
        if !toggled {
            return;
        }
        log::debug!("[STORE] Toggle {}", id);
        self.persist();
        self.notify();
    }

    pub fn delete_item(&self, id: &str) {
        let removed = {
            let mut state = self.inner.state.borrow_mut();
            let position = state.items.iter().position(|item| item.id == id);
            position.map(|index| state.items.remove(index))
        };
        let Some(removed) = removed else {
            return;
        };
        log::debug!("[STORE] Delete {}", id);
        self.persist();
        self.notify();
        self.announce(&format!("{} removed", removed.text));
    }

    /// Accepts `all`, `active` or `completed`; anything else is ignored
    pub fn set_filter(&self, value: &str) {
        let filter: Filter = match value.parse() {
            Ok(filter) => filter,
            Err(e) => {
                log::debug!("[STORE] Ignoring {}", e);
                return;
            }
        };
        self.inner.state.borrow_mut().filter = filter;
        self.persist();
        self.notify();
        self.announce(&format!("{} filter active", filter.label()));
    }

    pub fn clear_completed(&self) {
        let cleared = {
            let mut state = self.inner.state.borrow_mut();
            let before = state.items.len();
            state.items.retain(|item| !item.completed);
            before - state.items.len()
        };
        if cleared == 0 {
            return;
        }
        log::debug!("[STORE] Cleared {} completed", cleared);
        self.persist();
        self.notify();
        self.announce("Cleared completed todos");
    }

    /// Complete everything unless everything is already complete, then reactivate all
    pub fn toggle_all_items(&self) {
        let complete_all = {
            let mut state = self.inner.state.borrow_mut();
            if state.items.is_empty() {
                return;
            }
            let complete_all = state.items.iter().any(|item| !item.completed);
            for item in state.items.iter_mut() {
                item.completed = complete_all;
            }
            complete_all
        };
        self.persist();
        self.notify();
        self.announce(if complete_all {
            "All todos completed"
        } else {
            "Marked all todos active"
        });
    }

    /// Move the editing cursor; the id is not checked against the items
    pub fn begin_edit(&self, id: &str) {
        self.inner.state.borrow_mut().editing_id = Some(id.to_string());
        self.notify();
    }

    /// Blank text cancels the edit instead of saving it
    pub fn commit_edit(&self, id: &str, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.cancel_edit();
            return;
        }
        let updated = {
            let mut state = self.inner.state.borrow_mut();
            state.editing_id = None;
            match state.items.iter_mut().find(|item| item.id == id) {
                Some(item) => {
                    item.text = text.to_string();
                    true
                }
                None => false,
            }
        };
        if updated {
            self.persist();
        }
        self.notify();
        if updated {
            self.announce("Todo updated");
        }
    }

    pub fn cancel_edit(&self) {
        self.inner.state.borrow_mut().editing_id = None;
        self.notify();
    }

    /// Write a last snapshot and drop every subscriber
    pub fn close(&self) {
        self.persist();
        self.inner.subscribers.entries.borrow_mut().clear();
        log::info!("[STORE] Closed");
    }

    fn persist(&self) {
        let durable = {
            let state = self.inner.state.borrow();
            DurableState {
                items: state.items.clone(),
                filter: state.filter,
            }
        };
        match persist::save(self.inner.storage.as_ref(), &durable) {
            Ok(()) => {
                if !self.inner.storage_healthy.replace(true) {
                    log::info!("[STORE] Storage recovered; todos are saved again");
                }
            }
            Err(e) => {
                if self.inner.storage_healthy.replace(false) {
                    log::warn!("Unable to save todos; continuing in-memory: {}", e);
                }
            }
        }
    }

    /// Snapshot first, then call out; callbacks may re-enter the store
    ///
    /// A mutation made from inside a callback does not fan out on its own.
    /// It restarts the outer fan-out so no subscriber is left holding an
    /// older snapshot than the store.
    fn notify(&self) {
        let inner = &self.inner;
        if inner.notifying.get() {
            inner.pending.set(true);
            return;
        }
        inner.notifying.set(true);

        'fan_out: loop {
            inner.pending.set(false);
            let snapshot = self.state();
            let callbacks: Vec<Callback> = inner
                .subscribers
                .entries
                .borrow()
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect();
            for callback in callbacks {
                callback(&snapshot);
                if inner.pending.get() {
                    continue 'fan_out;
                }
            }
            break;
        }

        inner.notifying.set(false);
    }

    fn announce(&self, message: &str) {
        self.inner.status.announce(message);
    }
}
