//! Application Context
//!
//! The store handle and its reactive mirror, provided via Leptos Context API.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use reactive_stores::Store;

use crate::events::{self, Outcome, UiEvent};
use crate::models::StoreSnapshot;
use crate::store::{StatusChannel, TodoStore};

/// Announcements land in a signal rendered inside the live region
#[derive(Clone, Copy)]
pub struct LiveRegion(pub RwSignal<String>);

impl StatusChannel for LiveRegion {
    fn announce(&self, message: &str) {
        self.0.set(message.to_string());
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The store itself is single-threaded, so it lives in local storage
    store: StoredValue<TodoStore, LocalStorage>,
    /// Latest snapshot, kept current by a store subscription
    pub view: Store<StoreSnapshot>,
    /// Last announcement
    pub status: ReadSignal<String>,
}

impl AppContext {
    pub fn new(store: TodoStore, view: Store<StoreSnapshot>, status: ReadSignal<String>) -> Self {
        Self {
            store: StoredValue::new_local(store),
            view,
            status,
        }
    }

    /// Route a UI event into the store
    pub fn dispatch(&self, event: UiEvent) -> Outcome {
        self.store
            .try_with_value(|store| events::dispatch(store, event))
            .unwrap_or_default()
    }

    /// Final save and subscriber teardown
    pub fn close(&self) {
        if self.store.try_with_value(TodoStore::close).is_none() {
            log::debug!("[APP] Store already disposed; final save skipped");
        }
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
