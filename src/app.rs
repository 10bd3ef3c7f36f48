//! Todo Widget App
//!
//! Builds the store, mirrors its snapshots into a reactive store and lays
//! out the widget.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{StatusRegion, TodoFooter, TodoForm, TodoList};
use crate::context::{AppContext, LiveRegion};
use crate::models::{StoreSnapshot, StoreSnapshotStoreFields};
use crate::persist;
use crate::store::{Subscription, TodoStore};

#[component]
pub fn App() -> impl IntoView {
    let status = RwSignal::new(String::new());
    let store = TodoStore::open(persist::open_default(), LiveRegion(status));

    // Mirror every store snapshot into the view store
    let view_state = Store::new(StoreSnapshot::default());
    let subscription = store.subscribe(move |snapshot: &StoreSnapshot| {
        *view_state.items().write() = snapshot.items.clone();
        *view_state.filter().write() = snapshot.filter;
        *view_state.editing_id().write() = snapshot.editing_id.clone();
    });

    let ctx = AppContext::new(store, view_state, status.read_only());
    provide_context(ctx);

    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || {
        subscription.try_update_value(|sub| sub.take().map(Subscription::unsubscribe));
        ctx.close();
    });

    view! {
        <main class="todo-app">
            <h1>"Todos"</h1>
            <TodoForm />
            <TodoList />
            <TodoFooter />
            <StatusRegion />
        </main>
    }
}
