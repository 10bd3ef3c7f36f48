//! Todo List Component
//!
//! Visible rows for the active filter, or a notice when there are none.

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::context::use_app_context;
use crate::models::StoreSnapshotStoreFields;
use crate::render::{visible_rows, EMPTY_NOTICE};

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_app_context();
    let view_state = ctx.view;

    let rows = move || {
        let filter = view_state.filter().get();
        let editing_id = view_state.editing_id().get();
        view_state
            .items()
            .with(|items| visible_rows(items, filter, editing_id.as_deref()))
    };

    view! {
        <ul id="todoList" class="todo-list">
            <Show
                when=move || !rows().is_empty()
                fallback=|| view! { <li class="todo-item empty" role="note">{EMPTY_NOTICE}</li> }
            >
                <For
                    each=rows
                    // Whole row as key so text/completed/editing changes re-render it
                    key=|row| row.clone()
                    children=move |row| view! { <TodoRow row=row /> }
                />
            </Show>
        </ul>
    }
}
