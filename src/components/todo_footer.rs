//! Todo Footer Component
//!
//! Remaining count, filter buttons and the two bulk actions.

use leptos::prelude::*;

use crate::components::FilterBar;
use crate::context::use_app_context;
use crate::events::UiEvent;
use crate::models::StoreSnapshotStoreFields;
use crate::render::{remaining_label, BulkControls};

#[component]
pub fn TodoFooter() -> impl IntoView {
    let ctx = use_app_context();
    let view_state = ctx.view;

    let bulk = move || view_state.items().with(|items| BulkControls::from_items(items));

    view! {
        <footer class="todo-footer">
            <span id="remainingLabel" class="remaining-label">
                {move || view_state.items().with(|items| remaining_label(items))}
            </span>

            <FilterBar />

            <div class="bulk-actions">
                <button
                    id="toggleAll"
                    type="button"
                    class="bulk-btn"
                    disabled=move || bulk().toggle_all_disabled
                    on:click=move |_| {
                        ctx.dispatch(UiEvent::ToggleAll);
                    }
                >
                    "Toggle all"
                </button>
                <button
                    id="clearCompleted"
                    type="button"
                    class="bulk-btn"
                    disabled=move || bulk().clear_completed_disabled
                    on:click=move |_| {
                        ctx.dispatch(UiEvent::ClearCompleted);
                    }
                >
                    "Clear completed"
                </button>
            </div>
        </footer>
    }
}
