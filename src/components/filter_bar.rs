//! Filter Bar Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::events::UiEvent;
use crate::models::{Filter, StoreSnapshotStoreFields};
use crate::render::aria_pressed;

/// One button per filter; the active one is pressed
#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_app_context();
    let view_state = ctx.view;

    view! {
        <div class="filter-bar" role="group" aria-label="Filter todos">
            {Filter::ALL.into_iter().map(|filter| {
                let is_active = move || view_state.filter().get() == filter;
                view! {
                    <button
                        type="button"
                        class=move || if is_active() { "filter-btn active" } else { "filter-btn" }
                        data-filter=filter.as_str()
                        aria-pressed=move || aria_pressed(filter, view_state.filter().get())
                        on:click=move |_| {
                            ctx.dispatch(UiEvent::SelectFilter { value: filter.as_str().to_string() });
                        }
                    >
                        {filter.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
