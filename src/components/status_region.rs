//! Status Region Component
//!
//! Polite live region that screen readers announce on change.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn StatusRegion() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <p id="statusMessage" class="visually-hidden" role="status" aria-live="polite">
            {move || ctx.status.get()}
        </p>
    }
}
