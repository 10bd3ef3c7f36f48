//! New Todo Form Component
//!
//! Text input plus submit button for adding items.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::events::UiEvent;

/// Form for creating new items
#[component]
pub fn TodoForm() -> impl IntoView {
    let ctx = use_app_context();

    let (new_text, set_new_text) = signal(String::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let add_item = move |ev: web_sys::SubmitEvent| {
        let outcome = ctx.dispatch(UiEvent::Submit { text: new_text.get_untracked() });
        if outcome.prevent_default {
            ev.prevent_default();
        }
        if outcome.reset_input {
            set_new_text.set(String::new());
            if let Some(input) = input_ref.get_untracked() {
                let _ = input.focus();
            }
        }
    };

    view! {
        <form id="todoForm" class="todo-form" on:submit=add_item>
            <label for="todo-input" class="visually-hidden">"New todo"</label>
            <input
                id="todo-input"
                type="text"
                placeholder="What needs to be done?"
                autocomplete="off"
                node_ref=input_ref
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
