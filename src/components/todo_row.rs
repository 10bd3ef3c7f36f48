//! Todo Row Component
//!
//! Checkbox, label (or inline edit field) and delete button for one item.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::events::UiEvent;
use crate::render::{RowView, EDIT_MAX_LENGTH};

#[component]
pub fn TodoRow(row: RowView) -> impl IntoView {
    let ctx = use_app_context();

    let id = row.id.clone();
    let text = row.text.clone();

    let toggle = {
        let id = id.clone();
        move |_| {
            ctx.dispatch(UiEvent::Toggle { id: id.clone() });
        }
    };

    let delete = {
        let id = id.clone();
        move |_| {
            ctx.dispatch(UiEvent::Delete { id: id.clone() });
        }
    };

    let body = if row.editing {
        let edit_ref = NodeRef::<leptos::html::Input>::new();

        // Focus and select the field once it is in the document
        Effect::new(move |_| {
            if let Some(input) = edit_ref.get() {
                request_animation_frame(move || {
                    let _ = input.focus();
                    input.select();
                });
            }
        });

        let on_keydown = {
            let id = id.clone();
            move |ev: web_sys::KeyboardEvent| {
                let outcome = ctx.dispatch(UiEvent::EditKey {
                    id: id.clone(),
                    key: ev.key(),
                    value: event_target_value(&ev),
                });
                if outcome.prevent_default {
                    ev.prevent_default();
                }
            }
        };

        let on_blur = {
            let id = id.clone();
            move |ev: web_sys::FocusEvent| {
                ctx.dispatch(UiEvent::EditBlur {
                    id: id.clone(),
                    value: event_target_value(&ev),
                });
            }
        };

        view! {
            <input
                type="text"
                class="todo-edit-input"
                value=text
                data-editing-id=id.clone()
                aria-label=row.edit_label()
                maxlength=EDIT_MAX_LENGTH.to_string()
                node_ref=edit_ref
                on:keydown=on_keydown
                on:blur=on_blur
            />
        }
        .into_any()
    } else {
        let on_dblclick = {
            let id = id.clone();
            move |_| {
                ctx.dispatch(UiEvent::LabelDoubleClick { id: id.clone() });
            }
        };

        let on_keydown = {
            let id = id.clone();
            move |ev: web_sys::KeyboardEvent| {
                let outcome = ctx.dispatch(UiEvent::LabelKey { id: id.clone(), key: ev.key() });
                if outcome.prevent_default {
                    ev.prevent_default();
                }
            }
        };

        view! {
            <span
                class=row.label_class()
                data-action="edit"
                tabindex="0"
                role="textbox"
                aria-readonly="true"
                on:dblclick=on_dblclick
                on:keydown=on_keydown
            >
                {text}
            </span>
        }
        .into_any()
    };

    view! {
        <li class="todo-item" data-id=id.clone()>
            <input
                type="checkbox"
                class="todo-checkbox"
                data-action="toggle"
                prop:checked=row.completed
                aria-label=row.checkbox_label()
                on:change=toggle
            />
            <div class="todo-label-container">{body}</div>
            <div class="todo-actions">
                <button
                    type="button"
                    class="todo-delete"
                    data-action="delete"
                    aria-label=row.delete_label()
                    on:click=delete
                >
                    "✕"
                </button>
            </div>
        </li>
    }
}
