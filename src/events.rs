//! Event Router
//!
//! Maps user interactions to store calls. Components translate DOM events
//! into `UiEvent`s and apply the returned `Outcome` to the DOM.

use crate::store::TodoStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// New-item form submitted with the input's text
    Submit { text: String },
    /// Delete affordance clicked
    Delete { id: String },
    /// Checkbox changed
    Toggle { id: String },
    /// Label double-clicked
    LabelDoubleClick { id: String },
    /// Key pressed while a label has focus
    LabelKey { id: String, key: String },
    /// Key pressed inside the edit field
    EditKey { id: String, key: String, value: String },
    /// Edit field lost focus
    EditBlur { id: String, value: String },
    /// Filter button clicked; carries the button's raw filter name
    SelectFilter { value: String },
    ToggleAll,
    ClearCompleted,
}

/// DOM follow-up requested by the router
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub prevent_default: bool,
    /// Clear the new-item input and give it focus again
    pub reset_input: bool,
}

impl Outcome {
    fn prevent() -> Self {
        Self {
            prevent_default: true,
            ..Default::default()
        }
    }
}

pub fn dispatch(store: &TodoStore, event: UiEvent) -> Outcome {
    match event {
        UiEvent::Submit { text } => {
            store.add_item(&text);
            Outcome {
                prevent_default: true,
                reset_input: true,
            }
        }
        UiEvent::Delete { id } => {
            store.delete_item(&id);
            Outcome::default()
        }
        UiEvent::Toggle { id } => {
            store.toggle_item(&id);
            Outcome::default()
        }
        UiEvent::LabelDoubleClick { id } => {
            store.begin_edit(&id);
            Outcome::default()
        }
        UiEvent::LabelKey { id, key } => match key.as_str() {
            "Enter" => {
                store.begin_edit(&id);
                Outcome::prevent()
            }
            _ => Outcome::default(),
        },
        UiEvent::EditKey { id, key, value } => match key.as_str() {
            "Enter" => {
                store.commit_edit(&id, &value);
                Outcome::prevent()
            }
            "Escape" => {
                store.cancel_edit();
                Outcome::prevent()
            }
            _ => Outcome::default(),
        },
        UiEvent::EditBlur { id, value } => {
            // The field also blurs when Enter/Escape removes it from the page
            if store.state().editing_id.as_deref() == Some(id.as_str()) {
                store.commit_edit(&id, &value);
            }
            Outcome::default()
        }
        UiEvent::SelectFilter { value } => {
            store.set_filter(&value);
            Outcome::default()
        }
        UiEvent::ToggleAll => {
            store.toggle_all_items();
            Outcome::default()
        }
        UiEvent::ClearCompleted => {
            store.clear_completed();
            Outcome::default()
        }
    }
}
