//! View Model
//!
//! Pure helpers that turn store state into what the components show.
//! Nothing here touches the DOM.

use crate::models::{Filter, TodoItem};

/// Placeholder shown instead of the list when the filter leaves nothing
pub const EMPTY_NOTICE: &str = "No todos to show";

/// Maximum length of the inline edit field
pub const EDIT_MAX_LENGTH: i32 = 240;

/// One visible row of the list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowView {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Render as an edit field instead of a label
    pub editing: bool,
}

impl RowView {
    pub fn checkbox_label(&self) -> &'static str {
        if self.completed {
            "Mark as active"
        } else {
            "Mark as completed"
        }
    }

    pub fn label_class(&self) -> &'static str {
        if self.completed {
            "todo-label completed"
        } else {
            "todo-label"
        }
    }

    pub fn delete_label(&self) -> String {
        format!("Delete {}", self.text)
    }

    pub fn edit_label(&self) -> String {
        format!("Editing {}", self.text)
    }
}

/// Items matching `filter`, relative order kept
pub fn filter_items(items: &[TodoItem], filter: Filter) -> Vec<&TodoItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

pub fn visible_rows(items: &[TodoItem], filter: Filter, editing_id: Option<&str>) -> Vec<RowView> {
    filter_items(items, filter)
        .into_iter()
        .map(|item| RowView {
            id: item.id.clone(),
            text: item.text.clone(),
            completed: item.completed,
            editing: editing_id == Some(item.id.as_str()),
        })
        .collect()
}

/// "N items left", singular for one
pub fn remaining_label(items: &[TodoItem]) -> String {
    let remaining = items.iter().filter(|item| !item.completed).count();
    let noun = if remaining == 1 { "item" } else { "items" };
    format!("{} {} left", remaining, noun)
}

/// Enabled state of the toggle-all and clear-completed buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkControls {
    pub toggle_all_disabled: bool,
    pub clear_completed_disabled: bool,
}

impl BulkControls {
    pub fn from_items(items: &[TodoItem]) -> Self {
        Self {
            toggle_all_disabled: items.is_empty(),
            clear_completed_disabled: !items.iter().any(|item| item.completed),
        }
    }
}

/// Value for a filter button's `aria-pressed`
pub fn aria_pressed(button: Filter, active: Filter) -> &'static str {
    if button == active {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: id.to_string(),
            text: format!("Item {}", id),
            completed,
        }
    }

    fn sample() -> Vec<TodoItem> {
        vec![
            make_item("4", false),
            make_item("3", true),
            make_item("2", false),
            make_item("1", true),
        ]
    }

    fn ids(rows: &[RowView]) -> Vec<&str> {
        rows.iter().map(|row| row.id.as_str()).collect()
    }

    #[test]
    fn test_filter_keeps_order() {
        let items = sample();
        assert_eq!(ids(&visible_rows(&items, Filter::All, None)), vec!["4", "3", "2", "1"]);
        assert_eq!(ids(&visible_rows(&items, Filter::Active, None)), vec!["4", "2"]);
        assert_eq!(ids(&visible_rows(&items, Filter::Completed, None)), vec!["3", "1"]);
    }

    #[test]
    fn test_editing_row() {
        let items = sample();
        let rows = visible_rows(&items, Filter::All, Some("2"));
        let editing: Vec<&str> = rows.iter().filter(|r| r.editing).map(|r| r.id.as_str()).collect();
        assert_eq!(editing, vec!["2"]);

        // Cursor pointing at a hidden or missing item edits nothing visible
        assert!(visible_rows(&items, Filter::Completed, Some("2")).iter().all(|r| !r.editing));
        assert!(visible_rows(&items, Filter::All, Some("nope")).iter().all(|r| !r.editing));
    }

    #[test]
    fn test_remaining_label() {
        assert_eq!(remaining_label(&[]), "0 items left");
        assert_eq!(remaining_label(&[make_item("1", false)]), "1 item left");
        assert_eq!(remaining_label(&sample()), "2 items left");
        assert_eq!(remaining_label(&[make_item("1", true)]), "0 items left");
    }

    #[test]
    fn test_bulk_controls() {
        let none = BulkControls::from_items(&[]);
        assert!(none.toggle_all_disabled);
        assert!(none.clear_completed_disabled);

        let active_only = BulkControls::from_items(&[make_item("1", false)]);
        assert!(!active_only.toggle_all_disabled);
        assert!(active_only.clear_completed_disabled);

        let mixed = BulkControls::from_items(&sample());
        assert!(!mixed.toggle_all_disabled);
        assert!(!mixed.clear_completed_disabled);
    }

    #[test]
    fn test_row_labels() {
        let mut row = visible_rows(&[make_item("1", false)], Filter::All, None).remove(0);
        assert_eq!(row.checkbox_label(), "Mark as completed");
        assert_eq!(row.label_class(), "todo-label");
        assert_eq!(row.delete_label(), "Delete Item 1");
        assert_eq!(row.edit_label(), "Editing Item 1");

        row.completed = true;
        assert_eq!(row.checkbox_label(), "Mark as active");
        assert_eq!(row.label_class(), "todo-label completed");
    }

    #[test]
    fn test_aria_pressed() {
        assert_eq!(aria_pressed(Filter::Active, Filter::Active), "true");
        assert_eq!(aria_pressed(Filter::All, Filter::Active), "false");
    }

    #[test]
    fn test_scenario_add_then_toggle() {
        use crate::store::tests::setup;

        let (store, _, _) = setup();
        store.add_item("Buy milk");
        assert_eq!(remaining_label(&store.state().items), "1 item left");

        let (store, _, _) = setup();
        store.add_item("A");
        store.add_item("B");
        let b = store.state().items[0].id.clone();
        store.toggle_item(&b);
        assert_eq!(remaining_label(&store.state().items), "1 item left");
        assert_eq!(ids(&visible_rows(&store.state().items, Filter::Active, None)).len(), 1);
    }
}
