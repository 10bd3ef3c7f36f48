//! Frontend Models
//!
//! Data structures shared by the store, the codec and the view.

use std::fmt;
use std::str::FromStr;

use reactive_stores::Store;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Single list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    /// New incomplete item with a fresh random id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Which items the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Button caption, also used in the "<Label> filter active" announcement
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter `{0}`")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Immutable copy of the store state handed to subscribers
///
/// Items are newest-first. Derives `Store` so components can read
/// `items`, `filter` and `editing_id` with field-level reactivity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct StoreSnapshot {
    pub items: Vec<TodoItem>,
    pub filter: Filter,
    pub editing_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!("active".parse::<Filter>(), Ok(Filter::Active));
        assert_eq!("completed".parse::<Filter>(), Ok(Filter::Completed));
        assert!("bogus".parse::<Filter>().is_err());
        assert!("Active".parse::<Filter>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        let mut item = TodoItem::new("x");
        assert!(Filter::All.matches(&item));
        assert!(Filter::Active.matches(&item));
        assert!(!Filter::Completed.matches(&item));

        item.completed = true;
        assert!(Filter::All.matches(&item));
        assert!(!Filter::Active.matches(&item));
        assert!(Filter::Completed.matches(&item));
    }

    #[test]
    fn test_new_items_get_distinct_ids() {
        let a = TodoItem::new("a");
        let b = TodoItem::new("a");
        assert_ne!(a.id, b.id);
        assert!(!a.completed);
    }
}
