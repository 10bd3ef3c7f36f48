//! UI Components
//!
//! Leptos components rendering the todo widget.

mod todo_form;
mod todo_list;
mod todo_row;
mod todo_footer;
mod filter_bar;
mod status_region;

pub use todo_form::TodoForm;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;
pub use todo_footer::TodoFooter;
pub use filter_bar::FilterBar;
pub use status_region::StatusRegion;
