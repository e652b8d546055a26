//! Reference model of the TodoMVC list.
//!
//! Scenarios run the same steps against this model and against the page, then compare what
//! the page renders with what the model predicts.

use std::fmt;
use std::str::FromStr;

/// A single item record.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Todo {
    /// The displayed title.
    pub title: String,
    /// Whether the item has been checked off.
    pub completed: bool,
}

impl Todo {
    /// An active item with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Todo {
            title: title.into(),
            completed: false,
        }
    }
}

/// Which items the list shows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Filter {
    /// Every item.
    #[default]
    All,
    /// Items not yet completed.
    Active,
    /// Completed items.
    Completed,
}

impl Filter {
    /// Every filter, in the order the page lists them.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Whether `todo` is shown under this filter.
    pub fn admits(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    /// The text of the filter's link.
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// The hash route the filter's link navigates to.
    pub fn route(self) -> &'static str {
        match self {
            Filter::All => "#/",
            Filter::Active => "#/active",
            Filter::Completed => "#/completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown filter {:?}", s))
    }
}

/// An index that does not name an item.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OutOfRange {
    /// The requested index.
    pub index: usize,
    /// The number of items at the time.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} is out of range for {} items", self.index, self.len)
    }
}

impl std::error::Error for OutOfRange {}

/// The whole list plus the active filter.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TodoList {
    todos: Vec<Todo>,
    filter: Filter,
}

impl TodoList {
    /// An empty list showing every item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every item, regardless of the filter.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Number of items, regardless of the filter.
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the list holds no items at all.
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// The active filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    fn check(&self, index: usize) -> Result<(), OutOfRange> {
        if index < self.todos.len() {
            Ok(())
        } else {
            Err(OutOfRange {
                index,
                len: self.todos.len(),
            })
        }
    }

    /// Append an item. Text that is empty after trimming is ignored; returns whether an item
    /// was added.
    pub fn add(&mut self, text: &str) -> bool {
        let title = text.trim();
        if title.is_empty() {
            return false;
        }
        self.todos.push(Todo::new(title));
        true
    }

    /// Flip the completion flag of the item at `index`.
    pub fn toggle(&mut self, index: usize) -> Result<(), OutOfRange> {
        self.check(index)?;
        self.todos[index].completed = !self.todos[index].completed;
        Ok(())
    }

    /// Set the completion flag of the item at `index`.
    pub fn set_completed(&mut self, index: usize, completed: bool) -> Result<(), OutOfRange> {
        self.check(index)?;
        self.todos[index].completed = completed;
        Ok(())
    }

    /// Complete every item, or reopen every item if all of them are already complete.
    pub fn toggle_all(&mut self) {
        let complete = !self.todos.iter().all(|t| t.completed);
        for todo in &mut self.todos {
            todo.completed = complete;
        }
    }

    /// Remove the item at `index`; later items move up by one.
    pub fn delete(&mut self, index: usize) -> Result<Todo, OutOfRange> {
        self.check(index)?;
        Ok(self.todos.remove(index))
    }

    /// Commit an edit of the item at `index`. Text that is empty after trimming deletes it.
    pub fn edit(&mut self, index: usize, text: &str) -> Result<(), OutOfRange> {
        self.check(index)?;
        let title = text.trim();
        if title.is_empty() {
            self.todos.remove(index);
        } else {
            self.todos[index].title = title.to_string();
        }
        Ok(())
    }

    /// Abandon an edit of the item at `index`. Nothing changes.
    pub fn cancel_edit(&self, index: usize) -> Result<(), OutOfRange> {
        self.check(index)
    }

    /// Switch the active filter.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The items the active filter shows, in list order.
    pub fn visible(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| self.filter.admits(t)).collect()
    }

    /// Titles of the items the active filter shows, in list order.
    pub fn visible_titles(&self) -> Vec<&str> {
        self.visible().into_iter().map(|t| t.title.as_str()).collect()
    }

    /// Remove every completed item, returning how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        before - self.todos.len()
    }

    /// Number of items not yet completed.
    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    /// Number of completed items.
    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.active_count()
    }

    /// What the counter in the footer reads.
    pub fn counter_text(&self) -> String {
        counter_text(self.active_count())
    }

    /// Whether the footer (counter, filters) is rendered.
    pub fn footer_visible(&self) -> bool {
        !self.todos.is_empty()
    }

    /// Whether the "Clear completed" button is rendered.
    pub fn clear_completed_visible(&self) -> bool {
        self.todos.iter().any(|t| t.completed)
    }
}

/// The counter text for `n` items left.
pub fn counter_text(n: usize) -> String {
    if n == 1 {
        "1 item left".to_string()
    } else {
        format!("{} items left", n)
    }
}
