use crate::error::ScenarioError;
use crate::model::todos::Filter;
use crate::selector::{Role, Selector};
use crate::session::Session;
use crate::target::Target;
use fantoccini::key::Key;
use tracing::info;

/// Page object for the TodoMVC demo.
///
/// Locators are built once and stay valid for the life of the page: every [`Target`] re-queries
/// the DOM when it is used, so accessors always reflect the current list.
#[derive(Clone, Debug)]
pub struct TodoPage {
    session: Session,
    input: Target,
    items: Target,
    counter: Target,
    footer: Target,
    toggle_all: Target,
    clear_completed: Target,
    edit_field: Target,
}

impl TodoPage {
    /// The page object over `session`. Does not navigate.
    pub fn new(session: &Session) -> Self {
        TodoPage {
            session: session.clone(),
            input: session.locate(Selector::placeholder("What needs to be done?")),
            items: session.locate(Selector::test_id("todo-item")),
            counter: session.locate(Selector::test_id("todo-count")),
            footer: session.locate(Selector::css(".footer")),
            toggle_all: session.locate(Selector::label("Mark all as complete")),
            clear_completed: session.locate(Selector::role(Role::Button, "Clear completed")),
            edit_field: session.locate(Selector::label("Edit")),
        }
    }

    /// A page object over `session` that has already loaded the page.
    pub async fn open(session: &Session) -> Result<Self, ScenarioError> {
        let page = Self::new(session);
        page.navigate().await?;
        Ok(page)
    }

    /// The session this page drives.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Load the demo's entry URL.
    pub async fn navigate(&self) -> Result<(), ScenarioError> {
        self.session.goto(&self.session.config().todo_url).await
    }

    /// The text box new items are typed into.
    pub fn input(&self) -> &Target {
        &self.input
    }

    /// Every rendered item row.
    pub fn items(&self) -> &Target {
        &self.items
    }

    /// The "n items left" counter.
    pub fn counter(&self) -> &Target {
        &self.counter
    }

    /// The footer bar, which only exists while the list is non-empty.
    pub fn footer(&self) -> &Target {
        &self.footer
    }

    /// The "Mark all as complete" checkbox.
    pub fn toggle_all_box(&self) -> &Target {
        &self.toggle_all
    }

    /// The "Clear completed" button.
    pub fn clear_completed_button(&self) -> &Target {
        &self.clear_completed
    }

    /// The inline edit field of the row being edited.
    pub fn edit_field(&self) -> &Target {
        &self.edit_field
    }

    /// The row at `index` among the rendered rows.
    pub fn item(&self, index: usize) -> Target {
        self.items.nth(index)
    }

    /// The title of the row at `index`.
    pub fn item_title(&self, index: usize) -> Target {
        self.item(index).locate(Selector::test_id("todo-title"))
    }

    /// The completion checkbox of the row at `index`.
    pub fn item_toggle(&self, index: usize) -> Target {
        self.item(index).locate(Selector::label("Toggle Todo"))
    }

    /// The delete button of the row at `index`. Only displayed while the row is hovered.
    pub fn item_delete(&self, index: usize) -> Target {
        self.item(index).locate(Selector::role(Role::Button, "Delete"))
    }

    /// The link that selects `filter`.
    pub fn filter_link(&self, filter: Filter) -> Target {
        self.session.locate(Selector::role(Role::Link, filter.label()))
    }

    /// Type `text` into the new-item box and press Enter.
    ///
    /// The page ignores text that is blank after trimming, so this is also how scenarios check
    /// that empty input is a no-op.
    pub async fn add_todo(&self, text: &str) -> Result<(), ScenarioError> {
        info!(text, "add todo");
        self.input.fill(text).await?;
        self.input.press(Key::Enter).await
    }

    /// Press Enter in the empty new-item box.
    pub async fn submit_empty(&self) -> Result<(), ScenarioError> {
        self.add_todo("").await
    }

    /// Mark the row at `index` completed.
    pub async fn check_todo(&self, index: usize) -> Result<(), ScenarioError> {
        self.item_toggle(index).check().await
    }

    /// Mark the row at `index` active.
    pub async fn uncheck_todo(&self, index: usize) -> Result<(), ScenarioError> {
        self.item_toggle(index).uncheck().await
    }

    /// Flip the completion flag of the row at `index`.
    pub async fn toggle_todo(&self, index: usize) -> Result<(), ScenarioError> {
        let toggle = self.item_toggle(index);
        let checked = toggle.is_checked().await?;
        toggle.set_checked(!checked).await
    }

    /// Flip "Mark all as complete".
    pub async fn toggle_all(&self) -> Result<(), ScenarioError> {
        let checked = self.toggle_all.is_checked().await?;
        self.toggle_all.set_checked(!checked).await
    }

    /// Delete the row at `index`. Later rows move up by one.
    pub async fn delete_todo(&self, index: usize) -> Result<(), ScenarioError> {
        info!(index, "delete todo");
        // the delete button only renders on hover
        self.item(index).hover().await?;
        self.item_delete(index).click().await
    }

    /// Double-click the row at `index`, replace its text, and confirm with Enter.
    pub async fn edit_todo(&self, index: usize, text: &str) -> Result<(), ScenarioError> {
        info!(index, text, "edit todo");
        self.item_title(index).dblclick().await?;
        self.edit_field.fill(text).await?;
        self.edit_field.press(Key::Enter).await
    }

    /// Double-click the row at `index`, type `text`, and discard it with Escape.
    pub async fn cancel_edit(&self, index: usize, text: &str) -> Result<(), ScenarioError> {
        info!(index, text, "cancel edit");
        self.item_title(index).dblclick().await?;
        self.edit_field.fill(text).await?;
        self.edit_field.press(Key::Escape).await
    }

    /// Show only the rows `filter` admits.
    pub async fn filter_by(&self, filter: Filter) -> Result<(), ScenarioError> {
        info!(%filter, "filter");
        self.filter_link(filter).click().await
    }

    /// Remove every completed row.
    pub async fn clear_completed(&self) -> Result<(), ScenarioError> {
        self.clear_completed.click().await
    }

    /// Titles of the rendered rows, top to bottom.
    pub async fn titles(&self) -> Result<Vec<String>, ScenarioError> {
        self.items
            .locate(Selector::test_id("todo-title"))
            .texts()
            .await
    }
}
