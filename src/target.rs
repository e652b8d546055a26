use crate::error::{InteractionFailure, ScenarioError};
use crate::selector::Selector;
use crate::wait::Timing;
use fantoccini::actions::{InputSource, MouseActions, PointerAction, MOUSE_BUTTON_LEFT};
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::key::Key;
use fantoccini::Client;
use futures_util::future::{BoxFuture, FutureExt};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Empties an input through the native value setter so frameworks that track the value
/// (React does) observe the change, without touching focus.
const CLEAR_IN_PLACE: &str = r#"
const el = arguments[0];
const proto = el instanceof HTMLTextAreaElement
    ? HTMLTextAreaElement.prototype
    : HTMLInputElement.prototype;
Object.getOwnPropertyDescriptor(proto, "value").set.call(el, "");
el.dispatchEvent(new Event("input", { bubbles: true }));
"#;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
enum Pick {
    All,
    Nth(usize),
    Last,
}

/// A live handle on zero or more elements of the current page.
///
/// A `Target` is only a description: every read, action, and assertion re-runs the query
/// against the page as it is *now*, so a handle created before a mutation observes the state
/// after it. Targets are cheap to clone and can be chained with [`Target::locate`] to search
/// inside the elements another target matches.
///
/// Actions wait (within the target's [`Timing`]) for exactly one matching element. An
/// un-indexed target that keeps matching several elements fails as ambiguous rather than
/// picking one; use [`Target::nth`], [`Target::first`], or [`Target::last`] to pick. An index
/// past the end of the matches fails as out of range, whether it is the target's own pick or
/// that of a target it was located inside.
#[derive(Clone, Debug)]
pub struct Target {
    client: Client,
    parent: Option<Box<Target>>,
    selector: Selector,
    pick: Pick,
    timing: Timing,
}

/// Why a single attempt at resolving an actionable element failed.
#[derive(Debug)]
enum Pending {
    Missing,
    Hidden,
    Ambiguous(usize),
    OutOfRange { index: usize, len: usize },
    Driver(CmdError),
}

impl Pending {
    fn into_failure(self, waited: Duration) -> InteractionFailure {
        match self {
            Pending::Missing => InteractionFailure::NotFound(waited),
            Pending::Hidden => InteractionFailure::NotVisible(waited),
            Pending::Ambiguous(n) => InteractionFailure::Ambiguous(n),
            Pending::OutOfRange { index, len } => InteractionFailure::OutOfRange { index, len },
            Pending::Driver(e) => InteractionFailure::Driver(e),
        }
    }
}

impl Target {
    pub(crate) fn new(client: Client, selector: Selector, timing: Timing) -> Self {
        Target {
            client,
            parent: None,
            selector,
            pick: Pick::All,
            timing,
        }
    }

    /// Elements matching `selector` inside the elements this target matches.
    pub fn locate(&self, selector: Selector) -> Target {
        Target {
            client: self.client.clone(),
            parent: Some(Box::new(self.clone())),
            selector,
            pick: Pick::All,
            timing: self.timing,
        }
    }

    /// The `index`th (0-based) element this target matches.
    pub fn nth(&self, index: usize) -> Target {
        self.picked(Pick::Nth(index))
    }

    /// The first element this target matches.
    pub fn first(&self) -> Target {
        self.nth(0)
    }

    /// The last element this target matches.
    pub fn last(&self) -> Target {
        self.picked(Pick::Last)
    }

    fn picked(&self, pick: Pick) -> Target {
        Target {
            pick,
            ..self.clone()
        }
    }

    /// The same target with a different retry budget.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// The retry budget of this target.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// The selector this target applies at its own level of the chain.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Every element matched by the chain up to, but excluding, this target's own pick.
    ///
    /// A strict lookup fails with [`Pending::OutOfRange`] when an indexed ancestor points past
    /// its matches; a lenient one treats that ancestor as matching nothing.
    fn matches(&self, strict: bool) -> BoxFuture<'_, Result<Vec<Element>, Pending>> {
        async move {
            let query = self.selector.query(self.parent.is_some());
            match self.parent {
                None => self
                    .client
                    .find_all(query.locator())
                    .await
                    .map_err(Pending::Driver),
                Some(ref parent) => {
                    let mut all = Vec::new();
                    for scope in parent.resolve(strict).await? {
                        let found = scope.find_all(query.locator()).await;
                        all.extend(found.map_err(Pending::Driver)?);
                    }
                    Ok(all)
                }
            }
        }
        .boxed()
    }

    async fn resolve(&self, strict: bool) -> Result<Vec<Element>, Pending> {
        let mut all = self.matches(strict).await?;
        let len = all.len();
        Ok(match self.pick {
            Pick::All => all,
            Pick::Nth(i) if i < len => vec![all.swap_remove(i)],
            Pick::Nth(index) if strict && index > 0 => {
                return Err(Pending::OutOfRange { index, len })
            }
            Pick::Nth(_) => Vec::new(),
            Pick::Last => all.pop().into_iter().collect(),
        })
    }

    /// The elements a read observes right now. Zero matches is an answer, not an error.
    async fn lookup(&self) -> Result<Vec<Element>, ScenarioError> {
        match self.resolve(false).await {
            Ok(all) => Ok(all),
            Err(Pending::Driver(e)) => Err(e.into()),
            Err(pending) => Err(ScenarioError::interaction(
                "look up",
                self,
                pending.into_failure(Duration::ZERO),
            )),
        }
    }

    /// One attempt at finding the single element an action should apply to.
    async fn actionable(&self, displayed: bool) -> Result<Element, Pending> {
        let mut all = self.matches(true).await?;
        let len = all.len();
        let element = match self.pick {
            Pick::All if len > 1 => return Err(Pending::Ambiguous(len)),
            Pick::All | Pick::Last => all.pop().ok_or(Pending::Missing)?,
            Pick::Nth(index) if index < len => all.swap_remove(index),
            Pick::Nth(0) => return Err(Pending::Missing),
            Pick::Nth(index) => return Err(Pending::OutOfRange { index, len }),
        };
        if displayed && !element.is_displayed().await.map_err(Pending::Driver)? {
            return Err(Pending::Hidden);
        }
        Ok(element)
    }

    /// Wait for the single element an action should apply to.
    async fn element(
        &self,
        action: &'static str,
        displayed: bool,
    ) -> Result<Element, ScenarioError> {
        let this = self;
        let found = self
            .timing
            .until(move || this.actionable(displayed))
            .await;

        found.map_err(|expired| {
            ScenarioError::interaction(action, self, expired.last.into_failure(expired.elapsed))
        })
    }

    fn failed(&self, action: &'static str, e: CmdError) -> ScenarioError {
        ScenarioError::interaction(action, self, InteractionFailure::Driver(e))
    }
}

/// Reads.
///
/// These look at the page exactly once; wrap them in [`crate::expect`] to wait for a state.
impl Target {
    /// How many elements currently match.
    pub async fn count(&self) -> Result<usize, ScenarioError> {
        Ok(self.lookup().await?.len())
    }

    /// The rendered text of every matching element, in document order.
    pub async fn texts(&self) -> Result<Vec<String>, ScenarioError> {
        let mut texts = Vec::new();
        for element in self.lookup().await? {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    /// The rendered text of the single element this target points at.
    pub async fn text(&self) -> Result<String, ScenarioError> {
        let element = self.element("read text of", false).await?;
        element.text().await.map_err(|e| self.failed("read text of", e))
    }

    /// Whether any matching element is displayed. No match counts as not visible.
    pub async fn is_visible(&self) -> Result<bool, ScenarioError> {
        for element in self.lookup().await? {
            if element.is_displayed().await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether the checkbox or radio this target points at is selected.
    pub async fn is_checked(&self) -> Result<bool, ScenarioError> {
        let element = self.element("read state of", false).await?;
        element
            .is_selected()
            .await
            .map_err(|e| self.failed("read state of", e))
    }

    /// The class list of the single element this target points at.
    pub async fn classes(&self) -> Result<Vec<String>, ScenarioError> {
        let element = self.element("read classes of", false).await?;
        let class = element
            .attr("class")
            .await
            .map_err(|e| self.failed("read classes of", e))?;
        Ok(class
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    /// The current `value` property of the input this target points at.
    pub async fn value(&self) -> Result<String, ScenarioError> {
        let element = self.element("read value of", false).await?;
        let value = element
            .prop("value")
            .await
            .map_err(|e| self.failed("read value of", e))?;
        Ok(value.unwrap_or_default())
    }

    /// An attribute of the single element this target points at.
    pub async fn attr(&self, name: &str) -> Result<Option<String>, ScenarioError> {
        let element = self.element("read attribute of", false).await?;
        element
            .attr(name)
            .await
            .map_err(|e| self.failed("read attribute of", e))
    }
}

impl Target {
    pub(crate) async fn selected_states(&self) -> Result<Vec<bool>, ScenarioError> {
        let mut states = Vec::new();
        for element in self.lookup().await? {
            states.push(element.is_selected().await?);
        }
        Ok(states)
    }

    pub(crate) async fn class_lists(&self) -> Result<Vec<Vec<String>>, ScenarioError> {
        let mut lists = Vec::new();
        for element in self.lookup().await? {
            let class = element.attr("class").await?.unwrap_or_default();
            lists.push(class.split_whitespace().map(str::to_string).collect());
        }
        Ok(lists)
    }

    pub(crate) async fn values(&self) -> Result<Vec<String>, ScenarioError> {
        let mut values = Vec::new();
        for element in self.lookup().await? {
            values.push(element.prop("value").await?.unwrap_or_default());
        }
        Ok(values)
    }
}

/// Actions.
impl Target {
    /// Click the element.
    pub async fn click(&self) -> Result<(), ScenarioError> {
        debug!(locator = %self, "click");
        let element = self.element("click", true).await?;
        element.click().await.map_err(|e| self.failed("click", e))
    }

    /// Double-click the element with the primary mouse button.
    pub async fn dblclick(&self) -> Result<(), ScenarioError> {
        debug!(locator = %self, "double-click");
        let element = self.element("double-click", true).await?;
        let actions = MouseActions::new("mouse".to_string())
            .then(PointerAction::MoveToElement {
                element,
                duration: None,
                x: 0,
                y: 0,
            })
            .then(PointerAction::Down {
                button: MOUSE_BUTTON_LEFT,
            })
            .then(PointerAction::Up {
                button: MOUSE_BUTTON_LEFT,
            })
            .then(PointerAction::Down {
                button: MOUSE_BUTTON_LEFT,
            })
            .then(PointerAction::Up {
                button: MOUSE_BUTTON_LEFT,
            });
        self.client
            .perform_actions(actions)
            .await
            .map_err(|e| self.failed("double-click", e))
    }

    /// Move the pointer over the element, revealing hover-only controls.
    pub async fn hover(&self) -> Result<(), ScenarioError> {
        debug!(locator = %self, "hover");
        let element = self.element("hover", true).await?;
        let actions = MouseActions::new("mouse".to_string()).then(PointerAction::MoveToElement {
            element,
            duration: None,
            x: 0,
            y: 0,
        });
        self.client
            .perform_actions(actions)
            .await
            .map_err(|e| self.failed("hover", e))
    }

    /// Replace the contents of the input with `text`.
    ///
    /// The old value is cleared without moving focus (WebDriver's own clear blurs the field,
    /// which commits inline edits), then `text` is typed key by key.
    pub async fn fill(&self, text: &str) -> Result<(), ScenarioError> {
        debug!(locator = %self, text, "fill");
        let element = self.element("fill", true).await?;
        let arg = serde_json::to_value(&element)
            .map_err(|e| self.failed("fill", CmdError::Json(e)))?;
        self.client
            .execute(CLEAR_IN_PLACE, vec![arg])
            .await
            .map_err(|e| self.failed("fill", e))?;
        if !text.is_empty() {
            element
                .send_keys(text)
                .await
                .map_err(|e| self.failed("fill", e))?;
        }
        Ok(())
    }

    /// Press a single key while the element has focus.
    pub async fn press(&self, key: Key) -> Result<(), ScenarioError> {
        debug!(locator = %self, key = ?key, "press");
        let element = self.element("press a key in", true).await?;
        element
            .send_keys(&key)
            .await
            .map_err(|e| self.failed("press a key in", e))
    }

    /// Make sure the checkbox is checked.
    pub async fn check(&self) -> Result<(), ScenarioError> {
        self.set_checked(true).await
    }

    /// Make sure the checkbox is unchecked.
    pub async fn uncheck(&self) -> Result<(), ScenarioError> {
        self.set_checked(false).await
    }

    /// Click the checkbox if, and only if, it is not already in the wanted state, then wait for
    /// the state to stick.
    ///
    /// Styled checkboxes are often transparent or covered by their label, which WebDriver
    /// refuses to click; those get a script click instead.
    pub async fn set_checked(&self, checked: bool) -> Result<(), ScenarioError> {
        let action = if checked { "check" } else { "uncheck" };
        debug!(locator = %self, action);
        let element = self.element(action, false).await?;
        let current = element
            .is_selected()
            .await
            .map_err(|e| self.failed(action, e))?;
        if current == checked {
            return Ok(());
        }

        if let Err(e) = element.click().await {
            debug!(locator = %self, error = %e, "native click refused, using script click");
            let arg = serde_json::to_value(&element).map_err(|_| self.failed(action, e))?;
            self.client
                .execute("arguments[0].click();", vec![arg])
                .await
                .map_err(|e| self.failed(action, e))?;
        }

        let this = self;
        let settled = self
            .timing
            .until(move || async move {
                if this.shows_checked(checked).await {
                    Ok(())
                } else {
                    Err(())
                }
            })
            .await;
        settled.map_err(|_| {
            ScenarioError::interaction(action, self, InteractionFailure::StateUnchanged(checked))
        })
    }

    async fn shows_checked(&self, checked: bool) -> bool {
        let all = match self.resolve(false).await {
            Ok(all) => all,
            Err(_) => return false,
        };
        match all.first() {
            Some(element) => element.is_selected().await.ok() == Some(checked),
            None => false,
        }
    }

    /// Pick the `<option>` with the given `value` in a `<select>`.
    pub async fn select_option(&self, value: &str) -> Result<(), ScenarioError> {
        debug!(locator = %self, value, "select");
        let element = self.element("select an option in", true).await?;
        element
            .select_by_value(value)
            .await
            .map_err(|e| self.failed("select an option in", e))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref parent) = self.parent {
            write!(f, "{} >> ", parent)?;
        }
        write!(f, "{}", self.selector)?;
        match self.pick {
            Pick::All => Ok(()),
            Pick::Nth(i) => write!(f, " >> nth={}", i),
            Pick::Last => write!(f, " >> last"),
        }
    }
}
