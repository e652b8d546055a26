//! Retrying assertions.
//!
//! An assertion observes the page, compares the observation with the expected state, and
//! keeps doing so until they agree or the timeout elapses. On timeout, the failure carries the
//! last observation so the report shows what the page actually looked like.
//!
//! Assertions about "the" element (text, class, checked state, value) need exactly one match.
//! Zero or several matches fail them whether or not they are negated: `.not()` inverts the
//! property, never the precondition.
//!
//! ```no_run
//! # use demo_e2e::{expect, Selector, Session, ScenarioError};
//! # async fn f(session: Session) -> Result<(), ScenarioError> {
//! let counter = session.locate(Selector::test_id("todo-count"));
//! expect(&counter).to_have_text("1 item left").await?;
//! expect(&counter).not().to_be_visible().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::ScenarioError;
use crate::session::Session;
use crate::target::Target;
use crate::wait::Timing;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

/// Start an assertion about a [`Target`].
pub fn expect(target: &Target) -> Expectation<'_> {
    Expectation {
        target,
        negated: false,
        timing: target.timing(),
    }
}

/// Start an assertion about the page a [`Session`] is showing.
pub fn expect_page(session: &Session) -> PageExpectation<'_> {
    PageExpectation {
        session,
        negated: false,
        timing: session.timing(),
    }
}

/// A pending assertion about a [`Target`].
#[derive(Debug)]
#[must_use = "assertions do nothing until one of the `to_*` methods is awaited"]
pub struct Expectation<'a> {
    target: &'a Target,
    negated: bool,
    timing: Timing,
}

impl<'a> Expectation<'a> {
    /// Invert the assertion that follows.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Override how long the assertion keeps retrying.
    pub fn within(mut self, timeout: Duration) -> Self {
        self.timing = self.timing.with_timeout(timeout);
        self
    }

    async fn settle<T, F, FF, P>(
        self,
        expected: String,
        observe: F,
        pass: P,
    ) -> Result<(), ScenarioError>
    where
        T: Debug,
        F: FnMut() -> FF,
        FF: Future<Output = Result<T, ScenarioError>>,
        P: Fn(&T) -> Option<bool>,
    {
        settle(self.timing, self.negated, self.target.to_string(), expected, observe, pass).await
    }

    /// At least one matching element is displayed.
    pub async fn to_be_visible(self) -> Result<(), ScenarioError> {
        let target = self.target;
        self.settle(
            "to be visible".into(),
            move || target.is_visible(),
            |v: &bool| Some(*v),
        )
        .await
    }

    /// Exactly `n` elements match.
    pub async fn to_have_count(self, n: usize) -> Result<(), ScenarioError> {
        let target = self.target;
        self.settle(
            format!("to have count {}", n),
            move || target.count(),
            |c: &usize| Some(*c == n),
        )
        .await
    }

    /// A single element matches and its text is exactly `text`.
    pub async fn to_have_text(self, text: &str) -> Result<(), ScenarioError> {
        let target = self.target;
        self.settle(
            format!("to have text {:?}", text),
            move || target.texts(),
            |texts: &Vec<String>| single(texts).map(|t| t.trim() == text),
        )
        .await
    }

    /// The matching elements' texts are exactly `texts`, in order.
    pub async fn to_have_texts(self, texts: &[&str]) -> Result<(), ScenarioError> {
        let target = self.target;
        self.settle(
            format!("to have texts {:?}", texts),
            move || target.texts(),
            |found: &Vec<String>| {
                Some(
                    found.len() == texts.len()
                        && found.iter().zip(texts).all(|(f, t)| f.trim() == *t),
                )
            },
        )
        .await
    }

    /// A single element matches and its text contains `text`.
    pub async fn to_contain_text(self, text: &str) -> Result<(), ScenarioError> {
        let target = self.target;
        self.settle(
            format!("to contain text {:?}", text),
            move || target.texts(),
            |texts: &Vec<String>| single(texts).map(|t| t.contains(text)),
        )
        .await
    }

    /// A single element matches and `class` is one of its classes.
    pub async fn to_have_class(self, class: &str) -> Result<(), ScenarioError> {
        let target = self.target;
        self.settle(
            format!("to have class {:?}", class),
            move || target.class_lists(),
            |lists: &Vec<Vec<String>>| single(lists).map(|l| l.iter().any(|c| c == class)),
        )
        .await
    }

    /// A single checkbox matches and it is checked.
    pub async fn to_be_checked(self) -> Result<(), ScenarioError> {
        let target = self.target;
        self.settle(
            "to be checked".into(),
            move || target.selected_states(),
            |states: &Vec<bool>| single(states).copied(),
        )
        .await
    }

    /// A single input matches and its current value is `value`.
    pub async fn to_have_value(self, value: &str) -> Result<(), ScenarioError> {
        let target = self.target;
        self.settle(
            format!("to have value {:?}", value),
            move || target.values(),
            |values: &Vec<String>| single(values).map(|v| v == value),
        )
        .await
    }
}

/// A pending assertion about the current page.
#[derive(Debug)]
#[must_use = "assertions do nothing until one of the `to_*` methods is awaited"]
pub struct PageExpectation<'a> {
    session: &'a Session,
    negated: bool,
    timing: Timing,
}

impl<'a> PageExpectation<'a> {
    /// Invert the assertion that follows.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Override how long the assertion keeps retrying.
    pub fn within(mut self, timeout: Duration) -> Self {
        self.timing = self.timing.with_timeout(timeout);
        self
    }

    /// The page URL is exactly `url`.
    pub async fn to_have_url(self, url: &str) -> Result<(), ScenarioError> {
        let session = self.session;
        settle(
            self.timing,
            self.negated,
            "page url".into(),
            format!("to be {:?}", url),
            move || async move { session.current_url().await.map(String::from) },
            |current: &String| Some(current == url),
        )
        .await
    }

    /// The page URL contains `fragment`.
    pub async fn to_have_url_containing(self, fragment: &str) -> Result<(), ScenarioError> {
        let session = self.session;
        settle(
            self.timing,
            self.negated,
            "page url".into(),
            format!("to contain {:?}", fragment),
            move || async move { session.current_url().await.map(String::from) },
            |current: &String| Some(current.contains(fragment)),
        )
        .await
    }

    /// The page title contains `fragment`.
    pub async fn to_have_title_containing(self, fragment: &str) -> Result<(), ScenarioError> {
        let session = self.session;
        settle(
            self.timing,
            self.negated,
            "page title".into(),
            format!("to contain {:?}", fragment),
            move || session.title(),
            |title: &String| Some(title.contains(fragment)),
        )
        .await
    }
}

/// The only element of `found`, or `None` when the target matched zero or several.
fn single<T>(found: &[T]) -> Option<&T> {
    match found {
        [one] => Some(one),
        _ => None,
    }
}

/// Observe until `pass` agrees with the expected polarity, or give up with the last
/// observation.
///
/// `pass` returns `None` when the observation cannot be judged at all (the wrong number of
/// matches); that is a mismatch under either polarity. Observation errors are retried like
/// mismatches: a locator that cannot be read yet is no different from one that reads the
/// wrong thing.
async fn settle<T, F, FF, P>(
    timing: Timing,
    negated: bool,
    subject: String,
    expected: String,
    mut observe: F,
    pass: P,
) -> Result<(), ScenarioError>
where
    T: Debug,
    F: FnMut() -> FF,
    FF: Future<Output = Result<T, ScenarioError>>,
    P: Fn(&T) -> Option<bool>,
{
    let pass = &pass;
    let outcome = timing
        .until(move || {
            let observation = observe();
            async move {
                match observation.await {
                    Ok(seen) if pass(&seen).map_or(false, |holds| holds != negated) => Ok(()),
                    Ok(seen) => Err(format!("{:?}", seen)),
                    Err(e) => Err(format!("<{}>", e)),
                }
            }
        })
        .await;

    outcome.map_err(|expired| ScenarioError::Assertion {
        subject,
        expected: if negated {
            format!("not {}", expected)
        } else {
            expected
        },
        actual: expired.last,
        waited: expired.elapsed,
    })
}
