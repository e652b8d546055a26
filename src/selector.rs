//! Semantic locators.
//!
//! Page objects describe elements the way a user would find them (by placeholder, label,
//! accessible role and name, visible text, or a test id) and this module turns those
//! descriptions into the CSS or XPath queries a WebDriver server understands.

use fantoccini::Locator;
use std::fmt;

/// An accessible role understood by [`Selector::Role`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// `<button>`, submit-like `<input>`s, and `role="button"`.
    Button,
    /// `<a href>` and `role="link"`.
    Link,
    /// Checkbox inputs and `role="checkbox"`.
    Checkbox,
    /// Text-like inputs, `<textarea>`, and `role="textbox"`.
    Textbox,
}

impl Role {
    fn name(self) -> &'static str {
        match self {
            Role::Button => "button",
            Role::Link => "link",
            Role::Checkbox => "checkbox",
            Role::Textbox => "textbox",
        }
    }
}

/// A description of how to find an element.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Selector {
    /// A raw CSS selector.
    Css(String),
    /// An element carrying `data-testid="..."`.
    TestId(String),
    /// An element carrying `data-test="..."`.
    DataTest(String),
    /// An input or textarea with the given placeholder.
    Placeholder(String),
    /// A control labelled by `aria-label`, or by a `<label for>` with this text.
    Label(String),
    /// An element with the given role and, optionally, accessible name.
    Role {
        /// The role to match.
        role: Role,
        /// The accessible name to match exactly, if any.
        name: Option<String>,
    },
    /// The innermost element whose text matches.
    Text {
        /// The text to look for. Whitespace is normalized before comparing.
        text: String,
        /// Whether the whole text must match, or just contain `text`.
        exact: bool,
    },
}

impl Selector {
    /// See [`Selector::Css`].
    pub fn css(selector: impl Into<String>) -> Self {
        Selector::Css(selector.into())
    }

    /// See [`Selector::TestId`].
    pub fn test_id(id: impl Into<String>) -> Self {
        Selector::TestId(id.into())
    }

    /// See [`Selector::DataTest`].
    pub fn data_test(id: impl Into<String>) -> Self {
        Selector::DataTest(id.into())
    }

    /// See [`Selector::Placeholder`].
    pub fn placeholder(text: impl Into<String>) -> Self {
        Selector::Placeholder(text.into())
    }

    /// See [`Selector::Label`].
    pub fn label(text: impl Into<String>) -> Self {
        Selector::Label(text.into())
    }

    /// A role with an exact accessible name.
    pub fn role(role: Role, name: impl Into<String>) -> Self {
        Selector::Role {
            role,
            name: Some(name.into()),
        }
    }

    /// Any element with the given role.
    pub fn any_role(role: Role) -> Self {
        Selector::Role { role, name: None }
    }

    /// The innermost element whose whole text is `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Selector::Text {
            text: text.into(),
            exact: true,
        }
    }

    /// The innermost element whose text contains `text`.
    pub fn text_containing(text: impl Into<String>) -> Self {
        Selector::Text {
            text: text.into(),
            exact: false,
        }
    }

    /// Compile to a WebDriver query.
    ///
    /// A `scoped` query is evaluated relative to a parent element rather than the document.
    pub(crate) fn query(&self, scoped: bool) -> Query {
        match self {
            Selector::Css(s) => Query::css(s.clone()),
            Selector::TestId(id) => Query::css(format!("[data-testid={}]", css_string(id))),
            Selector::DataTest(id) => Query::css(format!("[data-test={}]", css_string(id))),
            Selector::Placeholder(p) => Query::css(format!("[placeholder={}]", css_string(p))),
            Selector::Label(l) => {
                let lit = xpath_literal(l);
                Query::xpath(
                    scoped,
                    &[
                        format!("//*[@aria-label={}]", lit),
                        format!("//*[@id=//label[normalize-space(.)={}]/@for]", lit),
                        format!("//label[normalize-space(.)={}]//input", lit),
                    ],
                )
            }
            Selector::Role { role, name } => Query::xpath(scoped, &role_branches(*role, name)),
            Selector::Text { text, exact } => {
                let lit = xpath_literal(text);
                let test = if *exact {
                    format!("normalize-space(.)={}", lit)
                } else {
                    format!("contains(normalize-space(.), {})", lit)
                };
                Query::xpath(
                    scoped,
                    &[format!(
                        "//*[not(self::script or self::style)][{0}][not(.//*[{0}])]",
                        test
                    )],
                )
            }
        }
    }
}

fn role_branches(role: Role, name: &Option<String>) -> Vec<String> {
    let lit = name.as_deref().map(xpath_literal);
    // predicate matching an accessible name on arbitrary elements
    let named = |extra: &str| match lit {
        Some(ref l) => format!(
            "[normalize-space(.)={0} or @aria-label={0} or @title={0}{1}]",
            l, extra
        ),
        None => String::new(),
    };
    // predicate for inputs, whose name never comes from their (empty) text
    let labelled = |extra: &str| match lit {
        Some(ref l) => format!(
            "[@aria-label={0} or @id=//label[normalize-space(.)={0}]/@for{1}]",
            l, extra
        ),
        None => String::new(),
    };

    match role {
        Role::Button => {
            let value = match lit {
                Some(ref l) => format!(" or @value={}", l),
                None => String::new(),
            };
            vec![
                format!("//button{}", named("")),
                format!("//*[@role='button']{}", named("")),
                format!(
                    "//input[@type='button' or @type='submit' or @type='reset']{}",
                    labelled(&value)
                ),
            ]
        }
        Role::Link => vec![
            format!("//a[@href]{}", named("")),
            format!("//*[@role='link']{}", named("")),
        ],
        Role::Checkbox => vec![
            format!("//input[@type='checkbox']{}", labelled("")),
            format!("//*[@role='checkbox']{}", named("")),
        ],
        Role::Textbox => {
            let placeholder = match lit {
                Some(ref l) => format!(" or @placeholder={}", l),
                None => String::new(),
            };
            vec![
                format!(
                    "//input[not(@type) or @type='text' or @type='email' or @type='password' or @type='search' or @type='tel' or @type='url']{}",
                    labelled(&placeholder)
                ),
                format!("//textarea{}", labelled(&placeholder)),
                format!("//*[@role='textbox']{}", named("")),
            ]
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(s) => write!(f, "css={}", s),
            Selector::TestId(id) => write!(f, "test-id={:?}", id),
            Selector::DataTest(id) => write!(f, "data-test={:?}", id),
            Selector::Placeholder(p) => write!(f, "placeholder={:?}", p),
            Selector::Label(l) => write!(f, "label={:?}", l),
            Selector::Role { role, name: None } => write!(f, "role={}", role.name()),
            Selector::Role {
                role,
                name: Some(name),
            } => write!(f, "role={}[name={:?}]", role.name(), name),
            Selector::Text { text, exact: true } => write!(f, "text={:?}", text),
            Selector::Text { text, exact: false } => write!(f, "text*={:?}", text),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Strategy {
    Css,
    XPath,
}

/// A compiled selector, ready to hand to the WebDriver server.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Query {
    pub(crate) strategy: Strategy,
    pub(crate) value: String,
}

impl Query {
    fn css(value: String) -> Self {
        Query {
            strategy: Strategy::Css,
            value,
        }
    }

    fn xpath(scoped: bool, branches: &[String]) -> Self {
        let value = branches
            .iter()
            .map(|b| if scoped { format!(".{}", b) } else { b.clone() })
            .collect::<Vec<_>>()
            .join(" | ");
        Query {
            strategy: Strategy::XPath,
            value,
        }
    }

    pub(crate) fn locator(&self) -> Locator<'_> {
        match self.strategy {
            Strategy::Css => Locator::Css(&self.value),
            Strategy::XPath => Locator::XPath(&self.value),
        }
    }
}

/// Quote `s` as a CSS string.
fn css_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quote `s` as an XPath 1.0 string literal.
///
/// XPath 1.0 has no escape sequences, so text containing both quote characters has to be
/// assembled with `concat()`.
fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        format!("'{}'", s)
    } else if !s.contains('"') {
        format!("\"{}\"", s)
    } else {
        let parts: Vec<String> = s.split('\'').map(|p| format!("'{}'", p)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}
