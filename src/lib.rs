//! Page objects and live end-to-end scenarios for two public demo applications, driven through
//! WebDriver.
//!
//! The crate covers the [TodoMVC demo] and the [Sauce Labs storefront demo], plus the
//! [JSONPlaceholder] fake REST API. None of these systems is under our control; what the crate
//! owns is the seam between *what a scenario wants to do* ("add a todo", "check out") and *how
//! that is done* (which elements to find, in what order to interact with them).
//!
//! The layers, bottom up:
//!
//! - [`Selector`]: a semantic description of an element (by placeholder, label, role and name,
//!   text, or test id), compiled to CSS or XPath.
//! - [`Target`]: a live handle built from a selector. It never snapshots the page; every read
//!   and action re-queries, and actions wait (bounded) for a single displayed match.
//! - [`expect`]: retrying assertions over targets and over the page itself.
//! - [`pages`]: the page objects, [`pages::TodoPage`] and [`pages::SaucePage`].
//! - [`session`]: scoped sessions that always close the browser and capture a screenshot when
//!   a scenario fails.
//! - [`api`]: a typed client for the JSONPlaceholder `/todos` resource.
//! - [`model`]: plain-data models of both applications that predict what the pages render.
//!
//! # Examples
//!
//! These assume a [WebDriver compatible] process on port 4444, e.g. [`geckodriver`].
//!
//! ```no_run
//! use demo_e2e::config::Config;
//! use demo_e2e::pages::TodoPage;
//! use demo_e2e::{expect, ScenarioError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScenarioError> {
//!     let config = Config::from_env()?;
//!     demo_e2e::session::with_session(config, "buy milk", |session| async move {
//!         let todos = TodoPage::open(&session).await?;
//!         todos.add_todo("Buy milk").await?;
//!         expect(todos.counter()).to_have_text("1 item left").await?;
//!         todos.check_todo(0).await?;
//!         expect(todos.counter()).to_have_text("0 items left").await
//!     })
//!     .await
//! }
//! ```
//!
//! In tests, [`scenario`] generates one serialized `#[test]` per browser:
//!
//! ```no_run
//! use demo_e2e::pages::SaucePage;
//! use demo_e2e::{expect, expect_page, scenario, ScenarioError, Session};
//!
//! #[scenario(firefox, chrome)]
//! async fn standard_user_lands_on_inventory(session: Session) -> Result<(), ScenarioError> {
//!     let shop = SaucePage::new(&session);
//!     shop.login_as_standard_user().await?;
//!     expect_page(&session).to_have_url_containing("inventory").await?;
//!     expect(&shop.products_title()).to_be_visible().await
//! }
//! # fn main() {}
//! ```
//!
//! [TodoMVC demo]: https://demo.playwright.dev/todomvc
//! [Sauce Labs storefront demo]: https://www.saucedemo.com
//! [JSONPlaceholder]: https://jsonplaceholder.typicode.com
//! [WebDriver compatible]: https://github.com/Fyrd/caniuse/issues/2757#issuecomment-304529217
//! [`geckodriver`]: https://github.com/mozilla/geckodriver
#![deny(missing_docs)]
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod pages;
pub mod selector;
pub mod session;
pub mod wait;

mod expect;
mod net;
mod target;

pub use crate::error::{FailureKind, ScenarioError};
pub use crate::expect::{expect, expect_page, Expectation, PageExpectation};
pub use crate::selector::{Role, Selector};
pub use crate::session::Session;
pub use crate::target::Target;
pub use demo_e2e_proc_macro::scenario;

/// Keys that can be passed to [`Target::press`].
pub use fantoccini::key::Key;
