//! Plain-data models of the two demo applications.
//!
//! Nothing here talks to a browser. The models predict what a page should render after a
//! sequence of actions, which lets scenarios (and property tests) state expectations without
//! hard-coding every intermediate value.

pub mod shop;
pub mod todos;

pub use shop::{Cart, CheckoutInfo, Credentials, LoginError, LoginOutcome, Product, SortOrder};
pub use todos::{Filter, OutOfRange, Todo, TodoList};
