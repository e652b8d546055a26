//! TodoMVC scenarios written directly against selectors, without the page object.
//!
//! `navigated_page` and `page_with_todo` are the shared setup steps: a scenario calls the one
//! it needs and gets the session back in that state.
use demo_e2e::{expect, scenario, Key, Role, ScenarioError, Selector, Session, Target};

mod common;

const NEW_TODO: &str = "What needs to be done?";

fn input(session: &Session) -> Target {
    session.locate(Selector::placeholder(NEW_TODO))
}

fn items(session: &Session) -> Target {
    session.locate(Selector::test_id("todo-item"))
}

fn counter(session: &Session) -> Target {
    session.locate(Selector::test_id("todo-count"))
}

async fn add(session: &Session, text: &str) -> Result<(), ScenarioError> {
    let input = input(session);
    input.fill(text).await?;
    input.press(Key::Enter).await
}

/// A session on an empty TodoMVC page.
async fn navigated_page(session: &Session) -> Result<(), ScenarioError> {
    common::init_tracing();
    session.goto(&session.config().todo_url).await
}

/// A session on TodoMVC with a single "Buy milk" item.
async fn page_with_todo(session: &Session) -> Result<(), ScenarioError> {
    navigated_page(session).await?;
    add(session, "Buy milk").await
}

#[scenario(firefox, chrome)]
async fn add_a_todo_and_verify_it_appears(session: Session) -> Result<(), ScenarioError> {
    navigated_page(&session).await?;
    add(&session, "Buy milk").await?;
    expect(&session.locate(Selector::text("Buy milk")))
        .to_be_visible()
        .await?;
    expect(&counter(&session)).to_contain_text("1 item left").await
}

#[scenario(firefox, chrome)]
async fn check_a_todo_as_complete(session: Session) -> Result<(), ScenarioError> {
    page_with_todo(&session).await?;
    items(&session)
        .first()
        .locate(Selector::label("Toggle Todo"))
        .check()
        .await?;
    expect(&items(&session)).to_have_class("completed").await?;
    expect(&counter(&session)).to_contain_text("0 items left").await
}

#[scenario(firefox, chrome)]
async fn delete_a_todo(session: Session) -> Result<(), ScenarioError> {
    page_with_todo(&session).await?;
    let item = items(&session).first();
    item.hover().await?;
    item.locate(Selector::role(Role::Button, "Delete"))
        .click()
        .await?;
    expect(&session.locate(Selector::text("Buy milk")))
        .not()
        .to_be_visible()
        .await
}

#[scenario(firefox, chrome)]
async fn filter_by_active(session: Session) -> Result<(), ScenarioError> {
    navigated_page(&session).await?;
    add(&session, "Active").await?;
    add(&session, "Done").await?;
    items(&session)
        .nth(1)
        .locate(Selector::label("Toggle Todo"))
        .check()
        .await?;
    session
        .locate(Selector::role(Role::Link, "Active"))
        .click()
        .await?;
    expect(&items(&session)).to_have_count(1).await?;
    // "Active" is also the filter link's text, so look inside the row
    expect(&items(&session).first())
        .to_contain_text("Active")
        .await
}

#[scenario(firefox, chrome)]
async fn the_input_is_cleared_after_each_add(session: Session) -> Result<(), ScenarioError> {
    navigated_page(&session).await?;
    add(&session, "one").await?;
    expect(&input(&session)).to_have_value("").await?;
    add(&session, "two").await?;
    expect(&session.locate(Selector::test_id("todo-title")))
        .to_have_texts(&["one", "two"])
        .await
}
