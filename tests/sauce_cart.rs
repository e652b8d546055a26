//! Adding to and removing from the cart.
use demo_e2e::model::shop::Cart;
use demo_e2e::pages::SaucePage;
use demo_e2e::{expect, expect_page, scenario, ScenarioError, Selector, Session};

mod common;

const BACKPACK: &str = "sauce-labs-backpack";
const BIKE_LIGHT: &str = "sauce-labs-bike-light";

async fn logged_in(session: &Session) -> Result<SaucePage, ScenarioError> {
    common::init_tracing();
    let shop = SaucePage::new(session);
    shop.login_as_standard_user().await?;
    expect_page(session).to_have_url_containing("inventory").await?;
    Ok(shop)
}

#[scenario(firefox, chrome)]
async fn adding_an_item_shows_the_badge(session: Session) -> Result<(), ScenarioError> {
    let shop = logged_in(&session).await?;
    shop.add_to_cart(BACKPACK).await?;
    expect(&shop.cart_badge()).to_have_text("1").await?;
    expect(&shop.remove_button(BACKPACK)).to_be_visible().await?;
    expect(&shop.add_to_cart_button(BACKPACK))
        .to_have_count(0)
        .await
}

#[scenario(firefox, chrome)]
async fn adding_two_items_lists_both_in_the_cart(session: Session) -> Result<(), ScenarioError> {
    let shop = logged_in(&session).await?;
    let mut cart = Cart::new();
    for slug in [BACKPACK, BIKE_LIGHT] {
        shop.add_to_cart(slug).await?;
        cart.add(slug);
    }
    let badge = cart.badge().expect("non-empty cart has a badge");
    expect(&shop.cart_badge()).to_have_text(&badge).await?;

    shop.go_to_cart().await?;
    expect(&shop.cart_items()).to_have_count(cart.len()).await?;
    expect(&session.locate(Selector::text("Sauce Labs Backpack")))
        .to_be_visible()
        .await?;
    expect(&session.locate(Selector::text("Sauce Labs Bike Light")))
        .to_be_visible()
        .await
}

#[scenario(firefox, chrome)]
async fn removing_the_only_item_empties_the_cart(session: Session) -> Result<(), ScenarioError> {
    let shop = logged_in(&session).await?;
    shop.add_to_cart(BACKPACK).await?;
    shop.go_to_cart().await?;

    shop.remove_from_cart(BACKPACK).await?;
    expect(&shop.cart_items()).to_have_count(0).await?;
    expect(&shop.cart_badge()).not().to_be_visible().await
}

#[scenario(firefox, chrome)]
async fn removing_from_the_listing_restores_add(session: Session) -> Result<(), ScenarioError> {
    let shop = logged_in(&session).await?;
    shop.add_to_cart(BACKPACK).await?;
    shop.remove_from_cart(BACKPACK).await?;
    expect(&shop.add_to_cart_button(BACKPACK))
        .to_be_visible()
        .await?;
    expect(&shop.cart_badge()).to_have_count(0).await
}

#[scenario(firefox, chrome)]
async fn continue_shopping_returns_to_the_listing(session: Session) -> Result<(), ScenarioError> {
    let shop = logged_in(&session).await?;
    shop.add_to_cart(BACKPACK).await?;
    shop.go_to_cart().await?;
    expect_page(&session).to_have_url_containing("cart").await?;

    shop.continue_shopping().await?;
    expect_page(&session).to_have_url_containing("inventory").await?;
    expect(&shop.products_title()).to_be_visible().await?;
    expect(&shop.cart_badge()).to_have_text("1").await
}
