use crate::error::ScenarioError;
use crate::model::shop::{CheckoutInfo, Credentials, SortOrder};
use crate::selector::{Role, Selector};
use crate::session::Session;
use crate::target::Target;
use tracing::info;

/// Cookie the storefront sets to the logged-in username.
const SESSION_COOKIE: &str = "session-username";

/// Page object for the Sauce Labs storefront demo.
///
/// One object covers every view of the store (login, inventory, product details, cart,
/// checkout) since they share the header, cart badge and menu.
#[derive(Clone, Debug)]
pub struct SaucePage {
    session: Session,
}

impl SaucePage {
    /// The page object over `session`. Does not navigate.
    pub fn new(session: &Session) -> Self {
        SaucePage {
            session: session.clone(),
        }
    }

    /// The session this page drives.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn data_test(&self, id: &str) -> Target {
        self.session.locate(Selector::data_test(id))
    }

    fn css(&self, selector: &str) -> Target {
        self.session.locate(Selector::css(selector))
    }

    /// Load the login page.
    pub async fn navigate(&self) -> Result<(), ScenarioError> {
        self.session.goto(&self.session.config().shop_url).await
    }

    /// Load the login page and submit `credentials`.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ScenarioError> {
        info!(username = %credentials.username, "login");
        self.navigate().await?;
        self.username().fill(&credentials.username).await?;
        self.password().fill(&credentials.password).await?;
        self.login_button().click().await
    }

    /// Log in with the account every flow works for.
    pub async fn login_as_standard_user(&self) -> Result<(), ScenarioError> {
        self.login(&Credentials::standard()).await
    }

    /// Log out through the side menu.
    pub async fn logout(&self) -> Result<(), ScenarioError> {
        info!("logout");
        self.session
            .locate(Selector::role(Role::Button, "Open Menu"))
            .click()
            .await?;
        self.session.locate(Selector::text("Logout")).click().await
    }

    /// The username the storefront believes is logged in, if any.
    pub async fn session_user(&self) -> Result<Option<String>, ScenarioError> {
        Ok(self
            .session
            .cookie(SESSION_COOKIE)
            .await?
            .map(|c| c.value().to_string()))
    }

    /// Click the "Add to cart" button of the product with `slug`.
    pub async fn add_to_cart(&self, slug: &str) -> Result<(), ScenarioError> {
        info!(slug, "add to cart");
        self.add_to_cart_button(slug).click().await
    }

    /// Click the "Remove" button of the product with `slug`, on the listing or in the cart.
    pub async fn remove_from_cart(&self, slug: &str) -> Result<(), ScenarioError> {
        info!(slug, "remove from cart");
        self.remove_button(slug).click().await
    }

    /// Re-order the listing.
    pub async fn sort_by(&self, order: SortOrder) -> Result<(), ScenarioError> {
        self.data_test("product-sort-container")
            .select_option(order.option_value())
            .await
    }

    /// Open the product detail view by clicking the product's name.
    pub async fn open_product(&self, name: &str) -> Result<(), ScenarioError> {
        self.session
            .locate(Selector::text(name))
            .first()
            .click()
            .await
    }

    /// Open the cart.
    pub async fn go_to_cart(&self) -> Result<(), ScenarioError> {
        self.data_test("shopping-cart-link").click().await
    }

    /// Leave the cart for the listing.
    pub async fn continue_shopping(&self) -> Result<(), ScenarioError> {
        self.data_test("continue-shopping").click().await
    }

    /// Leave the cart for the first checkout step.
    pub async fn start_checkout(&self) -> Result<(), ScenarioError> {
        self.data_test("checkout").click().await
    }

    /// Fill the customer details form. Empty fields are left empty.
    pub async fn fill_checkout_info(&self, info: &CheckoutInfo) -> Result<(), ScenarioError> {
        self.data_test("firstName").fill(&info.first_name).await?;
        self.data_test("lastName").fill(&info.last_name).await?;
        self.data_test("postalCode").fill(&info.postal_code).await
    }

    /// Submit the customer details form.
    pub async fn continue_checkout(&self) -> Result<(), ScenarioError> {
        self.data_test("continue").click().await
    }

    /// Abandon checkout.
    pub async fn cancel_checkout(&self) -> Result<(), ScenarioError> {
        self.data_test("cancel").click().await
    }

    /// Place the order from the overview.
    pub async fn finish_checkout(&self) -> Result<(), ScenarioError> {
        self.data_test("finish").click().await
    }

    /// The username field.
    pub fn username(&self) -> Target {
        self.data_test("username")
    }

    /// The password field.
    pub fn password(&self) -> Target {
        self.data_test("password")
    }

    /// The login button.
    pub fn login_button(&self) -> Target {
        self.data_test("login-button")
    }

    /// The error banner of the login and checkout forms.
    pub fn error_message(&self) -> Target {
        self.data_test("error")
    }

    /// The "Add to cart" button of one product on the listing.
    pub fn add_to_cart_button(&self, slug: &str) -> Target {
        self.data_test(&format!("add-to-cart-{}", slug))
    }

    /// The "Remove" button of one product.
    pub fn remove_button(&self, slug: &str) -> Target {
        self.data_test(&format!("remove-{}", slug))
    }

    /// The "Add to cart" button of the product detail view.
    pub fn details_add_to_cart(&self) -> Target {
        self.data_test("add-to-cart")
    }

    /// Every product card on the listing.
    pub fn inventory_items(&self) -> Target {
        self.css(".inventory_item")
    }

    /// Product names on the listing, in display order.
    pub fn item_names(&self) -> Target {
        self.css(".inventory_item_name")
    }

    /// Product prices on the listing, in display order.
    pub fn item_prices(&self) -> Target {
        self.css(".inventory_item_price")
    }

    /// The name of the first product listed.
    pub fn first_item_name(&self) -> Target {
        self.item_names().first()
    }

    /// The item count on the cart icon. Absent while the cart is empty.
    pub fn cart_badge(&self) -> Target {
        self.css(".shopping_cart_badge")
    }

    /// Lines in the cart view.
    pub fn cart_items(&self) -> Target {
        self.css(".cart_item")
    }

    /// The "Total:" line of the checkout overview.
    pub fn summary_total(&self) -> Target {
        self.css(".summary_total_label")
    }

    /// The header of the order confirmation.
    pub fn complete_header(&self) -> Target {
        self.css(".complete-header")
    }

    /// Product name on the detail view.
    pub fn details_name(&self) -> Target {
        self.css(".inventory_details_name")
    }

    /// Product price on the detail view.
    pub fn details_price(&self) -> Target {
        self.css(".inventory_details_price")
    }

    /// The "Products" title of the listing.
    pub fn products_title(&self) -> Target {
        self.session.locate(Selector::text("Products"))
    }
}
