//! Reference model of the Sauce Labs storefront: its fixed catalog, accounts, cart and the
//! validation messages it shows.

use std::fmt;

/// A product in the storefront catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Product {
    /// Display name.
    pub name: &'static str,
    /// Price in cents.
    pub price_cents: u32,
}

/// The six products the storefront lists, in its default (name ascending) order.
pub const CATALOG: [Product; 6] = [
    Product {
        name: "Sauce Labs Backpack",
        price_cents: 2999,
    },
    Product {
        name: "Sauce Labs Bike Light",
        price_cents: 999,
    },
    Product {
        name: "Sauce Labs Bolt T-Shirt",
        price_cents: 1599,
    },
    Product {
        name: "Sauce Labs Fleece Jacket",
        price_cents: 4999,
    },
    Product {
        name: "Sauce Labs Onesie",
        price_cents: 799,
    },
    Product {
        name: "Test.allTheThings() T-Shirt (Red)",
        price_cents: 1599,
    },
];

/// Sales tax the storefront adds at checkout, in percent.
pub const TAX_PERCENT: u32 = 8;

impl Product {
    /// Look a product up by its display name.
    pub fn by_name(name: &str) -> Option<Product> {
        CATALOG.iter().copied().find(|p| p.name == name)
    }

    /// Look a product up by its slug.
    pub fn by_slug(slug: &str) -> Option<Product> {
        CATALOG.iter().copied().find(|p| p.slug() == slug)
    }

    /// The key the storefront uses in per-product `data-test` ids, e.g.
    /// `add-to-cart-sauce-labs-backpack`.
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }

    /// The price as the storefront renders it, e.g. `$7.99`.
    pub fn price_label(&self) -> String {
        dollars(self.price_cents)
    }
}

/// Render an amount in cents the way the storefront does.
pub fn dollars(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// The storefront's sort options.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SortOrder {
    /// Name (A to Z).
    #[default]
    NameAsc,
    /// Name (Z to A).
    NameDesc,
    /// Price (low to high).
    PriceAsc,
    /// Price (high to low).
    PriceDesc,
}

impl SortOrder {
    /// The `value` of the matching `<option>`.
    pub fn option_value(self) -> &'static str {
        match self {
            SortOrder::NameAsc => "az",
            SortOrder::NameDesc => "za",
            SortOrder::PriceAsc => "lohi",
            SortOrder::PriceDesc => "hilo",
        }
    }

    /// The catalog in this order. Ties keep catalog order.
    pub fn sorted(self) -> Vec<Product> {
        let mut products = CATALOG.to_vec();
        match self {
            SortOrder::NameAsc => products.sort_by(|a, b| a.name.cmp(b.name)),
            SortOrder::NameDesc => products.sort_by(|a, b| b.name.cmp(a.name)),
            SortOrder::PriceAsc => products.sort_by_key(|p| p.price_cents),
            SortOrder::PriceDesc => products.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
        }
        products
    }
}

/// The shopping cart: product slugs in the order they were added.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cart {
    lines: Vec<String>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product. Adding a product that is already in the cart does nothing; returns
    /// whether the cart changed.
    pub fn add(&mut self, slug: &str) -> bool {
        if self.contains(slug) {
            return false;
        }
        self.lines.push(slug.to_string());
        true
    }

    /// Remove a product; returns whether the cart changed.
    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l != slug);
        before != self.lines.len()
    }

    /// Whether the product is in the cart.
    pub fn contains(&self, slug: &str) -> bool {
        self.lines.iter().any(|l| l == slug)
    }

    /// Number of cart lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Slugs in the order they were added.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// What the cart badge reads; an empty cart shows no badge at all.
    pub fn badge(&self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.len().to_string())
        }
    }

    /// Item total, tax and total in cents, as the checkout overview shows them.
    pub fn summary(&self) -> Summary {
        let subtotal = self
            .lines
            .iter()
            .filter_map(|slug| Product::by_slug(slug))
            .map(|p| p.price_cents)
            .sum::<u32>();
        // round half up to whole cents
        let tax = (subtotal * TAX_PERCENT + 50) / 100;
        Summary {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Amounts on the checkout overview, in cents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
    /// Sum of the item prices.
    pub subtotal: u32,
    /// Sales tax.
    pub tax: u32,
    /// What the customer pays.
    pub total: u32,
}

/// Password shared by every demo account.
pub const PASSWORD: &str = "secret_sauce";

/// Accounts the login page accepts.
pub const KNOWN_USERS: [&str; 6] = [
    "standard_user",
    "locked_out_user",
    "problem_user",
    "performance_glitch_user",
    "error_user",
    "visual_user",
];

/// The account that cannot log in.
pub const LOCKED_OUT_USER: &str = "locked_out_user";

/// A username and password pair.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Credentials {
    /// The username.
    pub username: String,
    /// The password.
    pub password: String,
}

impl Credentials {
    /// Arbitrary credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The account every flow in the storefront works for.
    pub fn standard() -> Self {
        Self::new("standard_user", PASSWORD)
    }

    /// The account that is refused with a lock-out message.
    pub fn locked_out() -> Self {
        Self::new(LOCKED_OUT_USER, PASSWORD)
    }

    /// Empty username and password.
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// What submitting these credentials leads to.
    pub fn login_outcome(&self) -> LoginOutcome {
        if self.username.is_empty() {
            LoginOutcome::Rejected(LoginError::UsernameRequired)
        } else if self.password.is_empty() {
            LoginOutcome::Rejected(LoginError::PasswordRequired)
        } else if !KNOWN_USERS.contains(&self.username.as_str()) || self.password != PASSWORD {
            LoginOutcome::Rejected(LoginError::Mismatch)
        } else if self.username == LOCKED_OUT_USER {
            LoginOutcome::Rejected(LoginError::LockedOut)
        } else {
            LoginOutcome::Inventory
        }
    }
}

/// Where a login attempt ends up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoginOutcome {
    /// Redirected to the product listing.
    Inventory,
    /// Kept on the login page with an error.
    Rejected(LoginError),
}

/// The error messages the login page shows.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LoginError {
    /// The username was left empty.
    UsernameRequired,
    /// The password was left empty.
    PasswordRequired,
    /// The account is locked.
    LockedOut,
    /// Unknown user, or wrong password.
    Mismatch,
}

impl LoginError {
    /// The exact message text.
    pub fn message(self) -> &'static str {
        match self {
            LoginError::UsernameRequired => "Epic sadface: Username is required",
            LoginError::PasswordRequired => "Epic sadface: Password is required",
            LoginError::LockedOut => "Epic sadface: Sorry, this user has been locked out.",
            LoginError::Mismatch => {
                "Epic sadface: Username and password do not match any user in this service"
            }
        }
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Customer details asked for on the first checkout step.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CheckoutInfo {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Postal code.
    pub postal_code: String,
}

impl CheckoutInfo {
    /// Customer details from their parts.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        CheckoutInfo {
            first_name: first_name.into(),
            last_name: last_name.into(),
            postal_code: postal_code.into(),
        }
    }

    /// The message the form shows for these details, checking fields top to bottom, or
    /// `None` if the form accepts them.
    pub fn validate(&self) -> Option<&'static str> {
        if self.first_name.is_empty() {
            Some("Error: First Name is required")
        } else if self.last_name.is_empty() {
            Some("Error: Last Name is required")
        } else if self.postal_code.is_empty() {
            Some("Error: Postal Code is required")
        } else {
            None
        }
    }
}

/// Header of the order confirmation page.
pub const ORDER_COMPLETE: &str = "Thank you for your order!";
