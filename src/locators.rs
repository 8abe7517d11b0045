//! Per-page locator sets
//!
//! Semantic element names mapped to CSS selectors, grouped by the page they
//! belong to. These are fixed at compile time and never mutated; the only
//! runtime work is deriving the per-product `data-test` button selectors.

pub mod login {
    pub const USERNAME_INPUT: &str = "#user-name";
    pub const PASSWORD_INPUT: &str = "#password";
    pub const LOGIN_BUTTON: &str = "#login-button";
    pub const ERROR_MESSAGE: &str = "[data-test='error']";
    pub const ERROR_DISMISS: &str = ".error-button";
    pub const LOGO: &str = ".login_logo";
}

pub mod inventory {
    pub const HEADER_TITLE: &str = ".title";
    pub const BURGER_MENU: &str = "#react-burger-menu-btn";
    pub const MENU_LOGOUT: &str = "#logout_sidebar_link";
    pub const CART_LINK: &str = ".shopping_cart_link";
    pub const CART_BADGE: &str = ".shopping_cart_badge";
    pub const ITEM: &str = ".inventory_item";
    pub const ITEM_NAME: &str = ".inventory_item_name";
    pub const ITEM_PRICE: &str = ".inventory_item_price";
    pub const SORT_DROPDOWN: &str = "[data-test='product-sort-container']";
}

pub mod cart {
    pub const HEADER_TITLE: &str = ".title";
    pub const ITEM: &str = ".cart_item";
    pub const ITEM_NAME: &str = ".inventory_item_name";
    pub const CONTINUE_SHOPPING: &str = "[data-test='continue-shopping']";
    pub const CHECKOUT: &str = "[data-test='checkout']";
}

pub mod checkout {
    pub const HEADER_TITLE: &str = ".title";
    pub const FIRST_NAME_INPUT: &str = "[data-test='firstName']";
    pub const LAST_NAME_INPUT: &str = "[data-test='lastName']";
    pub const POSTAL_CODE_INPUT: &str = "[data-test='postalCode']";
    pub const CONTINUE: &str = "[data-test='continue']";
    pub const ERROR_MESSAGE: &str = "[data-test='error']";
    pub const SUBTOTAL: &str = ".summary_subtotal_label";
    pub const TAX: &str = ".summary_tax_label";
    pub const TOTAL: &str = ".summary_total_label";
    pub const FINISH: &str = "[data-test='finish']";
    pub const COMPLETE_HEADER: &str = ".complete-header";
    pub const PONY_EXPRESS_IMG: &str = ".pony_express";
}

/// Selector for a product's add-to-cart button, derived from its display name.
pub fn add_to_cart_button(product_name: &str) -> String {
    format!("[data-test='add-to-cart-{}']", product_slug(product_name))
}

/// Selector for a product's remove button (inventory and cart share it).
pub fn remove_button(product_name: &str) -> String {
    format!("[data-test='remove-{}']", product_slug(product_name))
}

/// The storefront encodes product names into `data-test` attributes by
/// lowercasing, dashing spaces, and dropping parentheses.
fn product_slug(product_name: &str) -> String {
    product_name
        .to_lowercase()
        .replace(' ', "-")
        .replace(['(', ')'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_handles_plain_names() {
        assert_eq!(
            add_to_cart_button("Sauce Labs Backpack"),
            "[data-test='add-to-cart-sauce-labs-backpack']"
        );
    }

    #[test]
    fn slug_drops_parentheses() {
        assert_eq!(
            remove_button("Test.allTheThings() T-Shirt (Red)"),
            "[data-test='remove-test.allthethings-t-shirt-red']"
        );
    }
}
