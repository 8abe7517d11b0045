//! Inventory (products) page object

use tracing::info;

use crate::driver::Driver;
use crate::error::SuiteError;
use crate::locators::{self, inventory as loc};
use crate::pages::parse_price;

/// Sort orders offered by the inventory dropdown, by option value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    NameAscending,
    NameDescending,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOrder {
    pub fn option_value(&self) -> &'static str {
        match self {
            SortOrder::NameAscending => "az",
            SortOrder::NameDescending => "za",
            SortOrder::PriceLowToHigh => "lohi",
            SortOrder::PriceHighToLow => "hilo",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            SortOrder::NameAscending => "name a-z",
            SortOrder::NameDescending => "name z-a",
            SortOrder::PriceLowToHigh => "price low-high",
            SortOrder::PriceHighToLow => "price high-low",
        }
    }
}

pub struct InventoryPage {
    driver: Driver,
}

impl InventoryPage {
    pub fn new(driver: Driver) -> Self {
        Self { driver }
    }

    pub async fn sort_by(&self, order: SortOrder) -> Result<(), SuiteError> {
        info!(order = order.describe(), "sorting inventory");
        self.driver
            .select_option(loc::SORT_DROPDOWN, order.option_value())
            .await
    }

    pub async fn add_product_to_cart(&self, product_name: &str) -> Result<(), SuiteError> {
        info!(product = product_name, "adding product to cart");
        self.driver
            .click(&locators::add_to_cart_button(product_name))
            .await
    }

    pub async fn remove_product(&self, product_name: &str) -> Result<(), SuiteError> {
        info!(product = product_name, "removing product from cart");
        self.driver
            .click(&locators::remove_button(product_name))
            .await
    }

    pub async fn open_cart(&self) -> Result<(), SuiteError> {
        info!("opening cart");
        self.driver.click(loc::CART_LINK).await?;
        self.driver.wait_for_url("cart").await
    }

    /// Log out through the burger menu, landing back on the login page.
    pub async fn logout(&self) -> Result<(), SuiteError> {
        info!("logging out");
        self.driver.click(loc::BURGER_MENU).await?;
        self.driver.wait_for_visible(loc::MENU_LOGOUT).await?;
        self.driver.click(loc::MENU_LOGOUT).await
    }

    pub async fn product_names(&self) -> Result<Vec<String>, SuiteError> {
        self.driver.texts_of(loc::ITEM_NAME).await
    }

    pub async fn product_prices(&self) -> Result<Vec<f64>, SuiteError> {
        self.driver
            .texts_of(loc::ITEM_PRICE)
            .await?
            .iter()
            .map(|text| parse_price(text))
            .collect()
    }

    pub async fn product_count(&self) -> Result<usize, SuiteError> {
        self.driver.element_count(loc::ITEM).await
    }

    /// Items in the cart according to the badge; a hidden badge means zero.
    pub async fn cart_badge_count(&self) -> Result<u32, SuiteError> {
        if !self.driver.is_visible(loc::CART_BADGE).await? {
            return Ok(0);
        }
        let text = self.driver.text_of(loc::CART_BADGE).await?;
        text.parse::<u32>().map_err(|_| {
            SuiteError::assertion("cart badge shows a number", "a count", text)
        })
    }

    pub async fn expect_on_inventory_page(&self) -> Result<(), SuiteError> {
        self.driver.expect_url("inventory").await?;
        self.driver.expect_text(loc::HEADER_TITLE, "Products").await
    }

    pub async fn expect_product_count(&self, expected: usize) -> Result<(), SuiteError> {
        self.driver.expect_count(loc::ITEM, expected).await
    }

    /// The badge must show `expected`, or be hidden entirely for zero.
    pub async fn expect_cart_count(&self, expected: u32) -> Result<(), SuiteError> {
        if expected == 0 {
            self.driver.expect_hidden(loc::CART_BADGE).await
        } else {
            self.driver
                .expect_text(loc::CART_BADGE, &expected.to_string())
                .await
        }
    }

    /// The displayed products must already be ordered per `order`.
    pub async fn expect_sorted(&self, order: SortOrder) -> Result<(), SuiteError> {
        match order {
            SortOrder::NameAscending | SortOrder::NameDescending => {
                let names = self.product_names().await?;
                let mut sorted = names.clone();
                sorted.sort();
                if order == SortOrder::NameDescending {
                    sorted.reverse();
                }
                if names != sorted {
                    return Err(SuiteError::assertion(
                        format!("products sorted by {}", order.describe()),
                        format!("{sorted:?}"),
                        format!("{names:?}"),
                    ));
                }
            }
            SortOrder::PriceLowToHigh | SortOrder::PriceHighToLow => {
                let prices = self.product_prices().await?;
                let ascending = order == SortOrder::PriceLowToHigh;
                if !is_ordered(&prices, ascending) {
                    return Err(SuiteError::assertion(
                        format!("products sorted by {}", order.describe()),
                        format!("a monotone sequence ({})", order.describe()),
                        format!("{prices:?}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// True when the sequence is non-decreasing (or non-increasing).
fn is_ordered(values: &[f64], ascending: bool) -> bool {
    values.windows(2).all(|pair| {
        if ascending {
            pair[0] <= pair[1]
        } else {
            pair[0] >= pair[1]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_orders_map_to_dropdown_values() {
        assert_eq!(SortOrder::NameAscending.option_value(), "az");
        assert_eq!(SortOrder::NameDescending.option_value(), "za");
        assert_eq!(SortOrder::PriceLowToHigh.option_value(), "lohi");
        assert_eq!(SortOrder::PriceHighToLow.option_value(), "hilo");
    }

    #[test]
    fn ordered_check_accepts_ties() {
        assert!(is_ordered(&[7.99, 9.99, 15.99, 15.99, 29.99], true));
        assert!(is_ordered(&[49.99, 29.99, 15.99, 15.99], false));
        assert!(!is_ordered(&[9.99, 7.99], true));
        assert!(is_ordered(&[], true));
        assert!(is_ordered(&[1.0], false));
    }
}
