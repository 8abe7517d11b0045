//! Shopping cart page object

use tracing::info;

use crate::driver::Driver;
use crate::error::SuiteError;
use crate::locators::{self, cart as loc};

pub struct CartPage {
    driver: Driver,
}

impl CartPage {
    pub fn new(driver: Driver) -> Self {
        Self { driver }
    }

    pub async fn remove_product(&self, product_name: &str) -> Result<(), SuiteError> {
        info!(product = product_name, "removing product from cart");
        self.driver
            .click(&locators::remove_button(product_name))
            .await
    }

    pub async fn item_names(&self) -> Result<Vec<String>, SuiteError> {
        self.driver.texts_of(loc::ITEM_NAME).await
    }

    pub async fn item_count(&self) -> Result<usize, SuiteError> {
        self.driver.element_count(loc::ITEM).await
    }

    /// Return to the inventory page without checking out.
    pub async fn continue_shopping(&self) -> Result<(), SuiteError> {
        info!("continuing shopping");
        self.driver.click(loc::CONTINUE_SHOPPING).await?;
        self.driver.wait_for_url("inventory").await
    }

    /// Advance to the checkout information step.
    pub async fn proceed_to_checkout(&self) -> Result<(), SuiteError> {
        info!("proceeding to checkout");
        self.driver.click(loc::CHECKOUT).await?;
        self.driver.wait_for_url("checkout-step-one").await
    }

    pub async fn expect_on_cart_page(&self) -> Result<(), SuiteError> {
        self.driver.expect_url("cart").await?;
        self.driver.expect_text(loc::HEADER_TITLE, "Your Cart").await
    }

    pub async fn expect_item_count(&self, expected: usize) -> Result<(), SuiteError> {
        self.driver.expect_count(loc::ITEM, expected).await
    }

    pub async fn expect_item_in_cart(&self, product_name: &str) -> Result<(), SuiteError> {
        let names = self.item_names().await?;
        if !names.iter().any(|name| name == product_name) {
            return Err(SuiteError::assertion(
                "product present in cart",
                product_name,
                format!("{names:?}"),
            ));
        }
        Ok(())
    }

    pub async fn expect_item_not_in_cart(&self, product_name: &str) -> Result<(), SuiteError> {
        let names = self.item_names().await?;
        if names.iter().any(|name| name == product_name) {
            return Err(SuiteError::assertion(
                "product absent from cart",
                format!("no '{product_name}'"),
                format!("{names:?}"),
            ));
        }
        Ok(())
    }
}
