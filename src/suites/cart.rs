//! Cart feature tests

use futures::FutureExt;

use super::case;
use crate::data::DataLoader;
use crate::error::SuiteError;
use crate::runner::{Marker, Suite, TestCase};

pub(super) fn cases(loader: &DataLoader) -> Result<Vec<TestCase>, SuiteError> {
    let products = loader.products()?;
    if products.is_empty() {
        return Err(SuiteError::data_format("products.csv", "no products listed"));
    }
    let first = products[0].clone();

    let mut cases = Vec::new();

    let product = first.clone();
    cases.push(case(
        "cart::shows_added_item".to_string(),
        Suite::Cart,
        vec![Marker::Cart, Marker::Smoke, Marker::Regression],
        move |fx| {
            let product = product.clone();
            async move {
                let inventory = fx.open_logged_in().await?;
                inventory.add_product_to_cart(&product.name).await?;
                inventory.open_cart().await?;
                let cart = fx.cart_page()?;
                cart.expect_on_cart_page().await?;
                cart.expect_item_count(1).await?;
                cart.expect_item_in_cart(&product.name).await
            }
            .boxed()
        },
    ));

    let product = first.clone();
    cases.push(case(
        "cart::remove_leaves_cart_empty".to_string(),
        Suite::Cart,
        vec![Marker::Cart, Marker::Regression],
        move |fx| {
            let product = product.clone();
            async move {
                let inventory = fx.open_logged_in().await?;
                inventory.add_product_to_cart(&product.name).await?;
                inventory.open_cart().await?;
                let cart = fx.cart_page()?;
                cart.remove_product(&product.name).await?;
                cart.expect_item_count(0).await?;
                cart.expect_item_not_in_cart(&product.name).await?;
                // The badge must agree once we are back on the inventory page.
                cart.continue_shopping().await?;
                inventory.expect_cart_count(0).await
            }
            .boxed()
        },
    ));

    let product = first.clone();
    cases.push(case(
        "cart::continue_shopping_returns_to_inventory".to_string(),
        Suite::Cart,
        vec![Marker::Cart, Marker::Regression],
        move |fx| {
            let product = product.clone();
            async move {
                let inventory = fx.open_logged_in().await?;
                inventory.add_product_to_cart(&product.name).await?;
                inventory.open_cart().await?;
                fx.cart_page()?.continue_shopping().await?;
                inventory.expect_on_inventory_page().await?;
                // Returning must not disturb the cart contents.
                inventory.expect_cart_count(1).await
            }
            .boxed()
        },
    ));

    let product = first;
    cases.push(case(
        "cart::proceed_to_checkout_reaches_information_step".to_string(),
        Suite::Cart,
        vec![Marker::Cart, Marker::Checkout, Marker::Regression],
        move |fx| {
            let product = product.clone();
            async move {
                let inventory = fx.open_logged_in().await?;
                inventory.add_product_to_cart(&product.name).await?;
                inventory.open_cart().await?;
                fx.cart_page()?.proceed_to_checkout().await?;
                fx.checkout_flow()?.expect_on_information_step().await
            }
            .boxed()
        },
    ));

    Ok(cases)
}
