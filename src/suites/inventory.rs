//! Inventory feature tests

use futures::FutureExt;

use super::case;
use crate::data::DataLoader;
use crate::error::SuiteError;
use crate::pages::SortOrder;
use crate::runner::{Marker, Suite, TestCase};

pub(super) fn cases(loader: &DataLoader) -> Result<Vec<TestCase>, SuiteError> {
    let products = loader.products()?;
    if products.is_empty() {
        return Err(SuiteError::data_format("products.csv", "no products listed"));
    }

    let mut cases = Vec::new();

    let catalog = products.clone();
    cases.push(case(
        "inventory::catalog_matches_dataset".to_string(),
        Suite::Inventory,
        vec![Marker::Inventory, Marker::Smoke, Marker::Regression],
        move |fx| {
            let catalog = catalog.clone();
            async move {
                let inventory = fx.open_logged_in().await?;
                inventory.expect_product_count(catalog.len()).await?;
                let names = inventory.product_names().await?;
                for product in &catalog {
                    if !names.iter().any(|name| name == &product.name) {
                        return Err(SuiteError::assertion(
                            "catalog product displayed",
                            product.name.as_str(),
                            format!("{names:?}"),
                        ));
                    }
                }
                Ok(())
            }
            .boxed()
        },
    ));

    let orders = [
        ("name_a_to_z", SortOrder::NameAscending),
        ("name_z_to_a", SortOrder::NameDescending),
        ("price_low_to_high", SortOrder::PriceLowToHigh),
        ("price_high_to_low", SortOrder::PriceHighToLow),
    ];
    for (slug, order) in orders {
        cases.push(case(
            format!("inventory::sort_{slug}"),
            Suite::Inventory,
            vec![Marker::Inventory, Marker::Regression],
            move |fx| {
                async move {
                    let inventory = fx.open_logged_in().await?;
                    inventory.sort_by(order).await?;
                    inventory.expect_sorted(order).await
                }
                .boxed()
            },
        ));
    }

    let first = products[0].clone();
    cases.push(case(
        "inventory::add_then_remove_leaves_cart_empty".to_string(),
        Suite::Inventory,
        vec![Marker::Inventory, Marker::Cart, Marker::Regression],
        move |fx| {
            let product = first.clone();
            async move {
                let inventory = fx.open_logged_in().await?;
                inventory.add_product_to_cart(&product.name).await?;
                inventory.expect_cart_count(1).await?;
                inventory.remove_product(&product.name).await?;
                inventory.expect_cart_count(0).await
            }
            .boxed()
        },
    ));

    let trio: Vec<_> = products.iter().take(3).cloned().collect();
    cases.push(case(
        "inventory::badge_tracks_each_added_product".to_string(),
        Suite::Inventory,
        vec![Marker::Inventory, Marker::Regression],
        move |fx| {
            let trio = trio.clone();
            async move {
                let inventory = fx.open_logged_in().await?;
                for (added, product) in trio.iter().enumerate() {
                    inventory.add_product_to_cart(&product.name).await?;
                    inventory.expect_cart_count(added as u32 + 1).await?;
                }
                Ok(())
            }
            .boxed()
        },
    ));

    cases.push(case(
        "inventory::logout_returns_to_login".to_string(),
        Suite::Inventory,
        vec![Marker::Inventory, Marker::Regression],
        |fx| {
            async move {
                let inventory = fx.open_logged_in().await?;
                inventory.logout().await?;
                let login = fx.login_page()?;
                if !login.is_login_page_displayed().await? {
                    return Err(SuiteError::assertion(
                        "login form displayed after logout",
                        "login form visible",
                        "still logged in",
                    ));
                }
                Ok(())
            }
            .boxed()
        },
    ));

    Ok(cases)
}
