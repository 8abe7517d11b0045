//! Checkout feature tests

use futures::FutureExt;

use super::{case, label};
use crate::data::{DataLoader, InvalidCheckoutRecord, ProductRecord};
use crate::error::SuiteError;
use crate::fixture::Fixture;
use crate::pages::CheckoutFlow;
use crate::runner::{Marker, Suite, TestCase};

pub(super) fn cases(loader: &DataLoader) -> Result<Vec<TestCase>, SuiteError> {
    let products = loader.products()?;
    if products.is_empty() {
        return Err(SuiteError::data_format("products.csv", "no products listed"));
    }
    let valid_forms = loader.checkout_data()?;
    let invalid_forms = loader.invalid_checkout_data()?;
    let first = products[0].clone();

    let mut cases = Vec::new();

    // The canonical end-to-end purchase scenario.
    cases.push(case(
        "checkout::full_purchase_flow".to_string(),
        Suite::Checkout,
        vec![Marker::Checkout, Marker::E2e, Marker::Smoke],
        |fx| {
            async move {
                let inventory = fx.open_logged_in().await?;
                inventory.add_product_to_cart("Sauce Labs Backpack").await?;
                inventory.open_cart().await?;
                let cart = fx.cart_page()?;
                cart.expect_item_count(1).await?;
                cart.proceed_to_checkout().await?;

                let mut flow = fx.checkout_flow()?;
                flow.fill_information("John", "Doe", "12345").await?;
                flow.continue_to_overview().await?;
                flow.finish().await?;
                flow.expect_order_complete().await
            }
            .boxed()
        },
    ));

    for (index, form) in valid_forms.into_iter().enumerate() {
        let product = first.clone();
        cases.push(case(
            format!("checkout::order_completes_{}_{}", index, label(&form.first_name)),
            Suite::Checkout,
            vec![Marker::Checkout, Marker::E2e, Marker::Regression],
            move |fx| {
                let form = form.clone();
                let product = product.clone();
                async move {
                    let mut flow = begin_checkout(fx, &product).await?;
                    flow.fill_information(&form.first_name, &form.last_name, &form.zip_code)
                        .await?;
                    flow.continue_to_overview().await?;
                    flow.expect_total_adds_up().await?;
                    flow.finish().await?;
                    flow.expect_order_complete().await
                }
                .boxed()
            },
        ));
    }

    for (index, form) in invalid_forms.into_iter().enumerate() {
        let product = first.clone();
        cases.push(case(
            format!(
                "checkout::blocked_without_{}_{}",
                missing_field(&form),
                index
            ),
            Suite::Checkout,
            vec![Marker::Checkout, Marker::Negative, Marker::Regression],
            move |fx| {
                let form = form.clone();
                let product = product.clone();
                async move {
                    let flow = begin_checkout(fx, &product).await?;
                    flow.fill_information(&form.first_name, &form.last_name, &form.zip_code)
                        .await?;
                    flow.submit_information().await?;
                    flow.expect_information_error(&form.error).await
                }
                .boxed()
            },
        ));
    }

    let pair: Vec<_> = products.iter().take(2).cloned().collect();
    cases.push(case(
        "checkout::overview_totals_add_up".to_string(),
        Suite::Checkout,
        vec![Marker::Checkout, Marker::Regression],
        move |fx| {
            let pair = pair.clone();
            async move {
                let inventory = fx.open_logged_in().await?;
                for product in &pair {
                    inventory.add_product_to_cart(&product.name).await?;
                }
                inventory.open_cart().await?;
                fx.cart_page()?.proceed_to_checkout().await?;

                let mut flow = fx.checkout_flow()?;
                flow.fill_information("John", "Doe", "12345").await?;
                flow.continue_to_overview().await?;
                flow.expect_total_adds_up().await
            }
            .boxed()
        },
    ));

    cases.push(case(
        "checkout::finish_rejected_before_overview".to_string(),
        Suite::Checkout,
        vec![Marker::Checkout, Marker::Negative, Marker::Regression],
        |fx| {
            async move {
                let mut flow = fx.checkout_flow()?;
                match flow.finish().await {
                    Err(SuiteError::StepOrder { .. }) => Ok(()),
                    Err(other) => Err(other),
                    Ok(()) => Err(SuiteError::assertion(
                        "finish rejected before the overview step",
                        "step-order failure",
                        "finish accepted",
                    )),
                }
            }
            .boxed()
        },
    ));

    Ok(cases)
}

/// Log in, put `product` in the cart, and advance to the information step.
async fn begin_checkout(
    fx: &Fixture,
    product: &ProductRecord,
) -> Result<CheckoutFlow, SuiteError> {
    let inventory = fx.open_logged_in().await?;
    inventory.add_product_to_cart(&product.name).await?;
    inventory.open_cart().await?;
    fx.cart_page()?.proceed_to_checkout().await?;
    let flow = fx.checkout_flow()?;
    flow.expect_on_information_step().await?;
    Ok(flow)
}

/// Which required field the record leaves blank, for the case name.
fn missing_field(form: &InvalidCheckoutRecord) -> &'static str {
    if form.first_name.trim().is_empty() {
        "first_name"
    } else if form.last_name.trim().is_empty() {
        "last_name"
    } else if form.zip_code.trim().is_empty() {
        "zip_code"
    } else {
        "required_fields"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: &str, last: &str, zip: &str) -> InvalidCheckoutRecord {
        InvalidCheckoutRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            zip_code: zip.to_string(),
            error: "Error".to_string(),
        }
    }

    #[test]
    fn missing_field_names_the_first_blank() {
        assert_eq!(missing_field(&record("", "Doe", "12345")), "first_name");
        assert_eq!(missing_field(&record("John", "", "12345")), "last_name");
        assert_eq!(missing_field(&record("John", "Doe", "")), "zip_code");
        assert_eq!(
            missing_field(&record("John", "Doe", "12345")),
            "required_fields"
        );
    }
}
