//! Checkout flow object
//!
//! The checkout screens form a fixed sequence: information, then overview,
//! then completion. Rather than relying on the order the application happens
//! to enforce, the flow tracks its own step and every method guards against
//! being called out of sequence.

use tracing::info;

use crate::driver::Driver;
use crate::error::SuiteError;
use crate::locators::checkout as loc;
use crate::pages::parse_price;

/// The three screens of the checkout sequence, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutStep {
    Information,
    Overview,
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Information => "information",
            CheckoutStep::Overview => "overview",
            CheckoutStep::Complete => "complete",
        }
    }

    /// Reject `method` unless the flow is currently at `required`.
    fn guard(self, required: CheckoutStep, method: &str) -> Result<(), SuiteError> {
        if self == required {
            Ok(())
        } else {
            Err(SuiteError::StepOrder {
                method: method.to_string(),
                expected: required.as_str().to_string(),
                actual: self.as_str().to_string(),
            })
        }
    }
}

pub struct CheckoutFlow {
    driver: Driver,
    step: CheckoutStep,
}

impl CheckoutFlow {
    /// A new flow assumes the session just arrived on the information step
    /// (via [`CartPage::proceed_to_checkout`](crate::pages::CartPage)).
    pub fn new(driver: Driver) -> Self {
        Self {
            driver,
            step: CheckoutStep::Information,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub async fn expect_on_information_step(&self) -> Result<(), SuiteError> {
        self.driver.expect_url("checkout-step-one").await?;
        self.driver
            .expect_text(loc::HEADER_TITLE, "Checkout: Your Information")
            .await
    }

    /// Fill the customer information form. Empty strings leave a field blank.
    pub async fn fill_information(
        &self,
        first: &str,
        last: &str,
        zip: &str,
    ) -> Result<(), SuiteError> {
        self.step.guard(CheckoutStep::Information, "fill_information")?;
        info!(first, last, zip, "filling checkout information");
        self.driver.fill(loc::FIRST_NAME_INPUT, first).await?;
        self.driver.fill(loc::LAST_NAME_INPUT, last).await?;
        self.driver.fill(loc::POSTAL_CODE_INPUT, zip).await
    }

    /// Submit the information form without asserting that it advances.
    /// Used by negative cases that expect a validation error instead.
    pub async fn submit_information(&self) -> Result<(), SuiteError> {
        self.step.guard(CheckoutStep::Information, "submit_information")?;
        self.driver.click(loc::CONTINUE).await
    }

    /// The information step must have rejected the form with this error.
    pub async fn expect_information_error(&self, expected: &str) -> Result<(), SuiteError> {
        self.step
            .guard(CheckoutStep::Information, "expect_information_error")?;
        self.driver.expect_visible(loc::ERROR_MESSAGE).await?;
        self.driver.expect_text(loc::ERROR_MESSAGE, expected).await?;
        // A rejected form must not advance the flow.
        self.driver.expect_url("checkout-step-one").await
    }

    /// Submit the information form and advance to the overview step.
    pub async fn continue_to_overview(&mut self) -> Result<(), SuiteError> {
        self.step.guard(CheckoutStep::Information, "continue_to_overview")?;
        info!("continuing to checkout overview");
        self.driver.click(loc::CONTINUE).await?;
        self.driver.wait_for_url("checkout-step-two").await?;
        self.step = CheckoutStep::Overview;
        Ok(())
    }

    pub async fn subtotal(&self) -> Result<f64, SuiteError> {
        self.step.guard(CheckoutStep::Overview, "subtotal")?;
        parse_price(&self.driver.text_of(loc::SUBTOTAL).await?)
    }

    pub async fn tax(&self) -> Result<f64, SuiteError> {
        self.step.guard(CheckoutStep::Overview, "tax")?;
        parse_price(&self.driver.text_of(loc::TAX).await?)
    }

    pub async fn total(&self) -> Result<f64, SuiteError> {
        self.step.guard(CheckoutStep::Overview, "total")?;
        parse_price(&self.driver.text_of(loc::TOTAL).await?)
    }

    /// On the overview step, total must equal subtotal plus tax.
    pub async fn expect_total_adds_up(&self) -> Result<(), SuiteError> {
        let subtotal = self.subtotal().await?;
        let tax = self.tax().await?;
        let total = self.total().await?;
        if (total - (subtotal + tax)).abs() > 0.005 {
            return Err(SuiteError::assertion(
                "order total equals subtotal plus tax",
                format!("{:.2}", subtotal + tax),
                format!("{total:.2}"),
            ));
        }
        Ok(())
    }

    /// Complete the order from the overview step.
    pub async fn finish(&mut self) -> Result<(), SuiteError> {
        self.step.guard(CheckoutStep::Overview, "finish")?;
        info!("finishing checkout");
        self.driver.click(loc::FINISH).await?;
        self.driver.wait_for_url("checkout-complete").await?;
        self.step = CheckoutStep::Complete;
        Ok(())
    }

    /// The completion screen must confirm the order.
    pub async fn expect_order_complete(&self) -> Result<(), SuiteError> {
        self.step.guard(CheckoutStep::Complete, "expect_order_complete")?;
        self.driver
            .expect_text(loc::COMPLETE_HEADER, "Thank you for your order!")
            .await?;
        self.driver.expect_visible(loc::PONY_EXPRESS_IMG).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_accepts_matching_step() {
        assert!(CheckoutStep::Information
            .guard(CheckoutStep::Information, "fill_information")
            .is_ok());
    }

    #[test]
    fn guard_rejects_out_of_order_call() {
        let err = CheckoutStep::Information
            .guard(CheckoutStep::Overview, "finish")
            .unwrap_err();
        match err {
            SuiteError::StepOrder {
                method,
                expected,
                actual,
            } => {
                assert_eq!(method, "finish");
                assert_eq!(expected, "overview");
                assert_eq!(actual, "information");
            }
            other => panic!("expected StepOrder, got {other:?}"),
        }
    }

    #[test]
    fn complete_cannot_be_reentered() {
        assert!(CheckoutStep::Complete
            .guard(CheckoutStep::Information, "fill_information")
            .is_err());
        assert!(CheckoutStep::Complete
            .guard(CheckoutStep::Complete, "expect_order_complete")
            .is_ok());
    }
}
