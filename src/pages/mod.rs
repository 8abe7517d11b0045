//! Page objects
//!
//! One type per screen of the storefront. Each holds a clone of the
//! interaction [`Driver`](crate::driver::Driver) and composes its primitives
//! into task-level actions and expectations; none carries state of its own
//! beyond the checkout flow's current step.

mod cart;
mod checkout;
mod inventory;
mod login;

pub use cart::CartPage;
pub use checkout::{CheckoutFlow, CheckoutStep};
pub use inventory::{InventoryPage, SortOrder};
pub use login::LoginPage;

use crate::error::SuiteError;

/// Extract the numeric amount from a displayed price like "$29.99" or
/// "Item total: $32.39".
pub(crate) fn parse_price(text: &str) -> Result<f64, SuiteError> {
    let numeric: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse::<f64>().map_err(|_| {
        SuiteError::assertion("price text parses to a number", "a price like $29.99", text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_strips_currency_and_labels() {
        assert_eq!(parse_price("$29.99").unwrap(), 29.99);
        assert_eq!(parse_price("Tax: $2.40").unwrap(), 2.40);
        assert_eq!(parse_price("Item total: $32.39").unwrap(), 32.39);
    }

    #[test]
    fn parse_price_rejects_non_numeric_text() {
        assert!(parse_price("free shipping").is_err());
    }
}
