//! Per-test fixture
//!
//! One fixture is one test's world: it launches a fresh browser session,
//! hands out page objects wired to that session, optionally pre-authenticates,
//! and captures a screenshot when the test fails. The runner closes it on
//! every exit path, including deadline expiry.

use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Settings;
use crate::driver::Driver;
use crate::error::SuiteError;
use crate::pages::{CartPage, CheckoutFlow, InventoryPage, LoginPage};
use crate::session::Session;

pub struct Fixture {
    settings: Settings,
    session: Session,
}

impl Fixture {
    pub async fn launch(settings: Settings) -> Result<Self, SuiteError> {
        let session = Session::launch(&settings).await?;
        Ok(Self { settings, session })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn driver(&self) -> Result<Driver, SuiteError> {
        Driver::new(self.session.page().clone(), &self.settings)
    }

    pub fn login_page(&self) -> Result<LoginPage, SuiteError> {
        Ok(LoginPage::new(self.driver()?))
    }

    pub fn inventory_page(&self) -> Result<InventoryPage, SuiteError> {
        Ok(InventoryPage::new(self.driver()?))
    }

    pub fn cart_page(&self) -> Result<CartPage, SuiteError> {
        Ok(CartPage::new(self.driver()?))
    }

    pub fn checkout_flow(&self) -> Result<CheckoutFlow, SuiteError> {
        Ok(CheckoutFlow::new(self.driver()?))
    }

    /// Open the storefront and authenticate as the configured standard user,
    /// returning the inventory page the session lands on.
    pub async fn open_logged_in(&self) -> Result<InventoryPage, SuiteError> {
        let login = self.login_page()?;
        login.open().await?;
        login
            .login(&self.settings.standard_user, &self.settings.password)
            .await?;
        login.expect_login_successful().await?;
        let inventory = self.inventory_page()?;
        inventory.expect_on_inventory_page().await?;
        Ok(inventory)
    }

    /// Screenshot the failed state into the artifacts directory. Artifact
    /// capture must never mask the original test failure, so errors here are
    /// logged and swallowed.
    pub async fn capture_failure(&self, test_name: &str) -> Option<PathBuf> {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        let file = format!("{}-{stamp}.png", sanitize(test_name));
        let path = self.settings.artifacts_dir().join(file);
        match self.session.screenshot(&path).await {
            Ok(()) => {
                info!(test = test_name, artifact = %path.display(), "failure screenshot captured");
                Some(path)
            }
            Err(err) => {
                warn!(test = test_name, %err, "failed to capture failure screenshot");
                None
            }
        }
    }

    pub async fn close(self) {
        self.session.close().await;
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_flattens_separators() {
        assert_eq!(sanitize("login::valid_user"), "login__valid_user");
        assert_eq!(sanitize("cart item (1)"), "cart_item__1_");
    }
}
