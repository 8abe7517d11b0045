//! Login page object

use tracing::info;

use crate::driver::Driver;
use crate::error::SuiteError;
use crate::locators::login as loc;

pub struct LoginPage {
    driver: Driver,
}

impl LoginPage {
    pub fn new(driver: Driver) -> Self {
        Self { driver }
    }

    /// Navigate to the login page and wait for the form to render.
    pub async fn open(&self) -> Result<(), SuiteError> {
        info!("opening login page");
        self.driver.navigate("").await?;
        self.driver.wait_for_visible(loc::LOGIN_BUTTON).await
    }

    /// Enter both credentials and submit the form.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SuiteError> {
        info!(username, "logging in");
        self.driver.fill(loc::USERNAME_INPUT, username).await?;
        self.driver.fill(loc::PASSWORD_INPUT, password).await?;
        self.driver.click(loc::LOGIN_BUTTON).await
    }

    pub async fn clear_form(&self) -> Result<(), SuiteError> {
        self.driver.fill(loc::USERNAME_INPUT, "").await?;
        self.driver.fill(loc::PASSWORD_INPUT, "").await
    }

    pub async fn is_login_page_displayed(&self) -> Result<bool, SuiteError> {
        self.driver.is_visible(loc::LOGIN_BUTTON).await
    }

    pub async fn error_message(&self) -> Result<String, SuiteError> {
        self.driver.text_of(loc::ERROR_MESSAGE).await
    }

    /// Dismiss a displayed error via its close button, if present.
    pub async fn close_error_message(&self) -> Result<(), SuiteError> {
        if self.driver.is_visible(loc::ERROR_MESSAGE).await? {
            self.driver.click(loc::ERROR_DISMISS).await?;
        }
        Ok(())
    }

    /// A successful login redirects to the inventory page.
    pub async fn expect_login_successful(&self) -> Result<(), SuiteError> {
        self.driver.expect_url("inventory").await
    }

    /// No error banner may remain on the form.
    pub async fn expect_no_error(&self) -> Result<(), SuiteError> {
        self.driver.expect_hidden(loc::ERROR_MESSAGE).await
    }

    /// The login must have failed with exactly this application error text.
    pub async fn expect_error_message(&self, expected: &str) -> Result<(), SuiteError> {
        self.driver.expect_visible(loc::ERROR_MESSAGE).await?;
        self.driver.expect_text(loc::ERROR_MESSAGE, expected).await
    }

    pub async fn expect_logo_visible(&self) -> Result<(), SuiteError> {
        self.driver.expect_visible(loc::LOGO).await
    }
}
