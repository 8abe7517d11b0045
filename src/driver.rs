//! Interaction driver (the "base page")
//!
//! Generic browser primitives shared by every page object: navigation,
//! clicking, form filling, bounded waits, and assertion-style expectations.
//! A `Driver` wraps the session's page handle; page objects hold a clone of
//! it rather than inheriting from it.
//!
//! Every wait polls on a short interval until its condition holds or the
//! configured timeout elapses. There is no retry beyond those bounds: the
//! first failure is surfaced to the runner and fails the test.

use chromiumoxide::page::Page;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::debug;
use url::Url;

use crate::config::Settings;
use crate::error::SuiteError;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone)]
pub struct Driver {
    page: Page,
    base_url: Url,
    timeout: Duration,
    slow_mo: Duration,
}

impl Driver {
    pub fn new(page: Page, settings: &Settings) -> Result<Self, SuiteError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| SuiteError::Config(format!("invalid BASE_URL: {err}")))?;
        Ok(Self {
            page,
            base_url,
            timeout: settings.timeout(),
            slow_mo: settings.slow_mo(),
        })
    }

    // Navigation

    /// Navigate to a path relative to the base URL ("" opens the base itself).
    pub async fn navigate(&self, path: &str) -> Result<(), SuiteError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| SuiteError::Config(format!("invalid path '{path}': {err}")))?;
        self.navigate_to_url(url.as_str()).await
    }

    pub async fn navigate_to_url(&self, url: &str) -> Result<(), SuiteError> {
        debug!(%url, "navigating");
        self.page.goto(url).await?;
        self.await_load().await?;
        self.pace().await;
        Ok(())
    }

    pub async fn reload(&self) -> Result<(), SuiteError> {
        debug!("reloading page");
        self.page.evaluate("location.reload()").await?;
        self.await_load().await?;
        self.pace().await;
        Ok(())
    }

    pub async fn go_back(&self) -> Result<(), SuiteError> {
        debug!("navigating back in history");
        self.page.evaluate("history.back()").await?;
        self.await_load().await?;
        self.pace().await;
        Ok(())
    }

    pub async fn current_url(&self) -> Result<String, SuiteError> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    // Interaction

    pub async fn click(&self, selector: &str) -> Result<(), SuiteError> {
        debug!(selector, "clicking");
        let element = self.wait_for_element(selector).await?;
        element.click().await?;
        self.pace().await;
        Ok(())
    }

    /// Clear the input then type `text` into it with real key events.
    pub async fn fill(&self, selector: &str, text: &str) -> Result<(), SuiteError> {
        debug!(selector, "filling input");
        let element = self.wait_for_element(selector).await?;
        element.click().await?;

        let expr = format!(
            "(() => {{\n\
                const el = document.querySelector({sel});\n\
                if (!el) {{ return false; }}\n\
                el.value = '';\n\
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));\n\
                return true;\n\
            }})()",
            sel = js_literal(selector)?
        );
        self.page.evaluate(expr).await?;

        if !text.is_empty() {
            element.type_str(text).await?;
        }
        self.pace().await;
        Ok(())
    }

    /// Select a `<select>` option by its value attribute.
    pub async fn select_option(&self, selector: &str, value: &str) -> Result<(), SuiteError> {
        debug!(selector, value, "selecting dropdown option");
        self.wait_for_element(selector).await?;

        let expr = format!(
            "(() => {{\n\
                const el = document.querySelector({sel});\n\
                if (!el) {{ return {{ status: 'missing' }}; }}\n\
                const options = Array.from(el.options || []);\n\
                const match = options.find(o => o.value === {val});\n\
                if (!match) {{ return {{ status: 'no-option' }}; }}\n\
                el.value = match.value;\n\
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));\n\
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));\n\
                return {{ status: 'ok' }};\n\
            }})()",
            sel = js_literal(selector)?,
            val = js_literal(value)?
        );
        let outcome: serde_json::Value = self.eval_json(&expr).await?;

        match outcome.get("status").and_then(|v| v.as_str()) {
            Some("ok") => {
                self.pace().await;
                Ok(())
            }
            Some("no-option") => Err(SuiteError::ElementNotFound {
                selector: format!("{selector} option[value='{value}']"),
            }),
            _ => Err(SuiteError::ElementNotFound {
                selector: selector.to_string(),
            }),
        }
    }

    // Waits

    /// Wait until the selector matches an attached element.
    pub async fn wait_for_element(
        &self,
        selector: &str,
    ) -> Result<chromiumoxide::element::Element, SuiteError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::ElementNotFound {
                    selector: selector.to_string(),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn wait_for_visible(&self, selector: &str) -> Result<(), SuiteError> {
        self.wait_for_visibility(selector, true).await
    }

    pub async fn wait_for_hidden(&self, selector: &str) -> Result<(), SuiteError> {
        self.wait_for_visibility(selector, false).await
    }

    /// Wait until the current URL contains `fragment`.
    pub async fn wait_for_url(&self, fragment: &str) -> Result<(), SuiteError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if self.current_url().await?.contains(fragment) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::Timeout {
                    what: format!("url containing '{fragment}'"),
                    waited_ms: self.timeout.as_millis() as u64,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    // State readers

    pub async fn is_visible(&self, selector: &str) -> Result<bool, SuiteError> {
        let state = self.visibility_state(selector).await?;
        Ok(state == Visibility::Visible)
    }

    pub async fn text_of(&self, selector: &str) -> Result<String, SuiteError> {
        self.wait_for_element(selector).await?;
        let expr = format!(
            "(document.querySelector({sel})?.textContent || '').trim()",
            sel = js_literal(selector)?
        );
        self.eval_json(&expr).await
    }

    /// Trimmed text content of every element the selector matches, in DOM order.
    pub async fn texts_of(&self, selector: &str) -> Result<Vec<String>, SuiteError> {
        let expr = format!(
            "Array.from(document.querySelectorAll({sel})).map(el => (el.textContent || '').trim())",
            sel = js_literal(selector)?
        );
        self.eval_json(&expr).await
    }

    pub async fn element_count(&self, selector: &str) -> Result<usize, SuiteError> {
        let expr = format!(
            "document.querySelectorAll({sel}).length",
            sel = js_literal(selector)?
        );
        let count: u64 = self.eval_json(&expr).await?;
        Ok(count as usize)
    }

    pub async fn attribute(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, SuiteError> {
        let element = self.wait_for_element(selector).await?;
        Ok(element.attribute(name).await?)
    }

    pub async fn input_value(&self, selector: &str) -> Result<String, SuiteError> {
        self.wait_for_element(selector).await?;
        let expr = format!(
            "(document.querySelector({sel})?.value || '')",
            sel = js_literal(selector)?
        );
        self.eval_json(&expr).await
    }

    // Expectations

    pub async fn expect_visible(&self, selector: &str) -> Result<(), SuiteError> {
        match self.wait_for_visible(selector).await {
            Ok(()) => Ok(()),
            Err(SuiteError::Timeout { .. }) => Err(SuiteError::assertion(
                format!("element '{selector}' is visible"),
                "visible",
                "hidden or absent",
            )),
            Err(err) => Err(err),
        }
    }

    pub async fn expect_hidden(&self, selector: &str) -> Result<(), SuiteError> {
        match self.wait_for_hidden(selector).await {
            Ok(()) => Ok(()),
            Err(SuiteError::Timeout { .. }) => Err(SuiteError::assertion(
                format!("element '{selector}' is hidden"),
                "hidden",
                "visible",
            )),
            Err(err) => Err(err),
        }
    }

    /// Expect the element's text to contain `expected`, polling until the
    /// timeout to ride out in-flight re-renders.
    pub async fn expect_text(&self, selector: &str, expected: &str) -> Result<(), SuiteError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let actual = self.text_of(selector).await?;
            if actual.contains(expected) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::assertion(
                    format!("text of '{selector}'"),
                    expected,
                    actual,
                ));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Expect the selector to match exactly `expected` elements, polling
    /// until the timeout so DOM updates in flight can settle.
    pub async fn expect_count(&self, selector: &str, expected: usize) -> Result<(), SuiteError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let actual = self.element_count(selector).await?;
            if actual == expected {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::assertion(
                    format!("count of '{selector}'"),
                    expected.to_string(),
                    actual.to_string(),
                ));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn expect_url(&self, fragment: &str) -> Result<(), SuiteError> {
        match self.wait_for_url(fragment).await {
            Ok(()) => Ok(()),
            Err(SuiteError::Timeout { .. }) => Err(SuiteError::assertion(
                "current url",
                format!("contains '{fragment}'"),
                self.current_url().await.unwrap_or_default(),
            )),
            Err(err) => Err(err),
        }
    }

    // Internals

    async fn await_load(&self) -> Result<(), SuiteError> {
        match tokio::time::timeout(self.timeout, self.page.wait_for_navigation()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(err.into()),
            Err(_) => Err(SuiteError::Timeout {
                what: "page load".to_string(),
                waited_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    async fn wait_for_visibility(&self, selector: &str, wanted: bool) -> Result<(), SuiteError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let visible = self.visibility_state(selector).await? == Visibility::Visible;
            if visible == wanted {
                return Ok(());
            }
            if Instant::now() >= deadline {
                let state = if wanted { "visible" } else { "hidden" };
                return Err(SuiteError::Timeout {
                    what: format!("element '{selector}' to become {state}"),
                    waited_ms: self.timeout.as_millis() as u64,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn visibility_state(&self, selector: &str) -> Result<Visibility, SuiteError> {
        let expr = format!(
            "(() => {{\n\
                const el = document.querySelector({sel});\n\
                if (!el) {{ return 'missing'; }}\n\
                const style = window.getComputedStyle(el);\n\
                const rect = el.getBoundingClientRect();\n\
                const visible = style.visibility !== 'hidden' && style.display !== 'none'\n\
                    && (rect.width > 0 || rect.height > 0 || el.getClientRects().length > 0);\n\
                return visible ? 'visible' : 'hidden';\n\
            }})()",
            sel = js_literal(selector)?
        );
        let state: String = self.eval_json(&expr).await?;
        Ok(match state.as_str() {
            "visible" => Visibility::Visible,
            "hidden" => Visibility::Hidden,
            _ => Visibility::Missing,
        })
    }

    async fn eval_json<T: serde::de::DeserializeOwned>(
        &self,
        expr: &str,
    ) -> Result<T, SuiteError> {
        let result = self.page.evaluate(expr).await?;
        result
            .into_value::<T>()
            .map_err(|err| SuiteError::Cdp(format!("unexpected evaluation result: {err}")))
    }

    async fn pace(&self) {
        if !self.slow_mo.is_zero() {
            sleep(self.slow_mo).await;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visibility {
    Visible,
    Hidden,
    Missing,
}

/// Encode a string as a JavaScript literal for embedding in an expression.
fn js_literal(raw: &str) -> Result<String, SuiteError> {
    serde_json::to_string(raw).map_err(|err| SuiteError::Cdp(format!("selector encoding: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_literal_quotes_and_escapes() {
        assert_eq!(js_literal("a'b").unwrap(), "\"a'b\"");
        assert_eq!(js_literal("say \"hi\"").unwrap(), "\"say \\\"hi\\\"\"");
    }
}
