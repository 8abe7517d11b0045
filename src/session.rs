//! Session context
//!
//! One `Session` is one live browser: the chromiumoxide handle, the page the
//! test drives, and the spawned CDP event-handler task. The fixture layer
//! owns it for exactly one test and closes it on every exit path.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::Path;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::SuiteError;

pub struct Session {
    id: Uuid,
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl Session {
    /// Launch a browser per the settings and open a blank page.
    pub async fn launch(settings: &Settings) -> Result<Self, SuiteError> {
        let mut builder = BrowserConfig::builder().window_size(1920, 1080);

        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(executable) = settings.browser_executable() {
            debug!(path = %executable.display(), "using resolved browser executable");
            builder = builder.chrome_executable(executable);
        }

        let config = builder.build().map_err(SuiteError::Cdp)?;
        let (browser, mut handler) = Browser::launch(config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        let id = Uuid::new_v4();
        info!(
            session = %id,
            browser = settings.browser.as_str(),
            headless = settings.headless,
            "browser session started"
        );

        Ok(Self {
            id,
            browser,
            handler_task,
            page,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Capture a full-page PNG screenshot to `path`.
    pub async fn screenshot(&self, path: &Path) -> Result<(), SuiteError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let bytes = self.page.screenshot(params).await?;
        tokio::fs::write(path, bytes).await?;
        debug!(session = %self.id, path = %path.display(), "screenshot captured");
        Ok(())
    }

    /// Close the browser and stop the event-handler task.
    pub async fn close(mut self) {
        if let Err(err) = self.browser.close().await {
            warn!(session = %self.id, %err, "browser close failed");
        }
        if let Err(err) = self.browser.wait().await {
            warn!(session = %self.id, %err, "browser process did not exit cleanly");
        }
        self.handler_task.abort();
        info!(session = %self.id, "browser session closed");
    }
}
