use crate::{Error, Result};
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::Path;
use tokio::task::JoinHandle;

/// A running headless Chrome instance with its CDP message pump.
pub struct HeadlessChrome {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl HeadlessChrome {
    /// Launch headless Chrome and start draining CDP protocol messages.
    pub async fn launch(chrome: &Path, window: (u32, u32)) -> Result<Self> {
        let config = BrowserConfig::builder()
            .chrome_executable(chrome)
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .window_size(window.0, window.1)
            .build()
            .map_err(Error::Browser)?;

        tracing::debug!("Launching headless Chrome from {}", chrome.display());
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {e}")))?;

        // The handler must run for any CDP command to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        tracing::debug!("Headless Chrome launched");
        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a fresh blank tab.
    pub async fn new_page(&self) -> Result<Page> {
        Ok(self.browser.new_page("about:blank").await?)
    }

    /// Close the browser and stop the message pump. Close failures are
    /// logged, not returned: teardown must not mask an earlier step error.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Error closing browser: {e}");
        }
        self.handler_task.abort();
    }
}
