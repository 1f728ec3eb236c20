use crate::{Error, Result};
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::js_protocol::runtime::{EnableParams, EventConsoleApiCalled, RemoteObject};
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use snapcheck_core::check::Locator;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Poll interval for element waits.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drives one page through navigation, waits, clicks, and captures.
pub struct PageSession {
    page: Page,
    console_task: Option<JoinHandle<()>>,
}

impl PageSession {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            console_task: None,
        }
    }

    /// Forward browser console messages to stdout as `PAGE LOG:` lines until
    /// the session shuts down.
    pub async fn echo_console(&mut self) -> Result<()> {
        self.page.execute(EnableParams::default()).await?;
        let mut events = self
            .page
            .event_listener::<EventConsoleApiCalled>()
            .await?;

        self.console_task = Some(tokio::spawn(async move {
            while let Some(event) = events.next().await {
                println!("PAGE LOG: {}", render_console_args(&event.args));
            }
        }));
        Ok(())
    }

    /// Navigate and wait for the load to settle, bounded by `timeout`.
    pub async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        tracing::info!("Navigating to {url}");
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(Error::Navigation(format!("{url}: {e}"))),
            Err(_) => Err(Error::WaitTimeout {
                what: format!("navigation to {url}"),
                millis: timeout.as_millis() as u64,
            }),
        }
    }

    /// Wait until the element is present and visibly rendered: non-zero box,
    /// not `display:none`, not `visibility:hidden`.
    pub async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        let predicate = visibility_predicate(locator);
        let start = Instant::now();

        loop {
            if self.eval_bool(&predicate).await? {
                tracing::debug!(
                    "{} visible after {}ms",
                    locator.describe(),
                    start.elapsed().as_millis()
                );
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(Error::WaitTimeout {
                    what: locator.describe(),
                    millis: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Click the first element matching the selector.
    pub async fn click(&self, selector: &str) -> Result<()> {
        tracing::info!("Clicking {selector}");
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| Error::Cdp(format!("element {selector} not found: {e}")))?;
        element.click().await?;
        Ok(())
    }

    /// Evaluate a boolean page expression, echoing the observed value under
    /// `label`. Anything but `true` fails with `message`.
    pub async fn expect_true(&self, script: &str, label: &str, message: &str) -> Result<()> {
        let value = self.eval_bool(script).await?;
        println!("{label}: {value}");
        if value {
            Ok(())
        } else {
            Err(Error::Expectation(message.to_string()))
        }
    }

    pub async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Capture a full-page PNG to `path`, creating parent directories.
    pub async fn screenshot(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        self.page
            .save_screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
                path,
            )
            .await?;
        Ok(())
    }

    /// Stop the console forwarding task, if one is running.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.console_task.take() {
            task.abort();
        }
    }

    async fn eval_bool(&self, script: &str) -> Result<bool> {
        let result = self.page.evaluate(script).await?;
        Ok(result.into_value::<bool>().unwrap_or(false))
    }
}

/// Build a side-effect-free JS expression that is `true` once the located
/// element is visibly rendered. Selector and heading text are JSON-quoted so
/// arbitrary strings cannot escape into the script.
fn visibility_predicate(locator: &Locator) -> String {
    let lookup = match locator {
        Locator::Css(selector) => {
            format!("document.querySelector({})", json_quote(selector))
        }
        Locator::Heading(text) => format!(
            "Array.from(document.querySelectorAll('h1,h2,h3,h4,h5,h6'))\
             .find(el => el.textContent.trim() === {})",
            json_quote(text)
        ),
    };

    format!(
        "(() => {{ const el = {lookup}; if (!el) return false; \
         const box = el.getBoundingClientRect(); \
         const style = window.getComputedStyle(el); \
         return box.width > 0 && box.height > 0 \
             && style.visibility !== 'hidden' && style.display !== 'none'; }})()"
    )
}

fn json_quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

/// Render console-call arguments the way a terminal user expects: plain
/// strings bare, everything else JSON, objects falling back to the remote
/// description.
fn render_console_args(args: &[RemoteObject]) -> String {
    args.iter()
        .map(|arg| match &arg.value {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => arg.description.clone().unwrap_or_default(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_predicate_embeds_quoted_selector() {
        let predicate = visibility_predicate(&Locator::css("#imageCanvas"));
        assert!(predicate.contains(r##"document.querySelector("#imageCanvas")"##));
        assert!(predicate.contains("getBoundingClientRect"));
    }

    #[test]
    fn test_heading_predicate_scans_heading_tags() {
        let predicate = visibility_predicate(&Locator::heading("Your Order History"));
        assert!(predicate.contains("h1,h2,h3,h4,h5,h6"));
        assert!(predicate.contains(r#""Your Order History""#));
    }

    #[test]
    fn test_hostile_selector_cannot_escape_the_script() {
        let predicate = visibility_predicate(&Locator::css(r#"") || alert(1); ("#));
        // The quote is escaped, so the payload stays inside the string literal.
        assert!(predicate.contains(r#"\") || alert(1); ("#));
        assert!(!predicate.contains(r#"querySelector("") || alert"#));
    }

    #[test]
    fn test_json_quote_escapes_quotes_and_newlines() {
        assert_eq!(json_quote("plain"), r#""plain""#);
        assert_eq!(json_quote("a\"b"), r#""a\"b""#);
        assert_eq!(json_quote("a\nb"), r#""a\nb""#);
    }
}
