use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for navigation and element waits.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How a step locates an element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// A CSS selector.
    Css(String),
    /// A heading (h1-h6) whose trimmed text equals this string.
    Heading(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Locator::Heading(text.into())
    }

    /// Human-readable form for logs and timeout errors.
    pub fn describe(&self) -> String {
        match self {
            Locator::Css(selector) => selector.clone(),
            Locator::Heading(text) => format!("heading \"{text}\""),
        }
    }
}

/// One operation in a verification sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Navigate the page to a URL and wait for the load to settle.
    Goto { url: String, timeout: Duration },

    /// Wait until the element is present and visibly rendered.
    WaitVisible { locator: Locator, timeout: Duration },

    /// Click the first element matching a CSS selector.
    Click { selector: String },

    /// Evaluate a boolean page expression, echoing the observed value under
    /// `label`. Anything but `true` fails the check with `message`.
    Expect {
        script: String,
        label: String,
        message: String,
    },

    /// Sleep for a fixed duration (simulated delay, not event-driven).
    Pause { duration: Duration },

    /// Capture a full-page PNG to this path.
    Screenshot { path: PathBuf },
}

/// A named, linear verification sequence executed against one browser session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckPlan {
    pub name: String,
    /// Forward browser console messages to stdout while the plan runs.
    pub echo_console: bool,
    pub steps: Vec<Step>,
}

impl CheckPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            echo_console: false,
            steps: Vec::new(),
        }
    }

    pub fn with_console_echo(mut self) -> Self {
        self.echo_console = true;
        self
    }

    pub fn goto(self, url: impl Into<String>) -> Self {
        self.goto_within(url, DEFAULT_TIMEOUT)
    }

    pub fn goto_within(mut self, url: impl Into<String>, timeout: Duration) -> Self {
        self.steps.push(Step::Goto {
            url: url.into(),
            timeout,
        });
        self
    }

    pub fn wait_visible(self, locator: Locator) -> Self {
        self.wait_visible_within(locator, DEFAULT_TIMEOUT)
    }

    pub fn wait_visible_within(mut self, locator: Locator, timeout: Duration) -> Self {
        self.steps.push(Step::WaitVisible { locator, timeout });
        self
    }

    pub fn click(mut self, selector: impl Into<String>) -> Self {
        self.steps.push(Step::Click {
            selector: selector.into(),
        });
        self
    }

    pub fn expect_true(
        mut self,
        script: impl Into<String>,
        label: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.steps.push(Step::Expect {
            script: script.into(),
            label: label.into(),
            message: message.into(),
        });
        self
    }

    pub fn pause(mut self, duration: Duration) -> Self {
        self.steps.push(Step::Pause { duration });
        self
    }

    pub fn screenshot(mut self, path: PathBuf) -> Self {
        self.steps.push(Step::Screenshot { path });
        self
    }
}
