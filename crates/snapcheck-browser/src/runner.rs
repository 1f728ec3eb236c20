use crate::session::PageSession;
use crate::{HeadlessChrome, Result, locate_chrome};
use snapcheck_core::{CheckPlan, CheckReport, Step};
use std::path::PathBuf;

/// Default viewport when the caller does not pick one.
const DEFAULT_WINDOW: (u32, u32) = (1280, 720);

/// Options shared by every check run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit Chrome binary; platform discovery otherwise.
    pub chrome_path: Option<PathBuf>,
    /// Viewport size, defaults to 1280x720.
    pub window: Option<(u32, u32)>,
}

/// Execute a check plan against a fresh headless browser.
///
/// The browser is owned exclusively for the duration of the run and closed on
/// every exit path; a step failure is only returned after teardown completes.
pub async fn run_plan(plan: &CheckPlan, options: &RunOptions) -> Result<CheckReport> {
    let chrome = locate_chrome(options.chrome_path.as_deref())?;
    let window = options.window.unwrap_or(DEFAULT_WINDOW);

    let browser = HeadlessChrome::launch(&chrome, window).await?;
    let mut report = CheckReport::begin(plan.name.as_str());

    tracing::info!("Running check \"{}\"", plan.name);
    let outcome = drive(&browser, plan, &mut report).await;

    browser.close().await;
    outcome?;

    report.finish();
    Ok(report)
}

async fn drive(
    browser: &HeadlessChrome,
    plan: &CheckPlan,
    report: &mut CheckReport,
) -> Result<()> {
    let page = browser.new_page().await?;
    let mut session = PageSession::new(page);

    if plan.echo_console {
        session.echo_console().await?;
    }

    let outcome = execute_steps(&session, plan, report).await;
    session.shutdown();
    outcome
}

async fn execute_steps(
    session: &PageSession,
    plan: &CheckPlan,
    report: &mut CheckReport,
) -> Result<()> {
    for step in &plan.steps {
        match step {
            Step::Goto { url, timeout } => session.goto(url, *timeout).await?,
            Step::WaitVisible { locator, timeout } => {
                session.wait_visible(locator, *timeout).await?
            }
            Step::Click { selector } => session.click(selector).await?,
            Step::Expect {
                script,
                label,
                message,
            } => session.expect_true(script, label, message).await?,
            Step::Pause { duration } => session.pause(*duration).await,
            Step::Screenshot { path } => {
                session.screenshot(path).await?;
                tracing::info!("Screenshot written to {}", path.display());
                report.record_screenshot(path.clone());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_options_default_to_discovery() {
        let options = RunOptions::default();
        assert!(options.chrome_path.is_none());
        assert!(options.window.is_none());
    }

    // Full plan execution needs a running Chrome and a served app; covered by
    // operating the CLI against a live dev server.
}
