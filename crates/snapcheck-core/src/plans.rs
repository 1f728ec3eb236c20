//! The canonical verification sequences.
//!
//! Each builder produces the plan for one check against the locally served
//! app: a fixed page, a handful of waits and interactions, and a screenshot
//! under the output directory as visual evidence.

use crate::check::{CheckPlan, Locator};
use crate::error::Result;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Pause after the animation container appears so the loop visibly starts.
const ANIMATION_WARMUP: Duration = Duration::from_millis(1000);

/// Pause after the canvas appears so the reordered image finishes loading.
const IMAGE_LOAD_GRACE: Duration = Duration::from_millis(2000);

/// The landing page can be slow to serve on a cold dev server.
const LANDING_NAV_TIMEOUT: Duration = Duration::from_secs(60);

/// Status page: the animation container must render.
pub fn status(base: &Url, out_dir: &Path) -> Result<CheckPlan> {
    Ok(CheckPlan::new("status")
        .goto(base.join("status.html")?)
        .wait_visible(Locator::css("#inky-animation"))
        .pause(ANIMATION_WARMUP)
        .screenshot(out_dir.join("status.png")))
}

/// Reorder flow: clicking the reorder link on the order-history fixture must
/// land on the main page with the image canvas populated. Browser console
/// output is forwarded while this one runs.
pub fn reorder(base: &Url, out_dir: &Path) -> Result<CheckPlan> {
    Ok(CheckPlan::new("reorder")
        .with_console_echo()
        .goto(base.join("scratch/orders.html")?)
        .click("#reorder-link")
        .wait_visible(Locator::css("#imageCanvas"))
        .pause(IMAGE_LOAD_GRACE)
        .screenshot(out_dir.join("reorder.png")))
}

/// Canvas placeholder: it must inherit contenteditable from its parent, or
/// paste stops working inside it.
pub fn placeholder(base: &Url, out_dir: &Path) -> Result<CheckPlan> {
    Ok(CheckPlan::new("placeholder")
        .goto(base.clone())
        .wait_visible(Locator::css("#canvas-placeholder"))
        .expect_true(
            "(() => { const el = document.querySelector('#canvas-placeholder'); \
             return !!(el && el.isContentEditable); })()",
            "isContentEditable",
            "Placeholder is not contenteditable",
        )
        .screenshot(out_dir.join("placeholder.png")))
}

/// Landing and order-history pages: both must still render their key content.
pub fn pages(base: &Url, out_dir: &Path) -> Result<CheckPlan> {
    Ok(CheckPlan::new("pages")
        .goto_within(base.join("index.html")?, LANDING_NAV_TIMEOUT)
        .wait_visible(Locator::css("#imageCanvas"))
        .screenshot(out_dir.join("index.png"))
        .goto(base.join("orders.html")?)
        .wait_visible(Locator::heading("Your Order History"))
        .screenshot(out_dir.join("orders.png")))
}

/// Every check, in the order they are normally run.
pub fn all(base: &Url, out_dir: &Path) -> Result<Vec<CheckPlan>> {
    Ok(vec![
        status(base, out_dir)?,
        reorder(base, out_dir)?,
        placeholder(base, out_dir)?,
        pages(base, out_dir)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{DEFAULT_TIMEOUT, Step};
    use std::path::PathBuf;

    fn base() -> Url {
        Url::parse("http://localhost:5173/").unwrap()
    }

    fn out_dir() -> PathBuf {
        PathBuf::from("verification")
    }

    #[test]
    fn test_status_waits_for_animation_before_capture() {
        let plan = status(&base(), &out_dir()).unwrap();

        assert_eq!(plan.name, "status");
        assert!(!plan.echo_console);
        assert!(matches!(&plan.steps[0], Step::Goto { url, timeout }
            if url == "http://localhost:5173/status.html" && *timeout == DEFAULT_TIMEOUT));
        assert!(matches!(&plan.steps[1], Step::WaitVisible { locator, .. }
            if *locator == Locator::css("#inky-animation")));
        assert!(matches!(&plan.steps[2], Step::Pause { duration }
            if *duration == Duration::from_millis(1000)));
        assert!(matches!(&plan.steps[3], Step::Screenshot { path }
            if path == &PathBuf::from("verification/status.png")));
    }

    #[test]
    fn test_reorder_echoes_console_and_clicks_through() {
        let plan = reorder(&base(), &out_dir()).unwrap();

        assert!(plan.echo_console);
        assert!(matches!(&plan.steps[0], Step::Goto { url, .. }
            if url == "http://localhost:5173/scratch/orders.html"));
        assert!(matches!(&plan.steps[1], Step::Click { selector }
            if selector == "#reorder-link"));
        assert!(matches!(&plan.steps[2], Step::WaitVisible { locator, .. }
            if *locator == Locator::css("#imageCanvas")));
        assert!(matches!(&plan.steps[3], Step::Pause { duration }
            if *duration == Duration::from_millis(2000)));
    }

    #[test]
    fn test_placeholder_checks_editability_before_capture() {
        let plan = placeholder(&base(), &out_dir()).unwrap();

        assert!(matches!(&plan.steps[0], Step::Goto { url, .. }
            if url == "http://localhost:5173/"));

        let Step::Expect {
            script,
            label,
            message,
        } = &plan.steps[2]
        else {
            panic!("expected an Expect step, got {:?}", plan.steps[2]);
        };
        assert!(script.contains("#canvas-placeholder"));
        assert!(script.contains("isContentEditable"));
        assert_eq!(label, "isContentEditable");
        assert_eq!(message, "Placeholder is not contenteditable");

        // No screenshot before the expectation passes.
        assert!(matches!(&plan.steps[3], Step::Screenshot { .. }));
    }

    #[test]
    fn test_pages_uses_extended_nav_timeout() {
        let plan = pages(&base(), &out_dir()).unwrap();

        assert!(matches!(&plan.steps[0], Step::Goto { url, timeout }
            if url == "http://localhost:5173/index.html"
                && *timeout == Duration::from_secs(60)));
        assert!(matches!(&plan.steps[4], Step::WaitVisible { locator, timeout }
            if *locator == Locator::heading("Your Order History")
                && *timeout == DEFAULT_TIMEOUT));

        let screenshots: Vec<_> = plan
            .steps
            .iter()
            .filter_map(|step| match step {
                Step::Screenshot { path } => Some(path.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            screenshots,
            vec![
                PathBuf::from("verification/index.png"),
                PathBuf::from("verification/orders.png"),
            ]
        );
    }

    #[test]
    fn test_all_runs_every_check_once() {
        let plans = all(&base(), &out_dir()).unwrap();
        let names: Vec<_> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["status", "reorder", "placeholder", "pages"]);
    }
}
