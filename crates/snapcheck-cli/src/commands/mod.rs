pub mod all;
pub mod completion;
pub mod pages;
pub mod placeholder;
pub mod reorder;
pub mod status;

use anyhow::Result;
use snapcheck_browser::RunOptions;
use snapcheck_core::{CheckPlan, CheckReport};
use std::path::PathBuf;
use url::Url;

/// Shared invocation context resolved from the global CLI flags.
pub struct CheckContext {
    pub base_url: Url,
    pub output_dir: PathBuf,
    pub chrome_path: Option<PathBuf>,
}

impl CheckContext {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            chrome_path: self.chrome_path.clone(),
            window: None,
        }
    }
}

/// Launch a browser, run one plan, and report the evidence written.
pub(crate) fn run_check(ctx: &CheckContext, plan: CheckPlan) -> Result<CheckReport> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    tracing::debug!("Writing screenshots under {}", ctx.output_dir.display());
    println!("🔎 Running {} check against {}", plan.name, ctx.base_url);

    let result = runtime.block_on(snapcheck_browser::run_plan(&plan, &ctx.run_options()));

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    let report = result?;
    for path in &report.screenshots {
        println!("✅ Screenshot written to: {}", path.display());
    }
    println!(
        "✅ {} check passed in {}ms",
        report.check,
        report.duration.as_millis()
    );
    Ok(report)
}
