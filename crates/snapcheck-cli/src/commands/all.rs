use super::CheckContext;
use anyhow::Result;
use snapcheck_core::plans;

/// Run every check in sequence, stopping at the first failure. Each check
/// gets its own browser.
pub fn execute(ctx: &CheckContext) -> Result<()> {
    let plans = plans::all(&ctx.base_url, &ctx.output_dir)?;
    let count = plans.len();

    for plan in plans {
        super::run_check(ctx, plan)?;
    }

    println!("✅ All {count} checks passed");
    Ok(())
}
