use super::CheckContext;
use anyhow::Result;
use snapcheck_core::plans;

/// Browser console output is forwarded as `PAGE LOG:` lines while this check
/// runs; the reorder flow logs its canvas updates there.
pub fn execute(ctx: &CheckContext) -> Result<()> {
    let plan = plans::reorder(&ctx.base_url, &ctx.output_dir)?;
    super::run_check(ctx, plan)?;
    Ok(())
}
