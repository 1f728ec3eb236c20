use super::CheckContext;
use anyhow::Result;
use snapcheck_core::plans;

pub fn execute(ctx: &CheckContext) -> Result<()> {
    let plan = plans::pages(&ctx.base_url, &ctx.output_dir)?;
    super::run_check(ctx, plan)?;
    Ok(())
}
