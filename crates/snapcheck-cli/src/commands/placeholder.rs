use super::CheckContext;
use anyhow::Result;
use snapcheck_core::plans;

pub fn execute(ctx: &CheckContext) -> Result<()> {
    let plan = plans::placeholder(&ctx.base_url, &ctx.output_dir)?;
    match super::run_check(ctx, plan) {
        Ok(_) => Ok(()),
        Err(e) => {
            // Mirrored on stdout next to the check's own output lines.
            println!("Error: {e}");
            Err(e)
        }
    }
}
