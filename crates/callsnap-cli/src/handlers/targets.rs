use crate::context::ExecutionContext;
use crate::output::{Palette, print_json};
use crate::types::OutputFormat;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let identities = ctx.store().identities()?;

    if ctx.format == OutputFormat::Json {
        return print_json(&identities);
    }

    let palette = Palette::detect();
    if identities.is_empty() {
        println!("{}", palette.dim("No recorded functions"));
        return Ok(());
    }

    for identity in &identities {
        println!("{}", palette.identity(&identity.to_string()));
    }

    Ok(())
}
