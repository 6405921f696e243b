use crate::context::ExecutionContext;
use crate::output::{Palette, print_json};
use crate::types::OutputFormat;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let entries = ctx.store().index()?;

    if ctx.format == OutputFormat::Json {
        return print_json(&entries);
    }

    let palette = Palette::detect();
    if entries.is_empty() {
        println!("{}", palette.dim("No recorded calls"));
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{}  calls {}  elapsed {}ms  updated {}",
            palette.identity(&entry.identity().to_string()),
            entry.call_count,
            entry.elapsed_time,
            entry.update_time_string.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
