use crate::context::ExecutionContext;
use crate::output::{Palette, print_json};
use crate::types::OutputFormat;
use anyhow::Result;
use callsnap_types::FunctionIdentity;

pub fn handle(ctx: &ExecutionContext, target: &str, function: &str) -> Result<()> {
    let identity = FunctionIdentity::new(target, function);
    let entries = ctx.store().history(&identity)?;

    if ctx.format == OutputFormat::Json {
        return print_json(&entries);
    }

    let palette = Palette::detect();
    if entries.is_empty() {
        println!("{}", palette.dim(&format!("No history for {}", identity)));
        return Ok(());
    }

    println!("{} ({} entries)", palette.identity(&identity.to_string()), entries.len());
    for entry in &entries {
        let status = if entry.is_completed() {
            palette.ok("completed")
        } else {
            palette.pending("observed ")
        };
        let input = serde_json::Value::Array(entry.input.clone());
        let output = entry
            .output
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {}  {}  {}  in {}  out {}",
            entry.id.as_deref().unwrap_or("-"),
            status,
            palette.dim(entry.creation_time_string.as_deref().unwrap_or("-")),
            input,
            output,
        );
    }

    Ok(())
}
