use crate::context::ExecutionContext;
use crate::output::{Palette, print_json};
use crate::types::OutputFormat;
use anyhow::Result;
use serde_json::json;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let path = ctx.layout().index_path();
    let existed = path.exists();

    ctx.store().reset()?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({
            "path": path.display().to_string(),
            "removed": existed,
        })),
        OutputFormat::Plain => {
            let palette = Palette::detect();
            if existed {
                println!("{} {}", palette.ok("Removed"), path.display());
            } else {
                println!("{}", palette.dim(&format!("No index at {}", path.display())));
            }
            Ok(())
        }
    }
}
